//! 実行状況の報告先。
//!
//! 抽出・パッチ処理はグローバルな標準出力に直接書かず、`Reporter` を受け取って
//! そこへメッセージを流す。CLI では `TracingReporter`、テストでは `MemoryReporter` を使う。

pub trait Reporter {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// `tracing` のイベントとして出力する Reporter
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&mut self, message: &str) {
        tracing::error!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// 受け取ったメッセージをそのまま保持する Reporter
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub entries: Vec<(Severity, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した重要度のメッセージだけを取り出す
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, message: &str) {
        self.entries.push((Severity::Info, message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.entries.push((Severity::Warn, message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.entries.push((Severity::Error, message.to_string()));
    }
}
