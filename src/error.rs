use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectorError {
    #[error("I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("default export が見つかりません: {0}")]
    MissingDefaultExport(PathBuf),
    #[error("default export を配列リテラルに解決できません: {0}")]
    UnresolvableExport(PathBuf),
    #[error("設定ファイルを読み込めません ({path}): {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl InjectorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InjectorError::Io {
            path: path.into(),
            source,
        }
    }

    /// ルート定義ファイルの構造に起因するエラーかどうか。
    /// この種のエラーは報告のみ行い、プロセスは正常終了する。
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            InjectorError::Parse { .. }
                | InjectorError::MissingDefaultExport(_)
                | InjectorError::UnresolvableExport(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InjectorError>;
