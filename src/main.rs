// src/main.rs

use clap::Parser;

use route_name_injector::config::{Cli, Settings};
use route_name_injector::logging::init_logging;
use route_name_injector::reporter::TracingReporter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // 1) CLI 引数をパースし、設定ファイルと合わせてパスを絶対パス化
    let cli = Cli::parse();
    let settings = Settings::resolve(cli)?;
    tracing::debug!("設定: {:?}", settings);

    // 2) 抽出 → パッチ
    let mut reporter = TracingReporter;
    let summary = route_name_injector::run(&settings, &mut reporter)?;

    // 3) 集計を表示
    if summary.matched > 0 {
        tracing::info!(
            "完了: 対象 {} 件 (更新 {}, 新規 <script> {}, 除外 {}, ファイルなし {})",
            summary.matched,
            summary.updated,
            summary.created,
            summary.excluded,
            summary.missing
        );
    }

    Ok(())
}
