//! ルート定義ファイルから `name` と遅延 import されるビューを取り出し、
//! 各ビューの `<script>` に `defineOptions({ name: "..." });` を書き込む。

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod patcher;
pub mod reporter;
pub mod resolver;

use config::Settings;
use error::Result;
use model::RunSummary;
use reporter::Reporter;

/// 抽出 → パッチの一連の処理を実行する。
///
/// ルート定義ファイルの構造エラーと一致なしは `reporter` に報告して `Ok` を返す
/// (どのファイルも書き換えない)。I/O エラーだけが `Err` になる。
pub fn run(settings: &Settings, reporter: &mut dyn Reporter) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // 1) ルート定義ファイルを AST 解析して MatchedRoute を取得
    let routes = match parser::parse_routes_in_file(&settings.route_file) {
        Ok(routes) => routes,
        Err(err) if err.is_structural() => {
            reporter.error(&err.to_string());
            return Ok(summary);
        }
        Err(err) => return Err(err),
    };

    if routes.is_empty() {
        reporter.warn(&format!(
            "`{}` を import するルートが見つかりませんでした: {}",
            parser::VIEWS_PREFIX,
            settings.route_file.display()
        ));
        return Ok(summary);
    }
    summary.matched = routes.len();

    // 2) 各ビューコンポーネントに name を書き込む
    let outcomes = patcher::patch_routes(
        &routes,
        &settings.views_dir,
        &settings.exclude_dirs,
        reporter,
    )?;
    for outcome in outcomes {
        summary.record(outcome);
    }

    Ok(summary)
}
