//! `.vue` ファイルの `<script>` 領域に `defineOptions({ name: "..." });` を書き込む。
//!
//! `<script>` 領域の外側は一切変更しない。領域内も既存の `defineOptions` の置換か
//! 1 行の挿入だけを行い、周辺のコードは整形し直さない。

use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use swc_common::FileName;
use swc_ecma_ast::{ModuleDecl, ModuleItem};

use crate::error::{InjectorError, Result};
use crate::model::{MatchedRoute, PatchOutcome};
use crate::parser::parse_ts_module;
use crate::reporter::Reporter;
use crate::resolver::{excluded_segment, resolve_component_path};

/// 注入する宣言の関数名 (既存の宣言の検出にも使う)
pub const MARKER: &str = "defineOptions";

/// `<script>` が無いファイルに新規作成するときの属性
const DEFAULT_SCRIPT_ATTRS: &str = " setup";

/// 最初の `<script ...>` から直後の `</script>` まで (属性と中身をキャプチャ)
static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script([^>]*)>(.*?)</script>").expect("valid regex"));

/// `defineOptions(` の呼び出しそのもの。`defineOptionsFoo` などは含まない
static MARKER_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdefineOptions\s*\(").expect("valid regex"));

/// 既存の `defineOptions({ ... });`。最初の `}` までしか見ないので入れ子の波括弧には対応しない
static EXISTING_STATEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdefineOptions\s*\(\s*\{[^}]*\}\s*\)[ \t]*;?").expect("valid regex")
});

static JSX_LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\blang\s*=\s*["']?(?:tsx|jsx)\b"#).expect("valid regex"));

/// 注入する文を組み立てる
pub fn build_statement(name: &str) -> String {
    format!("{MARKER}({{ name: \"{name}\" }});")
}

/// パッチ適用後のファイル内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedSource {
    pub text: String,
    pub outcome: PatchOutcome,
    /// 既存の `defineOptions` が見つかったが置換できなかった
    pub stale_statement: bool,
}

/// `<script>` の中身で使われている改行コード
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// 宣言を挿入する位置
#[derive(Debug, PartialEq, Eq)]
struct Insertion {
    offset: usize,
    /// 挿入位置の直前が改行で終わっていない (import の後に改行が無い)
    needs_line_break: bool,
}

/// 最後のトップレベル import 宣言の直後の改行 (`\n` または `\r\n`) を読み飛ばした位置を返す。
/// import が無ければ先頭、中身をパースできなければ 0。
fn insertion_point(content: &str, tsx: bool) -> Insertion {
    let at = |offset| Insertion {
        offset,
        needs_line_break: false,
    };

    let (module, start_pos) = match parse_ts_module(content, FileName::Anon, tsx) {
        Ok(parsed) => parsed,
        Err(message) => {
            tracing::debug!("<script> の中身をパースできないため先頭に挿入: {}", message);
            return at(0);
        }
    };

    let last_import_end = module.body.iter().rev().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(decl.span.hi),
        _ => None,
    });

    // import が無ければ先頭 (前置きの空白の後) に挿入する
    let Some(hi) = last_import_end else {
        return at(content.len() - content.trim_start().len());
    };

    let end = (hi.0.saturating_sub(start_pos.0) as usize).min(content.len());
    let rest = &content[end..];
    if rest.starts_with("\r\n") {
        at(end + 2)
    } else if rest.starts_with('\n') {
        at(end + 1)
    } else {
        Insertion {
            offset: end,
            needs_line_break: true,
        }
    }
}

/// ファイル内容に `name` の `defineOptions` を注入した結果を返す。ファイル I/O は行わない。
pub fn patch_source(text: &str, name: &str) -> PatchedSource {
    let statement = build_statement(name);

    let script_block = SCRIPT_BLOCK_RE
        .captures(text)
        .and_then(|caps| Some((caps.get(0)?, caps.get(1)?, caps.get(2)?)));

    let Some((whole, attrs, content)) = script_block else {
        return PatchedSource {
            text: format!("<script{DEFAULT_SCRIPT_ATTRS}>\n{statement}\n</script>\n{text}"),
            outcome: PatchOutcome::Created,
            stale_statement: false,
        };
    };

    let attrs = attrs.as_str();
    let content = content.as_str();
    let eol = line_ending(content);

    let mut stale_statement = false;
    let mutated = if MARKER_CALL_RE.is_match(content) {
        if !EXISTING_STATEMENT_RE.is_match(content) {
            stale_statement = true;
        }
        EXISTING_STATEMENT_RE
            .replacen(content, 1, NoExpand(&statement))
            .into_owned()
    } else {
        let insertion = insertion_point(content, JSX_LANG_RE.is_match(attrs));
        let mut inserted = String::with_capacity(content.len() + statement.len() + 4);
        inserted.push_str(&content[..insertion.offset]);
        if insertion.needs_line_break {
            inserted.push_str(eol);
        }
        inserted.push_str(&statement);
        inserted.push_str(eol);
        inserted.push_str(&content[insertion.offset..]);
        inserted
    };

    let block = format!("<script{attrs}>{eol}{}{eol}</script>", mutated.trim());

    let mut patched = String::with_capacity(text.len() + statement.len() + 2);
    patched.push_str(&text[..whole.start()]);
    patched.push_str(&block);
    patched.push_str(&text[whole.end()..]);

    PatchedSource {
        text: patched,
        outcome: PatchOutcome::Updated,
        stale_statement,
    }
}

/// 1 ルート分の処理。除外・ファイル不在はスキップとして報告し、I/O エラーのみ Err を返す。
pub fn patch_route(
    route: &MatchedRoute,
    views_dir: &Path,
    exclude_dirs: &[String],
    reporter: &mut dyn Reporter,
) -> Result<PatchOutcome> {
    // 1) 除外ディレクトリ
    if let Some(dir) = excluded_segment(&route.relative_path, exclude_dirs) {
        reporter.info(&format!(
            "スキップ (除外ディレクトリ '{}'): {} -> {}",
            dir, route.name, route.relative_path
        ));
        return Ok(PatchOutcome::Excluded);
    }

    // 2) 対象ファイルのパス
    let target = resolve_component_path(views_dir, &route.relative_path);
    if !target.exists() {
        reporter.warn(&format!(
            "スキップ (ファイルが存在しません): {} -> {}",
            route.name,
            target.display()
        ));
        return Ok(PatchOutcome::Missing);
    }

    // 3) 読み込み → 書き換え → 書き戻し
    let text = fs::read_to_string(&target).map_err(|e| InjectorError::io(&target, e))?;
    let patched = patch_source(&text, &route.name);
    fs::write(&target, &patched.text).map_err(|e| InjectorError::io(&target, e))?;

    if patched.stale_statement {
        reporter.warn(&format!(
            "既存の {} を置換できませんでした (形式が想定外): {}",
            MARKER,
            target.display()
        ));
    }

    match patched.outcome {
        PatchOutcome::Created => reporter.info(&format!(
            "<script> を作成して name を設定しました: {} -> {}",
            route.name,
            target.display()
        )),
        _ => reporter.info(&format!(
            "name を設定しました: {} -> {}",
            route.name,
            target.display()
        )),
    }

    Ok(patched.outcome)
}

/// すべてのルートを順に処理する
pub fn patch_routes(
    routes: &[MatchedRoute],
    views_dir: &Path,
    exclude_dirs: &[String],
    reporter: &mut dyn Reporter,
) -> Result<Vec<PatchOutcome>> {
    routes
        .iter()
        .map(|route| patch_route(route, views_dir, exclude_dirs, reporter))
        .collect()
}
