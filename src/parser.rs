use swc_common::{BytePos, FileName, SourceMap, sync::Lrc};
use swc_ecma_ast::*;
use swc_ecma_parser::{Parser as SwcParser, StringInput, Syntax, TsConfig, lexer::Lexer};
use swc_ecma_visit::{Visit, VisitWith};

use std::fs;
use std::path::Path;

use crate::error::{InjectorError, Result};
use crate::model::MatchedRoute;

/// ビューコンポーネントの import パスに付くエイリアス
pub const VIEWS_PREFIX: &str = "@/views/";

/// TypeScript 構文でモジュールとしてパースし、AST とファイル先頭の BytePos を返す。
/// span をファイル内のバイトオフセットに直すには `span.hi.0 - start_pos.0` とする。
pub(crate) fn parse_ts_module(
    src: &str,
    file_name: FileName,
    tsx: bool,
) -> std::result::Result<(Module, BytePos), String> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(file_name, src.to_string());

    let syntax = Syntax::Typescript(TsConfig {
        tsx,
        decorators: true,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: false,
    });

    let lexer = Lexer::new(
        syntax,
        Default::default(), // es version
        StringInput::from(&*fm),
        None,
    );

    let mut parser = SwcParser::new_from(lexer);
    let module = parser.parse_module().map_err(|e| format!("{:?}", e))?;

    Ok((module, fm.start_pos))
}

/// default export の中身
enum DefaultExport<'a> {
    /// `export default <expr>`
    Expr(&'a Expr),
    /// `export default function ...` / `export default class ...` など
    Declaration,
}

fn find_default_export(module: &Module) -> Option<DefaultExport<'_>> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(ExportDefaultExpr { expr, .. })) => {
            Some(DefaultExport::Expr(&**expr))
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(_)) => {
            Some(DefaultExport::Declaration)
        }
        _ => None,
    })
}

/// 配列リテラル、または `[...] as Type` / `[...] as const` から配列を取り出す
fn as_array_literal(expr: &Expr) -> Option<&ArrayLit> {
    match expr {
        Expr::Array(arr_lit) => Some(arr_lit),
        Expr::TsAs(TsAsExpr { expr, .. }) | Expr::TsConstAssertion(TsConstAssertion { expr, .. }) => {
            match &**expr {
                Expr::Array(arr_lit) => Some(arr_lit),
                _ => None,
            }
        }
        _ => None,
    }
}

/// トップレベルの変数宣言 (`export const` を含む) から初期化式を探す
fn find_var_initializer<'a>(module: &'a Module, name: &str) -> Option<&'a Expr> {
    module.body.iter().find_map(|item| {
        let var_decl = match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var_decl))) => var_decl,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Var(var_decl),
                ..
            })) => var_decl,
            _ => return None,
        };
        var_decl.decls.iter().find_map(|declarator| match &declarator.name {
            Pat::Ident(BindingIdent { id, .. }) if &*id.sym == name => declarator.init.as_deref(),
            _ => None,
        })
    })
}

/// export された式を配列リテラルまで解決する。
/// 1) 配列リテラルそのもの 2) 型アサーション付き配列 3) 変数参照 → その初期化式 の順に試す。
fn resolve_route_array<'a>(module: &'a Module, exported: &'a Expr) -> Option<&'a ArrayLit> {
    if let Some(arr_lit) = as_array_literal(exported) {
        return Some(arr_lit);
    }
    if let Expr::Ident(ident) = exported {
        tracing::debug!("変数参照を解決: {}", ident.sym);
        let init = find_var_initializer(module, &ident.sym)?;
        return as_array_literal(init);
    }
    None
}

/// オブジェクトリテラルから `key` に対応するプロパティ値を探す
fn find_property<'a>(obj_lit: &'a ObjectLit, key: &str) -> Option<&'a Expr> {
    obj_lit.props.iter().find_map(|prop| {
        let PropOrSpread::Prop(boxed_prop) = prop else {
            return None;
        };
        let Prop::KeyValue(KeyValueProp { key: prop_key, value }) = &**boxed_prop else {
            return None;
        };
        let matches = match prop_key {
            PropName::Ident(ident) => &*ident.sym == key,
            PropName::Str(s) => &*s.value == key,
            _ => false,
        };
        matches.then_some(&**value)
    })
}

/// 最初に現れる文字列リテラルを記録する Visitor
#[derive(Default)]
struct FirstStringFinder {
    value: Option<String>,
}

impl Visit for FirstStringFinder {
    fn visit_str(&mut self, s: &Str) {
        if self.value.is_none() {
            self.value = Some(s.value.to_string());
        }
    }
}

/// 最初に現れる `import(...)` 呼び出しの第 1 引数を記録する Visitor。
/// 外側の Option は呼び出しが見つかったか、内側は引数が文字列リテラルだったか。
#[derive(Default)]
struct ImportCallFinder {
    first_arg: Option<Option<String>>,
}

impl Visit for ImportCallFinder {
    fn visit_call_expr(&mut self, call: &CallExpr) {
        if self.first_arg.is_some() {
            return;
        }
        if let Callee::Import(_) = call.callee {
            let arg = call.args.first().and_then(|arg| match (&arg.spread, &*arg.expr) {
                (None, Expr::Lit(Lit::Str(Str { value, .. }))) => Some(value.to_string()),
                _ => None,
            });
            self.first_arg = Some(arg);
            return;
        }
        call.visit_children_with(self);
    }
}

/// `component: () => import("...")` から import パスを取り出す
fn dynamic_import_path(component: &Expr) -> Option<String> {
    let Expr::Arrow(arrow) = component else {
        return None;
    };
    if !arrow.params.is_empty() {
        return None;
    }

    let mut finder = ImportCallFinder::default();
    arrow.body.visit_with(&mut finder);
    finder.first_arg.flatten()
}

/// ルートオブジェクト (`{ name: "...", component: () => import("@/views/...") }`) を
/// MatchedRoute に変換する。条件を満たさなければ None (黙ってスキップ)。
fn match_route_object(obj_lit: &ObjectLit) -> Option<MatchedRoute> {
    let name_value = find_property(obj_lit, "name")?;
    let component_value = find_property(obj_lit, "component")?;

    let mut name_finder = FirstStringFinder::default();
    name_value.visit_with(&mut name_finder);
    let name = name_finder.value?;

    let import_path = dynamic_import_path(component_value)?;
    let relative_path = import_path.strip_prefix(VIEWS_PREFIX)?;
    if relative_path.is_empty() {
        return None;
    }

    Some(MatchedRoute {
        name,
        relative_path: relative_path.to_string(),
    })
}

/// 配列の要素を順に見て、条件を満たすルートだけを取り出す
fn extract_routes_from_array(arr_lit: &ArrayLit) -> Vec<MatchedRoute> {
    tracing::debug!("ルート配列発見: {} 要素", arr_lit.elems.len());

    arr_lit
        .elems
        .iter()
        .enumerate()
        .filter_map(|(i, elem)| {
            let expr_or_spread = elem.as_ref()?;
            if expr_or_spread.spread.is_some() {
                return None;
            }
            let Expr::Object(obj_lit) = &*expr_or_spread.expr else {
                tracing::debug!("要素 {} はオブジェクトリテラルではないためスキップ", i);
                return None;
            };
            let matched = match_route_object(obj_lit);
            if matched.is_none() {
                tracing::debug!("要素 {} は条件を満たさないためスキップ", i);
            }
            matched
        })
        .collect()
}

/// ソース文字列からルート情報を抽出する。`path` はエラー表示と構文の判定にのみ使う。
pub fn extract_routes(src: &str, path: &Path) -> Result<Vec<MatchedRoute>> {
    let tsx = path
        .extension()
        .is_some_and(|ext| ext == "tsx" || ext == "jsx");

    let (module, _) = parse_ts_module(src, FileName::Real(path.to_path_buf()), tsx).map_err(
        |message| InjectorError::Parse {
            path: path.to_path_buf(),
            message,
        },
    )?;

    let exported = match find_default_export(&module) {
        Some(DefaultExport::Expr(expr)) => expr,
        Some(DefaultExport::Declaration) => {
            return Err(InjectorError::UnresolvableExport(path.to_path_buf()));
        }
        None => return Err(InjectorError::MissingDefaultExport(path.to_path_buf())),
    };

    let arr_lit = resolve_route_array(&module, exported)
        .ok_or_else(|| InjectorError::UnresolvableExport(path.to_path_buf()))?;

    Ok(extract_routes_from_array(arr_lit))
}

/// ルート定義ファイルを読み込んでルート情報を抽出する
pub fn parse_routes_in_file(file_path: &Path) -> Result<Vec<MatchedRoute>> {
    tracing::debug!("ファイル解析開始: {:?}", file_path);

    let src = fs::read_to_string(file_path).map_err(|e| InjectorError::io(file_path, e))?;
    let routes = extract_routes(&src, file_path)?;

    tracing::debug!("発見されたルート数: {}", routes.len());
    Ok(routes)
}
