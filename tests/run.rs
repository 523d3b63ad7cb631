//! 抽出からパッチまでを一時ディレクトリ上で通しで確認する。

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use route_name_injector::config::Settings;
use route_name_injector::model::RunSummary;
use route_name_injector::reporter::{MemoryReporter, Severity};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project(routes: &str) -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    let route_file = dir.path().join("src/router/routes.ts");
    write(&route_file, routes);
    let settings = Settings {
        route_file,
        views_dir: dir.path().join("src/views"),
        exclude_dirs: Vec::new(),
    };
    (dir, settings)
}

const USER_LIST_ROUTES: &str = r#"
export default [
  { name: "UserList", component: () => import("@/views/user/list.vue") },
  { name: "Bad", meta: {} },
];
"#;

#[test]
fn injects_name_after_imports_and_is_idempotent() {
    let (_dir, settings) = project(USER_LIST_ROUTES);
    let target = settings.views_dir.join("user/list.vue");
    write(&target, "<script>\nimport {ref} from 'x';\n</script>");

    let mut reporter = MemoryReporter::new();
    let summary = route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            matched: 1,
            updated: 1,
            ..Default::default()
        }
    );

    let expected = "<script>\nimport {ref} from 'x';\ndefineOptions({ name: \"UserList\" });\n</script>";
    assert_eq!(fs::read_to_string(&target).unwrap(), expected);

    route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), expected);
    assert!(reporter.messages(Severity::Error).is_empty());
}

#[test]
fn creates_script_block_and_keeps_template() {
    let (_dir, settings) = project(
        r#"
const routes = [
  { name: "About", component: () => import("@/views/about") },
] as RouteRecordRaw[];
export default routes;
"#,
    );
    let template = "<template>\n  <h1>About</h1>\n</template>\n";
    let target = settings.views_dir.join("about.vue");
    write(&target, template);

    let mut reporter = MemoryReporter::new();
    let summary = route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        format!("<script setup>\ndefineOptions({{ name: \"About\" }});\n</script>\n{template}")
    );
}

#[test]
fn excluded_and_missing_routes_do_not_stop_the_batch() {
    let (_dir, mut settings) = project(
        r#"
export default [
  { name: "AdminError", component: () => import("@/views/admin/error/index.vue") },
  { name: "Gone", component: () => import("@/views/gone.vue") },
  { name: "ErrorLogs", component: () => import("@/views/errorLogs/404.vue") },
];
"#,
    );
    settings.exclude_dirs = vec!["error".to_string()];

    let excluded = settings.views_dir.join("admin/error/index.vue");
    let processed = settings.views_dir.join("errorLogs/404.vue");
    let untouched = "<template><p>error</p></template>\n";
    write(&excluded, untouched);
    write(&processed, "<script setup>\n</script>\n");

    let mut reporter = MemoryReporter::new();
    let summary = route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            matched: 3,
            updated: 1,
            created: 0,
            excluded: 1,
            missing: 1,
        }
    );

    assert_eq!(fs::read_to_string(&excluded).unwrap(), untouched);
    assert!(!settings.views_dir.join("gone.vue").exists());
    assert_eq!(
        fs::read_to_string(&processed).unwrap(),
        "<script setup>\ndefineOptions({ name: \"ErrorLogs\" });\n</script>\n"
    );

    let warns = reporter.messages(Severity::Warn);
    assert_eq!(warns.len(), 1);
    assert!(warns[0].contains("Gone"));
    assert!(
        reporter
            .messages(Severity::Info)
            .iter()
            .any(|m| m.contains("AdminError"))
    );
}

#[test]
fn structural_error_is_reported_and_touches_nothing() {
    let (_dir, settings) = project(
        r#"export const routes = [{ name: "A", component: () => import("@/views/a.vue") }];"#,
    );
    let target = settings.views_dir.join("a.vue");
    write(&target, "<template/>");

    let mut reporter = MemoryReporter::new();
    let summary = route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(summary, RunSummary::default());
    assert_eq!(reporter.messages(Severity::Error).len(), 1);
    assert_eq!(fs::read_to_string(&target).unwrap(), "<template/>");
}

#[test]
fn no_matching_routes_is_a_warning() {
    let (_dir, settings) = project(r#"export default [{ path: "/", redirect: "/home" }];"#);

    let mut reporter = MemoryReporter::new();
    let summary = route_name_injector::run(&settings, &mut reporter).unwrap();
    assert_eq!(summary, RunSummary::default());
    assert_eq!(reporter.messages(Severity::Warn).len(), 1);
    assert!(reporter.messages(Severity::Error).is_empty());
}

#[test]
fn unreadable_route_file_is_an_error() {
    let (dir, mut settings) = project("export default [];");
    settings.route_file = dir.path().join("missing.ts");

    let mut reporter = MemoryReporter::new();
    assert!(route_name_injector::run(&settings, &mut reporter).is_err());
}
