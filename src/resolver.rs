use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::error::{InjectorError, Result};

/// ビューコンポーネントの拡張子
pub const COMPONENT_EXTENSION: &str = ".vue";

/// `relative_path` のいずれかのセグメントが除外ディレクトリ名と完全一致すれば、
/// そのディレクトリ名を返す。部分一致 (`errorLogs` と `error`) は対象外。
pub fn excluded_segment<'a>(relative_path: &str, exclude_dirs: &'a [String]) -> Option<&'a str> {
    relative_path
        .split(['/', '\\'])
        .find_map(|segment| exclude_dirs.iter().find(|dir| dir.as_str() == segment))
        .map(String::as_str)
}

/// `views_dir` と import パスの残り部分から、実際のコンポーネントファイルのパスを組み立てる。
///
/// 例: `views_dir = /proj/src/views`, `relative_path = "user/list"`
///   → `/proj/src/views/user/list.vue`
pub fn resolve_component_path(views_dir: &Path, relative_path: &str) -> PathBuf {
    if relative_path.ends_with(COMPONENT_EXTENSION) {
        views_dir.join(relative_path)
    } else {
        views_dir.join(format!("{relative_path}{COMPONENT_EXTENSION}"))
    }
}

/// カレントディレクトリを基準にパスを絶対パス化する
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.to_path_buf())
        .map_err(|e| InjectorError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exclusion_matches_whole_segments_only() {
        let exclude = dirs(&["error"]);
        assert_eq!(excluded_segment("error/404", &exclude), Some("error"));
        assert_eq!(excluded_segment("admin/error/index", &exclude), Some("error"));
        assert_eq!(excluded_segment("admin\\error\\index.vue", &exclude), Some("error"));
        assert_eq!(excluded_segment("errorLogs/404", &exclude), None);
        assert_eq!(excluded_segment("user/error.vue", &exclude), None);
    }

    #[test]
    fn empty_exclude_set_never_matches() {
        assert_eq!(excluded_segment("error/404", &[]), None);
    }

    #[test]
    fn appends_extension_only_when_missing() {
        let views = Path::new("/proj/src/views");
        assert_eq!(
            resolve_component_path(views, "user/list"),
            PathBuf::from("/proj/src/views/user/list.vue")
        );
        assert_eq!(
            resolve_component_path(views, "user/list.vue"),
            PathBuf::from("/proj/src/views/user/list.vue")
        );
    }

    #[test]
    fn absolutize_resolves_against_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            absolutize(Path::new("./src/views")).unwrap(),
            cwd.join("src").join("views")
        );
    }
}
