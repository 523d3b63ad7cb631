use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InjectorError, Result};
use crate::resolver::absolutize;

/// `--views-dir` も設定ファイルも指定されなかったときのビューディレクトリ
pub const DEFAULT_VIEWS_DIR: &str = "./src/views";

/// CLI 引数定義
#[derive(Parser, Debug, Default)]
#[command(
    name = "route-name-injector",
    version,
    about = "ルート定義ファイルを解析し、各ビューコンポーネントに defineOptions({ name }) を書き込む CLI ツール"
)]
pub struct Cli {
    /// ルート定義ファイル (default export がルート配列であること)
    /// 例: `--route-file src/router/routes.ts`
    #[arg(short = 'r', long = "route-file", value_name = "FILE")]
    pub route_file: PathBuf,

    /// ビューコンポーネントのルートディレクトリ (`@/views/` に対応) [既定: ./src/views]
    #[arg(short = 'd', long = "views-dir", value_name = "DIR")]
    pub views_dir: Option<PathBuf>,

    /// 処理対象から外すディレクトリ名 (複数指定またはカンマ区切り)
    #[arg(short = 'e', long = "exclude", value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// JSON 設定ファイル (`viewsDir`, `exclude`)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// JSON 設定ファイルの中身
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    pub views_dir: Option<PathBuf>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| InjectorError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| InjectorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// 実行に必要な設定 (パスはすべて絶対パス)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub route_file: PathBuf,
    pub views_dir: PathBuf,
    pub exclude_dirs: Vec<String>,
}

impl Settings {
    /// CLI > 設定ファイル > 既定値 の順に値を決める
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => FileConfig::load(&absolutize(path)?)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file_config)
    }

    fn merge(cli: Cli, file_config: FileConfig) -> Result<Self> {
        let views_dir = cli
            .views_dir
            .or(file_config.views_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VIEWS_DIR));

        let exclude_dirs = if cli.exclude.is_empty() {
            file_config.exclude
        } else {
            cli.exclude
        };
        let exclude_dirs = exclude_dirs
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Settings {
            route_file: absolutize(&cli.route_file)?,
            views_dir: absolutize(&views_dir)?,
            exclude_dirs,
        })
    }
}
