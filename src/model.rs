// src/model.rs

/// ルート定義から抽出した、名前とコンポーネントの相対パスの組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// ルート名 (例: "UserList")
    pub name: String,

    /// `@/views/` を取り除いた import パス (例: "user/list.vue")
    /// 空文字になることはない
    pub relative_path: String,
}

/// 1 ルート分のパッチ処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// 除外ディレクトリに含まれていたためスキップ
    Excluded,
    /// 対象ファイルが存在しなかったためスキップ
    Missing,
    /// 既存の <script> を書き換えた
    Updated,
    /// <script> が無かったため新しく作成した
    Created,
}

/// 実行全体の集計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub matched: usize,
    pub updated: usize,
    pub created: usize,
    pub excluded: usize,
    pub missing: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: PatchOutcome) {
        match outcome {
            PatchOutcome::Excluded => self.excluded += 1,
            PatchOutcome::Missing => self.missing += 1,
            PatchOutcome::Updated => self.updated += 1,
            PatchOutcome::Created => self.created += 1,
        }
    }
}
