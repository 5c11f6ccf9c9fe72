/*
 * Responsibility
 * - bookmarks テーブルの行型と、storage backend が満たす契約 (trait)
 * - 不在は Ok(None) / 0 件で表し、Err は backend 障害のみ
 */
use async_trait::async_trait;

use crate::repos::error::RepoResult;

/// bookmarks テーブルの 1 行。保存時の値そのまま (sanitize はレスポンス化の時点で行う)
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookmarkRow {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i16,
}

/// 部分更新。None のフィールドは既存値を維持する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i16>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }

    pub(crate) fn apply(self, row: &mut BookmarkRow) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(url) = self.url {
            row.url = url;
        }
        if let Some(description) = self.description {
            row.description = Some(description);
        }
        if let Some(rating) = self.rating {
            row.rating = rating;
        }
    }
}

#[async_trait]
pub trait BookmarkRepo: Send + Sync + 'static {
    /// 全件。id (挿入順) の昇順
    async fn list(&self) -> RepoResult<Vec<BookmarkRow>>;

    async fn get(&self, id: i64) -> RepoResult<Option<BookmarkRow>>;

    /// id は backend が採番する
    async fn insert(&self, new: NewBookmark) -> RepoResult<BookmarkRow>;

    /// 影響を受けた行数を返す (存在しなければ 0)
    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepoResult<u64>;

    /// 影響を受けた行数を返す (存在しなければ 0)
    async fn delete(&self, id: i64) -> RepoResult<u64>;
}
