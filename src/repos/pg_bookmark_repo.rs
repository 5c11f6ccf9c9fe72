/*
 * Responsibility
 * - bookmarks テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 * - DB エラーは RepoError に変換して返す (握りつぶさない)
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::bookmark_repo::{BookmarkPatch, BookmarkRepo, BookmarkRow, NewBookmark};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Clone, Debug)]
pub struct PgBookmarkRepo {
    pool: PgPool,
}

impl PgBookmarkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepo for PgBookmarkRepo {
    async fn list(&self) -> RepoResult<Vec<BookmarkRow>> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BookmarkRow>> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, new: NewBookmark) -> RepoResult<BookmarkRow> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, url, description, rating
            "#,
        )
        .bind(&new.title)
        .bind(&new.url)
        .bind(new.description.as_deref())
        .bind(new.rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepoResult<u64> {
        // None は COALESCE で既存値を維持
        let result = sqlx::query(
            r#"
            UPDATE bookmarks
            SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                description = COALESCE($4, description),
                rating = COALESCE($5, rating)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.url.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.rating)
        .execute(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
