/*
 * Responsibility
 * - Path の {id} を String として受け、内部 ID (i64) に変換する
 * - 整数として読めない id は「存在しない bookmark」と同じ扱い (404)
 *
 * 認証 middleware の後で走るので、ここでの 404 が 401 より先に返ることはない
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkId(pub i64);

impl<S> FromRequestParts<S> for BookmarkId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Bookmark"))?;

        raw.parse::<i64>().map(BookmarkId).map_err(|_| {
            tracing::error!("Bookmark with id {raw} not found.");
            AppError::not_found("Bookmark")
        })
    }
}
