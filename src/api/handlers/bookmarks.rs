/*
 * Responsibility
 * - /bookmarks 系 CRUD handler
 * - Path は BookmarkId extractor、Json は DTO の validate() を通してから repo を呼ぶ
 * - validation / not found はここで AppError に変換、storage 障害は From<RepoError> で 500 へ
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header},
};

use crate::{
    api::{
        dto::bookmarks::{
            BookmarkResponse, CreateBookmarkRequest, NO_UPDATABLE_FIELDS, UpdateBookmarkRequest,
        },
        extractors::BookmarkId,
    },
    error::AppError,
    state::AppState,
};

const RESOURCE: &str = "Bookmark";

fn not_found(id: i64) -> AppError {
    tracing::error!("Bookmark with id {id} not found.");
    AppError::not_found(RESOURCE)
}

pub async fn list_bookmarks(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookmarkResponse>>, AppError> {
    let rows = state.bookmarks.list().await?;
    let res = rows.into_iter().map(BookmarkResponse::from).collect();

    Ok(Json(res))
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    BookmarkId(id): BookmarkId,
) -> Result<Json<BookmarkResponse>, AppError> {
    let row = state
        .bookmarks
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(row.into()))
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<BookmarkResponse>), AppError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::error!(error = %rejection, "invalid bookmark payload");
        AppError::bad_request(rejection.body_text())
    })?;

    let new = req.validate().map_err(|message| {
        tracing::error!("{message}");
        AppError::bad_request(message)
    })?;

    let row = state.bookmarks.insert(new).await?;
    tracing::info!("Bookmark with id {} created.", row.id);

    let location = format!("/bookmarks/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(row.into()),
    ))
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    BookmarkId(id): BookmarkId,
    payload: Result<Json<UpdateBookmarkRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    // 存在確認が body の検査より先 (存在しない id には常に 404)
    if state.bookmarks.get(id).await?.is_none() {
        return Err(not_found(id));
    }

    let req = match payload {
        Ok(Json(req)) => req,
        // body 無し (Content-Type 無し) は「更新フィールド無し」と同じ扱い
        Err(JsonRejection::MissingJsonContentType(_)) => {
            tracing::error!("{NO_UPDATABLE_FIELDS}");
            return Err(AppError::bad_request(NO_UPDATABLE_FIELDS));
        }
        Err(rejection) => {
            tracing::error!(error = %rejection, "invalid bookmark payload");
            return Err(AppError::bad_request(rejection.body_text()));
        }
    };

    let patch = req.validate().map_err(|message| {
        tracing::error!("{message}");
        AppError::bad_request(message)
    })?;

    // get と update の間に削除された場合も 404
    if state.bookmarks.update(id, patch).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!("Bookmark with id {id} updated.");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    BookmarkId(id): BookmarkId,
) -> Result<StatusCode, AppError> {
    if state.bookmarks.delete(id).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!("Bookmark with id {id} deleted.");

    Ok(StatusCode::NO_CONTENT)
}
