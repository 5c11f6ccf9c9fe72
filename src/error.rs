/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / body)
 * - RepoError / validation error / auth error を統一的に変換
 *
 * body の形はエラー種別ごとに異なる (既存クライアントとの互換のため)
 * - 400: text/plain でメッセージのみ
 * - 401: {"error":"Unauthorized request"}
 * - 404: {"error":{"message":"Bookmark Not Found"}}
 * - 500: {"error":{"message":"server error"}} (内部詳細は出さない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("{resource} Not Found")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized request" })),
            )
                .into_response(),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": { "message": format!("{resource} Not Found") } })),
            )
                .into_response(),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "message": "server error" } })),
            )
                .into_response(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // 詳細はサーバーログにだけ残す
        tracing::error!(error = ?e, "storage failure");
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}
