/*
 * Responsibility
 * - URL 構造を定義
 * - /bookmarks 配下は丸ごと Bearer 認証を掛ける (未定義パス・末尾スラッシュも含む)
 */
use axum::{Router, http::StatusCode, routing::get};

use crate::middleware::bearer_auth;
use crate::state::AppState;

use crate::api::handlers::{
    bookmarks::{create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, update_bookmark},
    health::health,
};

const BOOKMARKS_PREFIX: &str = "/bookmarks";

pub fn routes(state: AppState) -> Router<AppState> {
    let bookmarks = Router::new()
        .route("/", get(list_bookmarks).post(create_bookmark))
        .route(
            "/{id}",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        );

    let router = Router::new()
        .route("/health", get(health))
        .nest(BOOKMARKS_PREFIX, bookmarks)
        // layer より前に設定して、未定義パスにも認証が走るようにする
        .fallback(|| async { StatusCode::NOT_FOUND });

    bearer_auth::apply(router, &state, BOOKMARKS_PREFIX)
}
