/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - bookmarks: storage backend (Postgres / in-memory を trait object で注入)
 *   - api_token: Bearer 認証で比較する secret
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::fmt;
use std::sync::Arc;

use crate::repos::BookmarkRepo;

#[derive(Clone)]
pub struct AppState {
    pub bookmarks: Arc<dyn BookmarkRepo>,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(bookmarks: Arc<dyn BookmarkRepo>, api_token: impl Into<Arc<str>>) -> Self {
        Self {
            bookmarks,
            api_token: api_token.into(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // token はログに出さない
        f.debug_struct("AppState")
            .field("api_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
