//! Static bearer token check for the bookmarks routes.
//!
//! `Authorization: Bearer <token>` を取り出し、設定された API_TOKEN と比較する。
//! 不一致・欠落は 401 `{"error":"Unauthorized request"}` で打ち切り、handler には到達させない。
//! どの部分で失敗したか (ヘッダ無し / scheme 違い / token 違い) はクライアントに返さない。
//!
//! 外側の Router に掛けて path の prefix で判定する。nest した Router に掛けると
//! `/bookmarks/` のように nest 側でマッチしないパスが素通りになるため。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone)]
struct Guard {
    api_token: Arc<str>,
    prefix: &'static str,
}

impl Guard {
    /// `prefix` 自身と `prefix/` 以下の全パス (`/bookmarksx` は対象外)
    fn covers(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// `prefix` 配下の全リクエストに認証を掛ける。
///
/// 存在確認 (404) より先に走るので、存在しない id や未定義パスへの要求も 401 になる。
/// fallback も対象にするため、Router の fallback を設定した後に呼ぶこと。
pub fn apply(
    router: Router<AppState>,
    state: &AppState,
    prefix: &'static str,
) -> Router<AppState> {
    let guard = Guard {
        api_token: state.api_token.clone(),
        prefix,
    };
    router.layer(middleware::from_fn_with_state(guard, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(guard): State<Guard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !guard.covers(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if token != Some(&*guard.api_token) {
        tracing::error!(
            method = %req.method(),
            path = %req.uri().path(),
            has_authorization = req.headers().contains_key(header::AUTHORIZATION),
            "Unauthorized request"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_prefix_and_everything_below_it() {
        let guard = Guard {
            api_token: Arc::from("secret"),
            prefix: "/bookmarks",
        };
        for path in ["/bookmarks", "/bookmarks/", "/bookmarks/1", "/bookmarks/1/x"] {
            assert!(guard.covers(path), "{path}");
        }
        for path in ["/health", "/bookmarksx", "/", "/api/bookmarks"] {
            assert!(!guard.covers(path), "{path}");
        }
    }
}
