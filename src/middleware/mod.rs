/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - 各 module は `apply(router, ...)` を公開し、app.rs で順に適用する
 */
pub mod bearer_auth;
pub mod cors;
pub mod http;
pub mod security_headers;
