/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - backend の詳細 (接続断 / 制約違反) は Db にまとめ、handler 側では 500 として扱う
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
