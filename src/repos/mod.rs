/*
 * Responsibility
 * - storage backend の公開インターフェース (re-export)
 * - handler は BookmarkRepo trait だけを見る (Postgres / in-memory を差し替え可能にする)
 */
pub mod bookmark_repo;
pub mod error;
pub mod memory;
pub mod pg_bookmark_repo;

pub use bookmark_repo::{BookmarkPatch, BookmarkRepo, BookmarkRow, NewBookmark};
pub use memory::InMemoryBookmarkRepo;
pub use pg_bookmark_repo::PgBookmarkRepo;
