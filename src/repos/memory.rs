//! Process-local bookmark storage.
//!
//! Development fallback used when `DATABASE_URL` is not configured, and the
//! fake behind the endpoint tests. Rows are kept in insertion order and ids
//! come from a monotonically increasing sequence, so they are never reused
//! after a delete. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::bookmark_repo::{BookmarkPatch, BookmarkRepo, BookmarkRow, NewBookmark};
use crate::repos::error::RepoResult;

#[derive(Debug)]
struct Table {
    rows: Vec<BookmarkRow>,
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryBookmarkRepo {
    table: RwLock<Table>,
}

impl Default for InMemoryBookmarkRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookmarkRepo {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Seeded with a couple of well-known sites so a fresh dev server has something to list.
    pub fn with_samples() -> Self {
        let samples = [
            ("NHL", "http://www.nhl.com", "Official site of the NHL", 5),
            (
                "Google",
                "https://www.google.com",
                "Where we find everything else",
                4,
            ),
        ];

        let rows = samples
            .into_iter()
            .zip(1..)
            .map(|((title, url, description, rating), id)| BookmarkRow {
                id,
                title: title.to_string(),
                url: url.to_string(),
                description: Some(description.to_string()),
                rating,
            })
            .collect::<Vec<_>>();

        let next_id = rows.len() as i64 + 1;
        Self {
            table: RwLock::new(Table { rows, next_id }),
        }
    }
}

#[async_trait]
impl BookmarkRepo for InMemoryBookmarkRepo {
    async fn list(&self) -> RepoResult<Vec<BookmarkRow>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BookmarkRow>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, new: NewBookmark) -> RepoResult<BookmarkRow> {
        let mut table = self.table.write().await;
        let row = BookmarkRow {
            id: table.next_id,
            title: new.title,
            url: new.url,
            description: new.description,
            rating: new.rating,
        };
        table.next_id += 1;
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepoResult<u64> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                patch.apply(row);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> RepoResult<u64> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok((before - table.rows.len()) as u64)
    }
}
