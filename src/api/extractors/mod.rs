/**
 * Responsibility
 *  - handler に公開する extractor の束ね
 */
mod bookmark_id;

pub use bookmark_id::BookmarkId;
