#[cfg(feature = "http")]
mod http;
mod memory;

#[cfg(feature = "http")]
pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::models::{Document, DocumentDraft};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("request timed out")]
    Timeout,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Existence check by slug, the only store access the slug engine needs.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn exists(&self, slug: &str) -> StoreResult<bool>;
}

/// Read/write access to current-state documents.
#[async_trait]
pub trait DocumentStore: SlugLookup {
    async fn fetch(&self, slug: &str) -> StoreResult<Option<Document>>;

    /// Current-state documents of a feed, newest first.
    async fn list(&self, feed: &str) -> StoreResult<Vec<Document>>;

    async fn create(&self, draft: &DocumentDraft) -> StoreResult<Document>;

    async fn update(&self, slug: &str, draft: &DocumentDraft) -> StoreResult<Document>;

    async fn delete(&self, slug: &str) -> StoreResult<()>;
}
