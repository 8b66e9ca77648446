use super::{DocumentStore, SlugLookup, StoreError, StoreResult};
use crate::models::{Document, DocumentDraft};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Revision {
    document: Document,
    deleted: bool,
}

/// Process-local store keeping every revision of every document. Reads only
/// see the current, non-deleted revision.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    feed: String,
    language: String,
    revisions: Arc<RwLock<BTreeMap<String, Vec<Revision>>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("blog", "en")
    }
}

impl MemoryStore {
    pub fn new(feed: &str, language: &str) -> Self {
        Self {
            feed: feed.to_string(),
            language: language.to_string(),
            revisions: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Store a document as-is, e.g. to seed fixtures.
    pub async fn insert(&self, document: Document) {
        let mut revisions = self.revisions.write().await;
        revisions
            .entry(document.slug.clone())
            .or_default()
            .push(Revision {
                document,
                deleted: false,
            });
    }

    /// Number of revisions recorded for a slug, deletions included.
    pub async fn revision_count(&self, slug: &str) -> usize {
        self.revisions.read().await.get(slug).map_or(0, Vec::len)
    }

    fn current(history: &[Revision]) -> Option<&Document> {
        history
            .last()
            .filter(|revision| !revision.deleted)
            .map(|revision| &revision.document)
    }
}

#[async_trait]
impl SlugLookup for MemoryStore {
    async fn exists(&self, slug: &str) -> StoreResult<bool> {
        Ok(self.fetch(slug).await?.is_some())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(&self, slug: &str) -> StoreResult<Option<Document>> {
        let revisions = self.revisions.read().await;
        Ok(revisions
            .get(slug)
            .and_then(|history| Self::current(history))
            .cloned())
    }

    async fn list(&self, feed: &str) -> StoreResult<Vec<Document>> {
        let revisions = self.revisions.read().await;
        let mut documents: Vec<Document> = revisions
            .values()
            .filter_map(|history| Self::current(history))
            .filter(|doc| doc.feed == feed)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.published.cmp(&a.published));
        Ok(documents)
    }

    async fn create(&self, draft: &DocumentDraft) -> StoreResult<Document> {
        let mut revisions = self.revisions.write().await;
        let history = revisions.entry(draft.slug.clone()).or_default();
        if Self::current(history).is_some() {
            return Err(StoreError::Status(409));
        }

        let now = Utc::now();
        let document = Document {
            slug: draft.slug.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            draft: draft.draft,
            feed: self.feed.clone(),
            language: self.language.clone(),
            published: Some(now),
            updated: Some(now),
        };
        history.push(Revision {
            document: document.clone(),
            deleted: false,
        });
        tracing::debug!("Stored new document {}", document.slug);
        Ok(document)
    }

    async fn update(&self, slug: &str, draft: &DocumentDraft) -> StoreResult<Document> {
        let mut revisions = self.revisions.write().await;
        let history = revisions.get_mut(slug).ok_or(StoreError::NotFound)?;
        let current = Self::current(history).ok_or(StoreError::NotFound)?;

        let document = Document {
            slug: current.slug.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            draft: draft.draft,
            updated: Some(Utc::now()),
            ..current.clone()
        };
        history.push(Revision {
            document: document.clone(),
            deleted: false,
        });
        Ok(document)
    }

    async fn delete(&self, slug: &str) -> StoreResult<()> {
        let mut revisions = self.revisions.write().await;
        let history = revisions.get_mut(slug).ok_or(StoreError::NotFound)?;
        let current = Self::current(history).cloned().ok_or(StoreError::NotFound)?;
        history.push(Revision {
            document: current,
            deleted: true,
        });
        Ok(())
    }
}
