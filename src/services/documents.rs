use crate::models::{Document, Notice};
use crate::store::{DocumentStore, StoreError};

/// List a feed for the overview page.
pub async fn list_documents(
    store: &dyn DocumentStore,
    feed: &str,
) -> Result<Vec<Document>, Notice> {
    store.list(feed).await.map_err(|e| {
        tracing::error!("Loading feed {} failed: {}", feed, e);
        Notice::error("Error loading documents")
    })
}

/// Fetch a document to open it in the editor.
pub async fn open_document(store: &dyn DocumentStore, slug: &str) -> Result<Document, Notice> {
    match store.fetch(slug).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) | Err(StoreError::NotFound) => Err(Notice::error("Document not found.")),
        Err(e) => {
            tracing::error!("Fetching {} failed: {}", slug, e);
            Err(Notice::error("Document not found."))
        }
    }
}

pub async fn delete_document(store: &dyn DocumentStore, slug: &str) -> Result<Notice, Notice> {
    match store.delete(slug).await {
        Ok(()) => {
            tracing::info!("Deleted document {}", slug);
            Ok(Notice::info("Document deleted"))
        }
        Err(e) => {
            tracing::error!("Deleting {} failed: {}", slug, e);
            Err(Notice::error("Server error: couldn't delete document."))
        }
    }
}
