use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document. The slug doubles as the document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default = "default_feed")]
    pub feed: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// The payload the edit form saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub draft: bool,
}

fn default_feed() -> String {
    "blog".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// JSON API path for a document. Documents that have not been saved yet are
/// posted to the feed's `new` endpoint.
pub fn document_path(id: Option<&str>) -> String {
    match id {
        None => "/json/blog/new".to_string(),
        Some(id) if id.starts_with('/') => format!("/json/document{}", id),
        Some(id) => format!("/json/document/{}", id),
    }
}

/// Admin route that opens a document in the editor.
pub fn admin_path(feed: &str, slug: &str) -> String {
    if slug.starts_with('/') {
        format!("/admin/{}/edit{}", feed, slug)
    } else {
        format!("/admin/{}/edit/{}", feed, slug)
    }
}

/// Location fragment shown after a successful save.
pub fn edit_fragment(slug: &str) -> String {
    format!("#edit{}", slug)
}
