use crate::services::editor::{EditSession, EditorSettings};
use crate::services::slug::try_create_slug_from_value;
use crate::store::DocumentStore;
use crate::Config;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ImportEntry {
    #[serde(default)]
    pub title: serde_json::Value,
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<ImportEntry>),
    One(ImportEntry),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<String>,
    pub skipped: usize,
}

/// Accepts either a single entry object or an array of entries.
pub fn parse_entries(raw: &str) -> Result<Vec<ImportEntry>> {
    let file: ImportFile = serde_json::from_str(raw).context("Invalid import file")?;
    Ok(match file {
        ImportFile::Many(entries) => entries,
        ImportFile::One(entry) => vec![entry],
    })
}

/// Saves each entry through an edit session, so slugs are derived, validated
/// and checked exactly as in the form. Entries without a string title are
/// skipped.
pub async fn import_entries(
    store: Arc<dyn DocumentStore>,
    settings: &EditorSettings,
    entries: Vec<ImportEntry>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for entry in entries {
        if let Err(e) = try_create_slug_from_value(&settings.slug_prefix, &entry.title) {
            tracing::warn!("Skipping entry with title {}: {}", entry.title, e);
            summary.skipped += 1;
            continue;
        }
        let title = entry.title.as_str().unwrap_or_default();

        let mut session = EditSession::new_document(store.clone(), settings);
        if let Some(slug) = &entry.slug {
            session.set_custom_slug(true).await;
            session.set_title(title).await;
            session.edit_slug(slug).await;
        } else {
            session.set_title(title).await;
        }
        session.set_content(entry.content);
        session.set_draft(entry.draft);

        match session.save().await {
            Ok(doc) => {
                tracing::info!("Imported {}", doc.slug);
                summary.imported.push(doc.slug);
            }
            Err(e) => {
                tracing::warn!("Skipping '{}': {}", title, e);
                summary.skipped += 1;
            }
        }
    }

    summary
}

pub async fn run(config: &Config, store: Arc<dyn DocumentStore>, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read import file {}", file.display()))?;
    let entries = parse_entries(&raw)?;

    let summary = import_entries(store, &config.slug.editor_settings(), entries).await;

    tracing::info!(
        "Import complete: {} imported, {} skipped",
        summary.imported.len(),
        summary.skipped
    );
    Ok(())
}
