use super::DocCommand;
use crate::models::{admin_path, Document};
use crate::services::documents;
use crate::services::editor::{EditSession, SaveError};
use crate::store::DocumentStore;
use crate::Config;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    config: &Config,
    store: Arc<dyn DocumentStore>,
    command: DocCommand,
) -> Result<()> {
    match command {
        DocCommand::List { feed } => {
            let feed = feed.unwrap_or_else(|| config.feed.name.clone());
            let docs = documents::list_documents(store.as_ref(), &feed)
                .await
                .map_err(|notice| anyhow::anyhow!(notice.message))?;

            println!("{:<40} {:<30} {:<6}", "SLUG", "TITLE", "DRAFT");
            println!("{}", "-".repeat(78));
            for doc in docs {
                println!(
                    "{:<40} {:<30} {:<6}",
                    doc.slug,
                    doc.title,
                    if doc.draft { "yes" } else { "" }
                );
            }
        }
        DocCommand::Show { slug } => {
            let doc = documents::open_document(store.as_ref(), &slug)
                .await
                .map_err(|notice| anyhow::anyhow!(notice.message))?;
            print_document(&doc, &config.feed.name);
        }
        DocCommand::New {
            title,
            slug,
            content_file,
            draft,
        } => {
            let mut session = EditSession::new_document(store, &config.slug.editor_settings());
            if slug.is_some() {
                session.set_custom_slug(true).await;
            }
            session.set_title(&title).await;
            if let Some(slug) = slug {
                session.edit_slug(&slug).await;
            }
            if let Some(path) = content_file {
                session.set_content(read_content(&path)?);
            }
            session.set_draft(draft);

            let doc = save(&mut session).await?;
            print_document(&doc, &config.feed.name);
        }
        DocCommand::Edit {
            slug,
            title,
            content_file,
            draft,
            publish,
        } => {
            let doc = documents::open_document(store.as_ref(), &slug)
                .await
                .map_err(|notice| anyhow::anyhow!(notice.message))?;
            let mut session = EditSession::existing(store, &config.slug.editor_settings(), doc);
            if let Some(title) = title {
                session.set_title(&title).await;
            }
            if let Some(path) = content_file {
                session.set_content(read_content(&path)?);
            }
            if draft {
                session.set_draft(true);
            } else if publish {
                session.set_draft(false);
            }

            let doc = save(&mut session).await?;
            print_document(&doc, &config.feed.name);
        }
        DocCommand::Delete { slug } => {
            let notice = documents::delete_document(store.as_ref(), &slug)
                .await
                .map_err(|notice| anyhow::anyhow!(notice.message))?;
            println!("{}", notice);
        }
    }

    Ok(())
}

async fn save(session: &mut EditSession) -> Result<Document> {
    let result = session.save().await;
    if let Some(notice) = session.status().current() {
        println!("{}", notice);
    }
    result.map_err(|e| match e {
        SaveError::Slug(err) => anyhow::anyhow!("{}", err),
        SaveError::Store(err) => anyhow::anyhow!("Could not save document: {}", err),
    })
}

fn read_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Could not read content file {}", path.display()))
}

fn print_document(doc: &Document, feed: &str) {
    println!("slug:      {}", doc.slug);
    println!("title:     {}", doc.title);
    println!("draft:     {}", doc.draft);
    if let Some(published) = doc.published {
        println!("published: {}", published.to_rfc3339());
    }
    println!("edit:      {}", admin_path(feed, &doc.slug));
    if !doc.content.is_empty() {
        println!();
        println!("{}", doc.content);
    }
}
