pub mod doc;
pub mod import;
pub mod init;
pub mod slug;

use crate::store::{DocumentStore, MemoryStore};
use crate::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "vix")]
#[command(version)]
#[command(about = "Admin client for the Vix document CMS", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "vix.toml", env = "VIX_CONFIG")]
    pub config: PathBuf,

    /// Work against an empty in-memory store instead of the JSON API
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        base_url: Option<String>,
    },
    Slug {
        #[command(subcommand)]
        command: SlugCommand,
    },
    Doc {
        #[command(subcommand)]
        command: DocCommand,
    },
    /// Create documents from a JSON file holding one object or an array
    Import {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum SlugCommand {
    Create {
        title: String,
        /// Bump the suffix until the slug is free in the store
        #[arg(long)]
        resolve: bool,
    },
    Check {
        slug: String,
    },
    Increment {
        slug: String,
    },
}

#[derive(Subcommand)]
pub enum DocCommand {
    List {
        #[arg(long)]
        feed: Option<String>,
    },
    Show {
        slug: String,
    },
    New {
        #[arg(long)]
        title: String,
        /// Use this slug instead of deriving one from the title
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        draft: bool,
    },
    Edit {
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long, conflicts_with = "publish")]
        draft: bool,
        #[arg(long)]
        publish: bool,
    },
    Delete {
        slug: String,
    },
}

/// Config from disk, or the defaults when running offline without one.
pub fn load_config(path: &Path, offline: bool) -> Result<Config> {
    if offline && !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
}

pub fn open_store(config: &Config, offline: bool) -> Result<Arc<dyn DocumentStore>> {
    if offline {
        return Ok(Arc::new(MemoryStore::new(
            &config.feed.name,
            &config.feed.language,
        )));
    }
    open_http_store(config)
}

#[cfg(feature = "http")]
fn open_http_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    let store = crate::store::HttpStore::new(&config.api.base_url, config.api.timeout())?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "http"))]
fn open_http_store(_config: &Config) -> Result<Arc<dyn DocumentStore>> {
    anyhow::bail!("Built without the `http` feature; use --offline")
}
