use crate::services::availability::CheckerSettings;
use crate::services::editor::EditorSettings;
use crate::services::slug::validate_slug;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub slug: SlugConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed")]
    pub name: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlugConfig {
    /// Path every derived slug starts with.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Lookups allowed while auto-resolving a collision chain.
    #[serde(default = "default_max_auto_attempts")]
    pub max_auto_attempts: usize,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            name: default_feed(),
            language: default_language(),
        }
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            max_auto_attempts: default_max_auto_attempts(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SlugConfig {
    pub fn checker_settings(&self) -> CheckerSettings {
        CheckerSettings {
            max_auto_attempts: self.max_auto_attempts,
            lookup_timeout: Duration::from_millis(self.lookup_timeout_ms),
        }
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            slug_prefix: self.prefix.clone(),
            checker: self.checker_settings(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_feed() -> String {
    "blog".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_prefix() -> String {
    "/blog".to_string()
}

fn default_max_auto_attempts() -> usize {
    100
}

fn default_lookup_timeout_ms() -> u64 {
    5000
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run 'vix init' to create one.",
                path.display(),
                e
            )
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = url::Url::parse(&self.api.base_url)
            .map_err(|e| anyhow::anyhow!("api.base_url is not a valid URL: {}", e))?;
        // API paths are absolute, so joining them drops any base path.
        if base_url.path() != "/" {
            anyhow::bail!(
                "api.base_url must be an origin without a path, got '{}'",
                self.api.base_url
            );
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than 0");
        }
        if self.feed.name.is_empty() {
            anyhow::bail!("feed.name must not be empty");
        }
        if !self.slug.prefix.starts_with('/') {
            anyhow::bail!("slug.prefix must start with '/'");
        }
        if let Err(e) = validate_slug(&self.slug.prefix) {
            anyhow::bail!("slug.prefix is not a valid slug: {}", e);
        }
        if self.slug.max_auto_attempts == 0 {
            anyhow::bail!("slug.max_auto_attempts must be greater than 0");
        }
        if self.slug.lookup_timeout_ms == 0 {
            anyhow::bail!("slug.lookup_timeout_ms must be greater than 0");
        }
        Ok(())
    }
}
