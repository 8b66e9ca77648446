use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, base_url: Option<String>) -> Result<()> {
    let base_url = base_url.unwrap_or_else(|| "http://localhost:3000".to_string());

    let config = format!(
        r#"[api]
base_url = "{}"
timeout_secs = 10

[feed]
name = "blog"
language = "en"

[slug]
prefix = "/blog"
max_auto_attempts = 100
lookup_timeout_ms = 5000
"#,
        base_url
    );
    crate::Config::parse(&config)?;

    std::fs::create_dir_all(&path)?;
    let target = path.join("vix.toml");
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }

    std::fs::write(&target, config)?;

    tracing::info!("Created {}", target.display());
    tracing::info!("Run 'vix doc list' to see the documents of the feed");

    Ok(())
}
