use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vix::cli::{load_config, open_store, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, base_url }) => {
            vix::cli::init::run(path, base_url).await?;
        }
        Some(Commands::Slug { command }) => {
            let config = load_config(&cli.config, cli.offline)?;
            let store = open_store(&config, cli.offline)?;
            vix::cli::slug::run(&config, store, command).await?;
        }
        Some(Commands::Doc { command }) => {
            let config = load_config(&cli.config, cli.offline)?;
            let store = open_store(&config, cli.offline)?;
            vix::cli::doc::run(&config, store, command).await?;
        }
        Some(Commands::Import { file }) => {
            let config = load_config(&cli.config, cli.offline)?;
            let store = open_store(&config, cli.offline)?;
            vix::cli::import::run(&config, store, &file).await?;
        }
        None => {
            // No subcommand provided, print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
