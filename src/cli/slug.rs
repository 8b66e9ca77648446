use super::SlugCommand;
use crate::services::availability::{CheckMode, CheckOutcome, SlugAvailabilityChecker};
use crate::services::slug::{create_slug, increment_slug};
use crate::store::DocumentStore;
use crate::Config;
use anyhow::Result;
use std::sync::Arc;

pub async fn run(
    config: &Config,
    store: Arc<dyn DocumentStore>,
    command: SlugCommand,
) -> Result<()> {
    match command {
        SlugCommand::Create { title, resolve } => {
            let slug = create_slug(&config.slug.prefix, &title);
            if resolve {
                let checker = SlugAvailabilityChecker::new(store, config.slug.checker_settings());
                println!("{}", finish(checker.check(&slug, CheckMode::Auto).await)?);
            } else {
                println!("{}", slug);
            }
        }
        SlugCommand::Check { slug } => {
            let checker = SlugAvailabilityChecker::new(store, config.slug.checker_settings());
            let slug = finish(checker.check(&slug, CheckMode::Manual).await)?;
            println!("{} is available", slug);
        }
        SlugCommand::Increment { slug } => {
            println!("{}", increment_slug(&slug));
        }
    }

    Ok(())
}

fn finish(outcome: CheckOutcome) -> Result<String> {
    match outcome {
        CheckOutcome::Accepted(slug) => Ok(slug),
        CheckOutcome::Rejected(err) => Err(err.into()),
        CheckOutcome::Superseded => anyhow::bail!("slug check was superseded"),
    }
}
