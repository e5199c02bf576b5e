//! CLI entry-point for named-entity extraction.

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::config::Settings;

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text to scan for people, places and organisations.
    #[arg(long)]
    pub text: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    ensure!(!args.text.is_empty(), "--text must not be empty");
    let pipelines = super::load_pipelines(settings).await?;
    let entities = pipelines.ner.extract(&args.text)?;
    info!(count = entities.len(), "extracted entities");
    super::print_json(&entities)
}
