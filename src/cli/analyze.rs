//! CLI entry-point for one-off sentiment analysis.

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::config::Settings;

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text to classify.
    #[arg(long)]
    pub text: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    ensure!(!args.text.is_empty(), "--text must not be empty");
    let pipelines = super::load_pipelines(settings).await?;
    let prediction = pipelines.sentiment.predict(&args.text)?;
    super::print_json(&prediction)
}
