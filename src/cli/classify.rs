//! CLI entry-point for zero-shot classification.

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    nlp::zero_shot::{normalize_labels, ZeroShotRequest},
};

/// Args for the `classify` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text to classify.
    #[arg(long)]
    pub text: String,
    /// Comma separated candidate labels.
    #[arg(long, value_delimiter = ',', required = true)]
    pub labels: Vec<String>,
    /// Score labels independently.
    #[arg(long)]
    pub multi_label: bool,
    /// Hypothesis with a `{}` slot, overriding `HYPOTHESIS_TEMPLATE`.
    #[arg(long)]
    pub hypothesis_template: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let labels = normalize_labels(&args.labels);
    ensure!(
        !args.text.is_empty() && !labels.is_empty(),
        "--text and --labels must not be empty"
    );
    let template = args
        .hypothesis_template
        .unwrap_or_else(|| settings.hypothesis_template.clone());
    ensure!(template.contains("{}"), "hypothesis template must contain `{{}}`");

    let pipelines = super::load_pipelines(settings).await?;
    let output = pipelines.zero_shot.classify(&ZeroShotRequest {
        text: &args.text,
        labels: &labels,
        hypothesis_template: &template,
        multi_label: args.multi_label,
    })?;
    super::print_json(&output)
}
