//! CLI entry-point for downloading model artefacts.

use anyhow::Result;
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use crate::{config::Settings, data::hub};

/// Args for the `fetch-models` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Hub revision (branch, tag or commit).
    #[arg(long, default_value = "main")]
    pub revision: String,
    /// Re-download files that already exist locally.
    #[arg(long)]
    pub force: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let model_ids: Vec<String> = settings
        .model_ids()
        .into_iter()
        .map(|(_, id)| id.to_string())
        .collect();

    let force = args.force;
    let concurrency = 3usize;
    let reports = stream::iter(model_ids)
        .map(|model_id| {
            let settings = settings.clone();
            let revision = args.revision.clone();
            async move {
                info!(%model_id, %revision, "fetching model");
                hub::fetch_model(&settings, &model_id, &revision, force).await
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for report in reports {
        println!(
            "{}: {} downloaded, {} already present -> {}",
            report.model_id,
            report.downloaded.len(),
            report.skipped.len(),
            report.dir.display()
        );
    }
    Ok(())
}
