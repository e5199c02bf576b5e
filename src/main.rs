//! Entry point wiring CLI dispatch to the API and pipelines.

use anyhow::Result;
use nlp_gateway::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let cli = Cli::parse();
    let settings = Settings::load()?;

    info!(?cli, backend = %settings.backend, "starting command");
    cli.dispatch(settings).await
}
