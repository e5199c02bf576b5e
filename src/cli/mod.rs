//! Command-line interface wiring for nlp-gateway.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{config::Settings, nlp::Pipelines};

pub mod analyze;
pub mod classify;
pub mod extract;
pub mod fetch;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Sentiment, zero-shot and NER inference over HTTP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Classify(args) => classify::run(args, settings).await,
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::FetchModels(args) => fetch::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Classify the sentiment of a text.
    Analyze(analyze::Args),
    /// Score a text against custom labels.
    Classify(classify::Args),
    /// Extract named entities from a text.
    Extract(extract::Args),
    /// Download ONNX model artefacts from the hub.
    FetchModels(fetch::Args),
}

/// Load pipelines on the blocking pool, as the server does.
async fn load_pipelines(settings: Settings) -> Result<Pipelines> {
    Ok(tokio::task::spawn_blocking(move || Pipelines::load(&settings)).await??)
}

/// Print a response exactly as the HTTP API would serialise it.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
