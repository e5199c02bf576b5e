//! Error types shared by the inference pipelines.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading or running a pipeline.
#[derive(Debug, Error)]
pub enum NlpError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model files missing in {}: {detail}", path.display())]
    ModelFiles { path: PathBuf, detail: String },

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("backend `{0}` is not compiled in; rebuild with `--features onx`")]
    BackendUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NlpError>;
