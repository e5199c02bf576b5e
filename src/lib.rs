//! nlp-gateway: sentiment, zero-shot classification and named-entity
//! recognition served over HTTP.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod ui;

pub use config::{Backend, Settings};
pub use error::{NlpError, Result};
pub use nlp::Pipelines;
