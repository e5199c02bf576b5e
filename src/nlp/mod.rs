//! Natural language processing pipelines served by the API.

pub mod labels;
pub mod math;
pub mod ner;
#[cfg(feature = "onx")]
pub mod onnx;
pub mod sentiment;
pub mod text;
pub mod zero_shot;

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::{
    config::{Backend, Settings},
    error::Result,
};

use ner::{DictionaryNer, Ner};
use sentiment::{LexiconSentiment, SentimentModel};
use zero_shot::{LexiconZeroShot, ZeroShotModel};

/// The three loaded pipelines, cheap to clone across request handlers.
#[derive(Clone)]
pub struct Pipelines {
    pub backend: Backend,
    pub sentiment: Arc<dyn SentimentModel>,
    pub zero_shot: Arc<dyn ZeroShotModel>,
    pub ner: Arc<dyn Ner>,
    /// Model identifier per task, for diagnostics.
    pub models: IndexMap<String, String>,
}

/// Build one task's pipeline, logging before and after.
fn load_task<T>(task: &str, model: &str, build: impl FnOnce() -> Result<T>) -> Result<T> {
    info!(model, "Loading {task} model...");
    let pipeline = build()?;
    info!("{task} model loaded.");
    Ok(pipeline)
}

fn lexicon_models() -> IndexMap<String, String> {
    ["sentiment", "zero-shot", "ner"]
        .into_iter()
        .map(|task| (task.to_string(), format!("lexicon-{task}")))
        .collect()
}

impl Pipelines {
    /// Dictionary-backed pipelines; never touches the filesystem.
    pub fn lexicon() -> Self {
        Self {
            backend: Backend::Lexicon,
            sentiment: Arc::new(LexiconSentiment),
            zero_shot: Arc::new(LexiconZeroShot),
            ner: Arc::new(DictionaryNer),
            models: lexicon_models(),
        }
    }

    /// Load every pipeline for the configured backend.
    pub fn load(settings: &Settings) -> Result<Self> {
        match settings.backend {
            Backend::Lexicon => Self::load_lexicon(),
            Backend::Onnx => Self::load_onnx(settings),
        }
    }

    fn load_lexicon() -> Result<Self> {
        let sentiment = load_task("sentiment", "lexicon-sentiment", || Ok(LexiconSentiment))?;
        let zero_shot = load_task("zero-shot", "lexicon-zero-shot", || Ok(LexiconZeroShot))?;
        let ner = load_task("NER", "lexicon-ner", || Ok(DictionaryNer))?;
        Ok(Self {
            backend: Backend::Lexicon,
            sentiment: Arc::new(sentiment),
            zero_shot: Arc::new(zero_shot),
            ner: Arc::new(ner),
            models: lexicon_models(),
        })
    }

    #[cfg(feature = "onx")]
    fn load_onnx(settings: &Settings) -> Result<Self> {
        let environment = onnx::environment()?;

        let sentiment = load_task("sentiment", &settings.sentiment_model, || {
            onnx::OnnxSentiment::load(&environment, &settings.model_dir(&settings.sentiment_model))
        })?;
        let zero_shot = load_task("zero-shot", &settings.zero_shot_model, || {
            onnx::OnnxZeroShot::load(&environment, &settings.model_dir(&settings.zero_shot_model))
        })?;
        let ner = load_task("NER", &settings.ner_model, || {
            onnx::OnnxNer::load(&environment, &settings.model_dir(&settings.ner_model))
        })?;

        let models = settings
            .model_ids()
            .into_iter()
            .map(|(task, id)| (task.to_string(), id.to_string()))
            .collect();
        Ok(Self {
            backend: Backend::Onnx,
            sentiment: Arc::new(sentiment),
            zero_shot: Arc::new(zero_shot),
            ner: Arc::new(ner),
            models,
        })
    }

    #[cfg(not(feature = "onx"))]
    fn load_onnx(_settings: &Settings) -> Result<Self> {
        Err(crate::error::NlpError::BackendUnavailable(
            Backend::Onnx.to_string(),
        ))
    }
}
