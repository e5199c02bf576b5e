//! Runtime configuration for nlp-gateway.

use std::{
    env, fmt,
    path::PathBuf,
    str::FromStr,
};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_NER_MODEL: &str = "dbmdz/bert-large-cased-finetuned-conll03-english";
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

/// Implementation family used for all three pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Dictionary and heuristic models, always compiled in.
    Lexicon,
    /// ONNX exports of the pretrained transformers (feature `onx`).
    Onnx,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexicon => "lexicon",
            Self::Onnx => "onnx",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" => Ok(Self::Lexicon),
            "onnx" => Ok(Self::Onnx),
            other => bail!("unknown NLP_BACKEND `{other}` (expected `lexicon` or `onnx`)"),
        }
    }
}

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Which pipeline implementations to load.
    pub backend: Backend,
    /// Root folder holding one sub-directory per downloaded model.
    pub models_dir: PathBuf,
    /// Hub id of the sentiment model.
    pub sentiment_model: String,
    /// Hub id of the NLI model used for zero-shot classification.
    pub zero_shot_model: String,
    /// Hub id of the token classification model.
    pub ner_model: String,
    /// Hypothesis used for zero-shot classification; `{}` is the label slot.
    pub hypothesis_template: String,
    /// Longest accepted `text` parameter, in characters.
    pub max_input_chars: usize,
    /// Base URL of the model hub.
    pub hf_endpoint: String,
    /// Path of the ONNX graph inside a hub repository.
    pub onnx_file: String,
    /// Bearer token for gated or private hub repositories.
    pub hf_token: Option<String>,
}

impl Settings {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("parsing PORT `{raw}`"))?,
            None => 5000,
        };
        let backend = match lookup("NLP_BACKEND") {
            Some(raw) => raw.parse()?,
            None => Backend::Lexicon,
        };
        let max_input_chars = match lookup("MAX_INPUT_CHARS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("parsing MAX_INPUT_CHARS `{raw}`"))?,
            None => 10_000,
        };
        let hypothesis_template = string_or("HYPOTHESIS_TEMPLATE", DEFAULT_HYPOTHESIS_TEMPLATE);
        if !hypothesis_template.contains("{}") {
            bail!("HYPOTHESIS_TEMPLATE must contain `{{}}`, got `{hypothesis_template}`");
        }

        Ok(Self {
            host: string_or("HOST", "127.0.0.1"),
            port,
            backend,
            models_dir: lookup("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./models")),
            sentiment_model: string_or("SENTIMENT_MODEL", DEFAULT_SENTIMENT_MODEL),
            zero_shot_model: string_or("ZERO_SHOT_MODEL", DEFAULT_ZERO_SHOT_MODEL),
            ner_model: string_or("NER_MODEL", DEFAULT_NER_MODEL),
            hypothesis_template,
            max_input_chars,
            hf_endpoint: string_or("HF_ENDPOINT", "https://huggingface.co")
                .trim_end_matches('/')
                .to_string(),
            onnx_file: string_or("ONNX_FILE", "onnx/model.onnx"),
            hf_token: lookup("HF_TOKEN").filter(|token| !token.is_empty()),
        })
    }

    /// Local directory for a hub model id, e.g. `facebook/bart-large-mnli`
    /// becomes `<models_dir>/facebook--bart-large-mnli`.
    pub fn model_dir(&self, model_id: &str) -> PathBuf {
        self.models_dir.join(model_id.replace('/', "--"))
    }

    /// The three configured model ids, keyed by task.
    pub fn model_ids(&self) -> [(&'static str, &str); 3] {
        [
            ("sentiment", self.sentiment_model.as_str()),
            ("zero-shot", self.zero_shot_model.as_str()),
            ("ner", self.ner_model.as_str()),
        ]
    }
}
