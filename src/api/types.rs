//! Query parameters and JSON bodies of the HTTP API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::nlp::zero_shot::parse_labels;

/// Decoded query string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// First value of `key`; later repeats are ignored.
fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

/// Lenient boolean flag: `true`/`false`/`1`/`0`, any case.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Query of `/analyze` and `/extract`.
#[derive(Debug, Default, Clone)]
pub struct TextQuery {
    pub text: Option<String>,
}

impl TextQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            text: first(pairs, "text"),
        }
    }
}

/// Query of `/classify`.
#[derive(Debug, Default, Clone)]
pub struct ClassifyQuery {
    pub text: Option<String>,
    /// Trimmed, non-empty labels from the comma separated list.
    pub labels: Vec<String>,
    pub multi_label: Option<bool>,
    pub hypothesis_template: Option<String>,
}

impl ClassifyQuery {
    /// Errors with the offending parameter when `multi_label` is not a flag.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, &'static str> {
        let multi_label = match first(pairs, "multi_label") {
            Some(raw) => Some(parse_flag(&raw).ok_or("'multi_label' must be true or false")?),
            None => None,
        };
        Ok(Self {
            text: first(pairs, "text"),
            labels: first(pairs, "labels")
                .map(|raw| parse_labels(&raw))
                .unwrap_or_default(),
            multi_label,
            hypothesis_template: first(pairs, "hypothesis_template"),
        })
    }
}

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub backend: String,
    pub models: IndexMap<String, String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}
