//! `config.json` label maps shipped with hub models.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use crate::error::{NlpError, Result};

fn default_max_positions() -> usize {
    512
}

/// The subset of a transformers `config.json` the pipelines need.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Class index to label; the JSON keys are stringified integers.
    #[serde_as(as = "IndexMap<DisplayFromStr, _>")]
    #[serde(default)]
    pub id2label: IndexMap<usize, String>,
    #[serde(default = "default_max_positions")]
    pub max_position_embeddings: usize,
}

impl ModelConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| NlpError::ModelFiles {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Label for a class index, `LABEL_<id>` when the map has no entry.
    pub fn label(&self, id: usize) -> String {
        self.id2label
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("LABEL_{id}"))
    }

    /// Class index whose label equals `name`, ignoring case.
    pub fn find_label(&self, name: &str) -> Option<usize> {
        self.id2label
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(name))
            .map(|(&id, _)| id)
    }

    /// Longest token sequence the model accepts.
    pub fn max_tokens(&self) -> usize {
        self.max_position_embeddings.clamp(8, 1024)
    }
}
