//! Zero-shot classification against caller-supplied labels.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::{
    error::{NlpError, Result},
    nlp::{
        math::{sigmoid, softmax},
        text,
    },
};

/// Similarity below which two words are treated as unrelated.
const FUZZY_FLOOR: f64 = 0.88;

/// Labels ranked by score, `labels[i]` paired with `scores[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroShotOutput {
    pub sequence: String,
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ZeroShotOutput {
    /// Build the output from unsorted `(label, score)` pairs.
    pub fn ranked(sequence: &str, mut pairs: Vec<(String, f32)>) -> Self {
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let (labels, scores) = pairs.into_iter().unzip();
        Self {
            sequence: sequence.to_string(),
            labels,
            scores,
        }
    }
}

/// One classification call.
#[derive(Debug, Clone, Copy)]
pub struct ZeroShotRequest<'a> {
    pub text: &'a str,
    pub labels: &'a [String],
    /// Hypothesis with a `{}` slot for the label.
    pub hypothesis_template: &'a str,
    /// Score labels independently instead of normalising across them.
    pub multi_label: bool,
}

/// Trait for zero-shot implementations.
pub trait ZeroShotModel: Send + Sync {
    fn classify(&self, request: &ZeroShotRequest<'_>) -> Result<ZeroShotOutput>;
}

/// Fill the template's `{}` slot with `label`.
pub fn hypothesis(template: &str, label: &str) -> Result<String> {
    if !template.contains("{}") {
        return Err(NlpError::Config(format!(
            "hypothesis template `{template}` has no `{{}}` slot"
        )));
    }
    Ok(template.replacen("{}", label, 1))
}

/// Trim labels and drop empty ones, keeping caller order.
pub fn normalize_labels<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|label| label.as_ref().trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Split a comma separated label list.
pub fn parse_labels(raw: &str) -> Vec<String> {
    normalize_labels(raw.split(','))
}

/// Word-overlap classifier.
///
/// Each label is scored by how well its words match words of the text,
/// exactly or through Jaro-Winkler similarity.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconZeroShot;

impl LexiconZeroShot {
    /// Relevance of `label` to the text words, in `[0, 1]`.
    pub fn relevance(&self, text_words: &[String], label: &str) -> f32 {
        let label_words = text::lowercase_words(label);
        if label_words.is_empty() || text_words.is_empty() {
            return 0.0;
        }
        let total: f64 = label_words
            .iter()
            .map(|label_word| {
                text_words
                    .iter()
                    .map(|word| {
                        if word == label_word {
                            1.0
                        } else {
                            jaro_winkler(word, label_word)
                        }
                    })
                    .filter(|sim| *sim >= FUZZY_FLOOR)
                    .fold(0.0, f64::max)
            })
            .sum();
        (total / label_words.len() as f64) as f32
    }
}

impl ZeroShotModel for LexiconZeroShot {
    fn classify(&self, request: &ZeroShotRequest<'_>) -> Result<ZeroShotOutput> {
        hypothesis(request.hypothesis_template, "")?;
        if request.labels.is_empty() {
            return Ok(ZeroShotOutput::ranked(request.text, Vec::new()));
        }
        let words = text::lowercase_words(request.text);
        let relevance: Vec<f32> = request
            .labels
            .iter()
            .map(|label| self.relevance(&words, label))
            .collect();

        let scores = if request.multi_label {
            relevance
                .iter()
                .map(|r| sigmoid(10.0 * (r - 0.5)))
                .collect()
        } else {
            let logits: Vec<f32> = relevance.iter().map(|r| r * 6.0).collect();
            softmax(&logits)
        };

        let pairs = request.labels.iter().cloned().zip(scores).collect();
        Ok(ZeroShotOutput::ranked(request.text, pairs))
    }
}
