//! Binary sentiment classification (`POSITIVE` / `NEGATIVE`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::Result,
    nlp::{math::sigmoid, text},
};

pub const POSITIVE: &str = "POSITIVE";
pub const NEGATIVE: &str = "NEGATIVE";

/// Top prediction for one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: String,
    pub score: f32,
}

/// Trait for sentiment implementations.
pub trait SentimentModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<SentimentPrediction>;
}

static POLARITY: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        ("good", 1.0),
        ("great", 1.5),
        ("excellent", 2.0),
        ("amazing", 2.0),
        ("awesome", 2.0),
        ("fantastic", 2.0),
        ("wonderful", 2.0),
        ("love", 2.0),
        ("loved", 2.0),
        ("loving", 1.5),
        ("like", 0.8),
        ("liked", 0.8),
        ("enjoy", 1.2),
        ("enjoyed", 1.2),
        ("happy", 1.5),
        ("glad", 1.2),
        ("nice", 1.0),
        ("best", 1.8),
        ("better", 0.8),
        ("beautiful", 1.5),
        ("brilliant", 1.8),
        ("perfect", 2.0),
        ("recommend", 1.2),
        ("helpful", 1.2),
        ("pleasant", 1.0),
        ("superb", 2.0),
        ("delightful", 1.8),
        ("impressive", 1.5),
        ("fun", 1.0),
        ("win", 1.0),
        ("won", 1.0),
        ("success", 1.2),
        ("successful", 1.2),
        ("thanks", 0.8),
        ("thank", 0.8),
        ("bad", -1.2),
        ("worse", -1.5),
        ("worst", -2.0),
        ("terrible", -2.0),
        ("awful", -2.0),
        ("horrible", -2.0),
        ("hate", -2.0),
        ("hated", -2.0),
        ("poor", -1.2),
        ("sad", -1.2),
        ("angry", -1.5),
        ("disappointed", -1.8),
        ("disappointing", -1.8),
        ("boring", -1.2),
        ("broken", -1.5),
        ("useless", -1.8),
        ("waste", -1.8),
        ("rude", -1.5),
        ("slow", -0.8),
        ("ugly", -1.5),
        ("fail", -1.5),
        ("failed", -1.5),
        ("failure", -1.5),
        ("problem", -0.8),
        ("wrong", -1.0),
        ("annoying", -1.5),
        ("lost", -1.0),
        ("lose", -1.0),
        ("pain", -1.2),
        ("painful", -1.5),
        ("mediocre", -1.0),
        ("unhappy", -1.5),
        ("crash", -1.2),
        ("crashed", -1.2),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        ("very", 1.5),
        ("really", 1.5),
        ("so", 1.3),
        ("extremely", 2.0),
        ("absolutely", 2.0),
        ("incredibly", 2.0),
        ("totally", 1.5),
        ("quite", 1.2),
        ("slightly", 0.5),
        ("somewhat", 0.6),
        ("barely", 0.4),
    ]
    .into_iter()
    .collect()
});

const NEGATORS: &[&str] = &["not", "no", "never", "none", "nothing", "neither", "nor", "without"];

/// Words a negation keeps flipping before it expires.
const NEGATION_SCOPE: usize = 3;

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't") || word.ends_with("n’t")
}

/// Dictionary-backed sentiment scorer.
///
/// Sums word polarities, scaled by a preceding intensifier and flipped inside
/// a short negation window, then squashes the total through a logistic curve.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    /// Signed evidence for the positive class.
    pub fn polarity(&self, text: &str) -> f32 {
        let mut total = 0.0;
        let mut negation_left = 0usize;
        let mut multiplier = 1.0;
        for word in text::lowercase_words(text) {
            if is_negator(&word) {
                negation_left = NEGATION_SCOPE;
                continue;
            }
            if let Some(boost) = INTENSIFIERS.get(word.as_str()) {
                multiplier *= boost;
                continue;
            }
            if let Some(weight) = POLARITY.get(word.as_str()) {
                let sign = if negation_left > 0 { -0.8 } else { 1.0 };
                total += weight * multiplier * sign;
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            multiplier = 1.0;
        }
        total
    }
}

impl SentimentModel for LexiconSentiment {
    fn predict(&self, text: &str) -> Result<SentimentPrediction> {
        let positive = sigmoid(1.2 * self.polarity(text));
        let prediction = if positive >= 0.5 {
            SentimentPrediction {
                label: POSITIVE.to_string(),
                score: positive,
            }
        } else {
            SentimentPrediction {
                label: NEGATIVE.to_string(),
                score: 1.0 - positive,
            }
        };
        Ok(prediction)
    }
}
