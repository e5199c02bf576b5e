//! Numeric helpers shared by every backend.

use ndarray::{Array2, ArrayView1, Axis};

/// Numerically stable softmax over a slice of logits.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

/// Row-wise softmax of a `[rows, classes]` logit matrix.
pub fn softmax_rows(logits: &Array2<f32>) -> Array2<f32> {
    let mut out = logits.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let probs = softmax(&row.to_vec());
        for (slot, p) in row.iter_mut().zip(probs) {
            *slot = p;
        }
    }
    out
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Index and value of the largest entry.
pub fn argmax(values: ArrayView1<'_, f32>) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (idx, value)| match best {
            Some((_, current)) if current >= value => best,
            _ => Some((idx, value)),
        })
}
