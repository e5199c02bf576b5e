use ndarray::{array, Array1};
use nlp_gateway::nlp::math::{argmax, sigmoid, softmax, softmax_rows};
use proptest::prelude::*;

#[test]
fn softmax_matches_reference() {
    let probs = softmax(&[1.0, 2.0, 3.0]);
    let expected = [0.090_030_57, 0.244_728_47, 0.665_240_96];
    for (p, e) in probs.iter().zip(expected) {
        assert!((p - e).abs() < 1e-6);
    }
    assert!(softmax(&[]).is_empty());
}

#[test]
fn softmax_survives_large_logits() {
    let probs = softmax(&[1000.0, 1000.0]);
    assert!((probs[0] - 0.5).abs() < 1e-6);
}

#[test]
fn rows_are_normalised_independently() {
    let logits = array![[0.0, 0.0], [10.0, -10.0]];
    let probs = softmax_rows(&logits);
    assert!((probs[[0, 0]] - 0.5).abs() < 1e-6);
    assert!(probs[[1, 0]] > 0.99);
    assert_eq!(argmax(probs.row(1)), Some((0, probs[[1, 0]])));
}

#[test]
fn argmax_prefers_first_maximum() {
    let values: Array1<f32> = array![0.2, 0.4, 0.4];
    assert_eq!(argmax(values.view()), Some((1, 0.4)));
    let empty: Array1<f32> = Array1::zeros(0);
    assert_eq!(argmax(empty.view()), None);
}

#[test]
fn sigmoid_is_centred() {
    assert_eq!(sigmoid(0.0), 0.5);
    assert!(sigmoid(8.0) > 0.99);
}

proptest! {
    #[test]
    fn softmax_is_a_distribution(logits in proptest::collection::vec(-50.0f32..50.0, 1..16)) {
        let probs = softmax(&logits);
        let total: f32 = probs.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-4);
        prop_assert!(probs.iter().all(|p| *p >= 0.0));
    }
}
