use nlp_gateway::nlp::zero_shot::{
    hypothesis, normalize_labels, parse_labels, LexiconZeroShot, ZeroShotModel, ZeroShotOutput,
    ZeroShotRequest,
};
use proptest::prelude::*;

fn request<'a>(text: &'a str, labels: &'a [String], multi_label: bool) -> ZeroShotRequest<'a> {
    ZeroShotRequest {
        text,
        labels,
        hypothesis_template: "This example is {}.",
        multi_label,
    }
}

#[test]
fn labels_are_split_and_trimmed() {
    assert_eq!(
        parse_labels("sports, politics,,  tech "),
        vec!["sports", "politics", "tech"]
    );
    assert!(parse_labels(" , ,").is_empty());
}

#[test]
fn hypothesis_fills_the_slot() {
    assert_eq!(
        hypothesis("This example is {}.", "sports").unwrap(),
        "This example is sports."
    );
    assert!(hypothesis("no slot", "sports").is_err());
}

#[test]
fn fuzzy_matches_outrank_unrelated_labels() {
    let labels = vec!["cooking".to_string(), "sports".to_string()];
    let output = LexiconZeroShot
        .classify(&request("The sport was exciting", &labels, false))
        .unwrap();
    assert_eq!(output.labels, vec!["sports", "cooking"]);
    assert!(output.scores[0] > output.scores[1]);
}

#[test]
fn no_labels_yields_empty_output() {
    let output = LexiconZeroShot
        .classify(&request("anything", &[], false))
        .unwrap();
    assert_eq!(output.sequence, "anything");
    assert!(output.labels.is_empty() && output.scores.is_empty());
}

#[test]
fn template_without_slot_is_an_error() {
    let labels = vec!["a".to_string()];
    let mut req = request("text", &labels, false);
    req.hypothesis_template = "missing";
    assert!(LexiconZeroShot.classify(&req).is_err());
}

#[test]
fn ranking_keeps_caller_order_on_ties() {
    let output = ZeroShotOutput::ranked(
        "t",
        vec![("b".into(), 0.2), ("a".into(), 0.4), ("c".into(), 0.2)],
    );
    assert_eq!(output.labels, vec!["a", "b", "c"]);
    assert_eq!(output.scores, vec![0.4, 0.2, 0.2]);
}

proptest! {
    #[test]
    fn normalized_labels_are_trimmed_and_non_empty(raw in proptest::collection::vec("[ a-z,]{0,8}", 0..6)) {
        let labels = normalize_labels(&raw);
        prop_assert!(labels.iter().all(|l| !l.is_empty() && l.trim() == l));
        prop_assert!(labels.len() <= raw.len());
    }

    #[test]
    fn single_label_scores_form_a_distribution(
        text in "[a-zA-Z ]{0,60}",
        labels in proptest::collection::vec("[a-z]{1,10}", 1..6),
    ) {
        let output = LexiconZeroShot.classify(&request(&text, &labels, false)).unwrap();
        prop_assert_eq!(output.labels.len(), labels.len());
        let total: f32 = output.scores.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-4);
        prop_assert!(output.scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn multi_label_scores_are_probabilities(
        text in "[a-zA-Z ]{0,60}",
        labels in proptest::collection::vec("[a-z]{1,10}", 1..6),
    ) {
        let output = LexiconZeroShot.classify(&request(&text, &labels, true)).unwrap();
        prop_assert!(output.scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
