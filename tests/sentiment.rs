use nlp_gateway::nlp::sentiment::{LexiconSentiment, SentimentModel, NEGATIVE, POSITIVE};
use proptest::prelude::*;

#[test]
fn clear_praise_is_positive() {
    let prediction = LexiconSentiment.predict("I love this movie!").unwrap();
    assert_eq!(prediction.label, POSITIVE);
    assert!(prediction.score > 0.9);
}

#[test]
fn negation_flips_polarity() {
    let prediction = LexiconSentiment.predict("This is not good").unwrap();
    assert_eq!(prediction.label, NEGATIVE);

    let prediction = LexiconSentiment.predict("I don't hate it").unwrap();
    assert_eq!(prediction.label, POSITIVE);
}

#[test]
fn intensifiers_strengthen_evidence() {
    let plain = LexiconSentiment.polarity("the food was bad");
    let strong = LexiconSentiment.polarity("the food was very bad");
    assert!(strong < plain && plain < 0.0);
}

#[test]
fn neutral_text_sits_on_the_boundary() {
    let prediction = LexiconSentiment.predict("The meeting is at noon").unwrap();
    assert_eq!(prediction.label, POSITIVE);
    assert!((prediction.score - 0.5).abs() < 1e-6);
}

proptest! {
    #[test]
    fn winning_score_is_a_majority_probability(text in "\\PC{0,80}") {
        let prediction = LexiconSentiment.predict(&text).unwrap();
        prop_assert!(prediction.score >= 0.5 && prediction.score <= 1.0);
        prop_assert!(prediction.label == POSITIVE || prediction.label == NEGATIVE);
    }
}
