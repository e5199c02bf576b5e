#![cfg(feature = "onx")]

use std::str::FromStr;

use nlp_gateway::nlp::onnx::truncate_first;
use tokenizers::Tokenizer;

const TOKENIZER: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [],
    "normalizer": null,
    "pre_tokenizer": {"type": "Whitespace"},
    "post_processor": {"type": "BertProcessing", "sep": ["[SEP]", 2], "cls": ["[CLS]", 1]},
    "decoder": null,
    "model": {
        "type": "WordLevel",
        "vocab": {"[UNK]": 0, "[CLS]": 1, "[SEP]": 2, "[PAD]": 3, "word": 4, "this": 5, "is": 6, "sports": 7},
        "unk_token": "[UNK]"
    }
}"#;

const CLS: u32 = 1;
const SEP: u32 = 2;
const WORD: u32 = 4;

fn tokenizer(max_tokens: usize) -> Tokenizer {
    let mut tokenizer = Tokenizer::from_str(TOKENIZER).unwrap();
    truncate_first(&mut tokenizer, max_tokens).unwrap();
    tokenizer
}

#[test]
fn long_premise_keeps_whole_hypothesis() {
    let tokenizer = tokenizer(16);
    let premise = "word ".repeat(50);
    let encoding = tokenizer
        .encode((premise.as_str(), "this is sports"), true)
        .unwrap();
    let ids = encoding.get_ids();
    assert_eq!(ids.len(), 16);
    assert_eq!(ids[0], CLS);
    assert_eq!(ids[11], SEP);
    assert_eq!(&ids[12..], &[5, 6, 7, SEP]);
}

#[test]
fn hypotheses_stay_distinct_after_truncation() {
    let tokenizer = tokenizer(16);
    let premise = "word ".repeat(50);
    let a = tokenizer.encode((premise.as_str(), "this is sports"), true).unwrap();
    let b = tokenizer.encode((premise.as_str(), "this is word"), true).unwrap();
    assert_ne!(a.get_ids(), b.get_ids());
}

#[test]
fn single_sequences_truncate_at_the_limit() {
    let tokenizer = tokenizer(16);

    let at_limit = tokenizer.encode("word ".repeat(14).as_str(), true).unwrap();
    assert_eq!(at_limit.len(), 16);

    let over = tokenizer.encode("word ".repeat(15).as_str(), true).unwrap();
    let ids = over.get_ids();
    assert_eq!(ids.len(), 16);
    assert_eq!(ids[14], WORD);
    assert_eq!(ids[15], SEP);
}

#[test]
fn short_pairs_are_untouched() {
    let tokenizer = tokenizer(16);
    let encoding = tokenizer.encode(("word word", "this is sports"), true).unwrap();
    assert_eq!(encoding.len(), 8);
}
