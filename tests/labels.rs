use nlp_gateway::nlp::labels::ModelConfig;

const NLI_CONFIG: &str = r#"{
    "architectures": ["BartForSequenceClassification"],
    "id2label": {"0": "contradiction", "1": "neutral", "2": "entailment"},
    "max_position_embeddings": 1024
}"#;

#[test]
fn labels_resolve_by_index_and_name() {
    let config = ModelConfig::from_json(NLI_CONFIG).unwrap();
    assert_eq!(config.label(2), "entailment");
    assert_eq!(config.label(7), "LABEL_7");
    assert_eq!(config.find_label("ENTAILMENT"), Some(2));
    assert_eq!(config.find_label("missing"), None);
    assert_eq!(config.max_tokens(), 1024);
}

#[test]
fn config_files_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"id2label": {"0": "NEGATIVE", "1": "POSITIVE"}}"#).unwrap();
    let config = ModelConfig::from_file(&path).unwrap();
    assert_eq!(config.label(1), "POSITIVE");
    assert_eq!(config.max_tokens(), 512);

    assert!(ModelConfig::from_file(&dir.path().join("absent.json")).is_err());
}

#[test]
fn label_keys_must_be_class_indices() {
    assert!(ModelConfig::from_json(r#"{"id2label": {"zero": "NEGATIVE"}}"#).is_err());
    let config = ModelConfig::from_json(r#"{"id2label": {"10": "B-LOC"}}"#).unwrap();
    assert_eq!(config.find_label("b-loc"), Some(10));
}
