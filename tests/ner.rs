use nlp_gateway::nlp::ner::{group_entities, DictionaryNer, EntityGroup, Ner, TokenTag};

fn tag(tag: &str, score: f32, start: usize, end: usize) -> TokenTag {
    TokenTag {
        tag: tag.to_string(),
        score,
        start,
        end,
    }
}

fn spans(entities: &[EntityGroup]) -> Vec<(&str, &str)> {
    entities
        .iter()
        .map(|e| (e.entity_group.as_str(), e.word.as_str()))
        .collect()
}

#[test]
fn word_pieces_merge_into_one_entity() {
    let text = "Wolfgang lives in Berlin";
    let tokens = vec![
        tag("B-PER", 0.9, 0, 4),
        tag("I-PER", 0.7, 4, 8),
        tag("O", 0.99, 9, 14),
        tag("O", 0.99, 15, 17),
        tag("B-LOC", 0.95, 18, 24),
    ];
    let entities = group_entities(text, &tokens);
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].word, "Wolfgang");
    assert_eq!((entities[0].start, entities[0].end), (0, 8));
    assert!((entities[0].score - 0.8).abs() < 1e-6);
    assert_eq!(spans(&entities)[1], ("LOC", "Berlin"));
}

#[test]
fn begin_tag_and_type_change_split_groups() {
    let text = "Paris London Acme";
    let tokens = vec![
        tag("B-LOC", 0.9, 0, 5),
        tag("B-LOC", 0.9, 6, 12),
        tag("I-ORG", 0.8, 13, 17),
    ];
    assert_eq!(
        spans(&group_entities(text, &tokens)),
        vec![("LOC", "Paris"), ("LOC", "London"), ("ORG", "Acme")]
    );
}

#[test]
fn outside_tokens_are_dropped() {
    let tokens = vec![tag("O", 0.99, 0, 3), tag("O", 0.99, 4, 7)];
    assert!(group_entities("foo bar", &tokens).is_empty());
    assert!(group_entities("", &[]).is_empty());
}

#[test]
fn titles_and_organisation_suffixes() {
    let text = "Dr. Sarah Connor works at the University of Oxford in the United Kingdom.";
    let entities = DictionaryNer.extract(text).unwrap();
    assert_eq!(
        spans(&entities),
        vec![
            ("PER", "Sarah Connor"),
            ("ORG", "University of Oxford"),
            ("LOC", "United Kingdom"),
        ]
    );
    assert_eq!((entities[0].start, entities[0].end), (4, 16));
}

#[test]
fn known_names_split_a_capitalised_run() {
    let entities = DictionaryNer
        .extract("Apple CEO Tim Cook spoke in London.")
        .unwrap();
    assert_eq!(
        spans(&entities),
        vec![("ORG", "Apple"), ("PER", "Tim Cook"), ("LOC", "London")]
    );
}

#[test]
fn sentence_initial_function_words_are_not_entities() {
    let entities = DictionaryNer
        .extract("The weather in Berlin is nice. Yesterday it rained.")
        .unwrap();
    assert_eq!(spans(&entities), vec![("LOC", "Berlin")]);
}

#[test]
fn offsets_count_characters() {
    let text = "Café owners in München met Mr. Müller";
    let entities = DictionaryNer.extract(text).unwrap();
    let last = entities.last().unwrap();
    assert_eq!(last.entity_group, "PER");
    assert_eq!(last.word, "Müller");
    let expected_start = text.chars().count() - "Müller".chars().count();
    assert_eq!(last.start, expected_start);
    assert_eq!(last.end, text.chars().count());
}
