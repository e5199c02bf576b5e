use nlp_gateway::nlp::text::{char_slice, words};

#[test]
fn offsets_are_in_characters() {
    let text = "Héllo, wörld. Next";
    let found = words(text);
    let spans: Vec<(&str, usize, usize)> = found.iter().map(|w| (w.text, w.start, w.end)).collect();
    assert_eq!(spans, vec![("Héllo", 0, 5), ("wörld", 7, 12), ("Next", 14, 18)]);
    assert_eq!(char_slice(text, 7, 12), "wörld");
}

#[test]
fn sentence_and_join_flags() {
    let found = words("New York. Then rain, sun");
    assert!(found[0].sentence_start && !found[0].joined);
    assert!(found[1].joined && !found[1].sentence_start);
    assert!(found[2].sentence_start && !found[2].joined);
    assert!(!found[4].joined);
}

#[test]
fn contractions_stay_whole() {
    let found = words("I don't know");
    assert_eq!(found[1].text, "don't");
    assert!(found[0].is_capitalized());
    assert!(!found[0].is_acronym());
}
