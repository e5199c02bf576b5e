//! Named-entity recognition with grouped entity spans.
//!
//! Token-level tags (`B-PER`, `I-ORG`, `O`, ...) from any tagger are merged by
//! [`group_entities`] into one span per entity.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    error::Result,
    nlp::text::{self, Word},
};

/// One grouped entity; `start`/`end` are character offsets into the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub entity_group: String,
    pub score: f32,
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// A single tagged token before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTag {
    pub tag: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<EntityGroup>>;
}

/// Split `B-PER` into `("B", "PER")`. Tags without a prefix count as inside.
fn split_tag(tag: &str) -> (&str, &str) {
    match tag.split_once('-') {
        Some((prefix @ ("B" | "I"), kind)) => (prefix, kind),
        _ => ("I", tag),
    }
}

/// Merge consecutive tokens of the same entity type.
///
/// A token joins the running group when its type matches and its tag does not
/// open a new entity (`B-`). Groups of type `O` are discarded.
pub fn group_entities(text: &str, tokens: &[TokenTag]) -> Vec<EntityGroup> {
    let mut groups = Vec::new();
    let mut current: Vec<&TokenTag> = Vec::new();
    for token in tokens {
        if let Some(last) = current.last() {
            let (prefix, kind) = split_tag(&token.tag);
            let (_, last_kind) = split_tag(&last.tag);
            if kind == last_kind && prefix != "B" {
                current.push(token);
                continue;
            }
            groups.extend(close_group(text, &current));
            current.clear();
        }
        current.push(token);
    }
    groups.extend(close_group(text, &current));
    groups
}

fn close_group(text: &str, tokens: &[&TokenTag]) -> Option<EntityGroup> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    let (_, kind) = split_tag(&first.tag);
    if kind == "O" {
        return None;
    }
    let score = tokens.iter().map(|t| t.score).sum::<f32>() / tokens.len() as f32;
    Some(EntityGroup {
        entity_group: kind.to_string(),
        score,
        word: text::char_slice(text, first.start, last.end),
        start: first.start,
        end: last.end,
    })
}

static LOCATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "africa", "america", "amsterdam", "asia", "athens", "australia", "austria", "beijing",
        "belgium", "berlin", "boston", "brazil", "brussels", "california", "canada", "chicago",
        "china", "dublin", "egypt", "england", "europe", "france", "geneva", "germany", "greece",
        "hong kong", "india", "ireland", "israel", "italy", "japan", "kenya", "london",
        "los angeles", "madrid", "mexico", "moscow", "mumbai", "new york", "new york city",
        "nigeria", "norway", "paris", "poland", "portugal", "rome", "russia", "san francisco",
        "scotland", "seattle", "seoul", "spain", "stockholm", "sweden", "switzerland", "sydney",
        "texas", "tokyo", "toronto", "ukraine", "united kingdom", "united states", "vienna",
        "wales", "washington",
    ]
    .into_iter()
    .collect()
});

static ORGANISATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "amazon", "apple", "bbc", "boeing", "cnn", "eu", "facebook", "fifa", "google", "ibm",
        "intel", "meta", "microsoft", "nasa", "nato", "netflix", "nvidia", "reuters", "samsung",
        "siemens", "tesla", "toyota", "twitter", "unesco",
    ]
    .into_iter()
    .collect()
});

const ORG_SUFFIXES: &[&str] = &[
    "agency", "association", "bank", "co", "company", "corp", "corporation", "council",
    "foundation", "group", "inc", "institute", "llc", "ltd", "ministry", "party", "plc",
    "school", "university",
];

const TITLES: &[&str] = &[
    "dr", "mr", "mrs", "ms", "miss", "president", "prof", "professor", "senator", "sir",
    "chancellor", "minister", "judge", "king", "queen", "ceo",
];

const FIRST_NAMES: &[&str] = &[
    "alice", "angela", "anna", "barack", "bill", "bob", "charles", "clara", "david", "donald",
    "elizabeth", "elon", "emma", "george", "james", "jane", "jeff", "john", "joe", "maria",
    "mark", "mary", "michael", "olivia", "paul", "peter", "robert", "sarah", "steve", "thomas",
    "tim", "william", "wolfgang",
];

const DEMONYMS: &[&str] = &[
    "african", "american", "arabic", "british", "canadian", "chinese", "christian", "dutch",
    "english", "european", "french", "german", "greek", "indian", "irish", "italian",
    "japanese", "korean", "muslim", "polish", "russian", "spanish", "swedish",
];

/// Function words that are capitalised only because they open a sentence.
const STOPWORDS: &[&str] = &[
    "a", "after", "an", "and", "as", "at", "before", "but", "by", "for", "from", "he", "her",
    "here", "his", "how", "i", "if", "in", "is", "it", "its", "my", "no", "not", "of", "on",
    "or", "our", "she", "so", "that", "the", "their", "then", "there", "these", "they", "this",
    "those", "to", "today", "tomorrow", "was", "we", "what", "when", "where", "while", "who",
    "why", "with", "yes", "yesterday", "you",
];

/// Lowercase words that may sit inside an organisation name after a suffix,
/// as in "University of Oxford".
const CONNECTORS: &[&str] = &["of"];

fn is_org_word(lower: &str) -> bool {
    ORG_SUFFIXES.contains(&lower)
}

fn is_title(lower: &str) -> bool {
    TITLES.contains(&lower)
}

/// Gazetteer and capitalisation tagger.
///
/// Finds runs of capitalised words, then types each run from word lists:
/// locations, organisation names and suffixes, person titles and first names,
/// nationalities. Unknown runs fall back to shape heuristics.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryNer;

impl DictionaryNer {
    /// Tag every word of `text`.
    pub fn tag(&self, text: &str) -> Vec<TokenTag> {
        let words = text::words(text);
        let mut tags = Vec::with_capacity(words.len());
        let mut idx = 0;
        while idx < words.len() {
            let run = capitalised_run(&words, idx);
            if run == 0 {
                tags.push(outside(&words[idx]));
                idx += 1;
                continue;
            }
            tags.extend(tag_run(&words[idx..idx + run]));
            idx += run;
        }
        tags
    }
}

impl Ner for DictionaryNer {
    fn extract(&self, text: &str) -> Result<Vec<EntityGroup>> {
        Ok(group_entities(text, &self.tag(text)))
    }
}

fn outside(word: &Word<'_>) -> TokenTag {
    TokenTag {
        tag: "O".to_string(),
        score: 0.99,
        start: word.start,
        end: word.end,
    }
}

/// Length of the capitalised run starting at `from`, 0 if none.
fn capitalised_run(words: &[Word<'_>], from: usize) -> usize {
    let head = &words[from];
    if !head.is_capitalized() || STOPWORDS.contains(&head.lower().as_str()) {
        return 0;
    }
    let mut len = 1;
    while let Some(next) = words.get(from + len) {
        let prev = &words[from + len - 1];
        let abbreviated = matches!(prev.lower().as_str(), "dr" | "mr" | "mrs" | "ms" | "prof")
            && next.gap.trim() == ".";
        if !next.joined && !abbreviated {
            break;
        }
        if next.is_capitalized() && !STOPWORDS.contains(&next.lower().as_str()) {
            len += 1;
            continue;
        }
        let prev_is_org = is_org_word(&prev.lower());
        let after = words.get(from + len + 1);
        let bridges = CONNECTORS.contains(&next.lower().as_str())
            && prev_is_org
            && after.is_some_and(|w| w.joined && w.is_capitalized());
        if !bridges {
            break;
        }
        len += 2;
    }
    len
}

fn tag_run(run: &[Word<'_>]) -> Vec<TokenTag> {
    let leading_titles = run
        .iter()
        .take_while(|w| is_title(&w.lower()))
        .count();
    let (titles, body) = run.split_at(leading_titles);
    let mut tags: Vec<TokenTag> = titles.iter().map(outside).collect();
    if body.is_empty() {
        return tags;
    }

    let lower: Vec<String> = body.iter().map(Word::lower).collect();
    let phrase = lower.join(" ");
    let known = |p: &str| LOCATIONS.contains(p) || ORGANISATIONS.contains(p);
    if body.len() > 1
        && !known(&phrase)
        && known(&lower[0])
        && !lower.iter().skip(1).any(|w| is_org_word(w))
    {
        tags.extend(tag_run(&body[..1]));
        tags.extend(tag_run(&body[1..]));
        return tags;
    }
    let (kind, score) = if leading_titles > 0 {
        (Some("PER"), 0.9)
    } else if LOCATIONS.contains(phrase.as_str()) {
        (Some("LOC"), 0.95)
    } else if ORGANISATIONS.contains(phrase.as_str()) {
        (Some("ORG"), 0.95)
    } else if lower.iter().skip(1).any(|w| is_org_word(w))
        || (lower.len() > 1 && is_org_word(&lower[0]))
    {
        (Some("ORG"), 0.9)
    } else if FIRST_NAMES.contains(&lower[0].as_str()) {
        (Some("PER"), 0.9)
    } else if body.len() == 1 && DEMONYMS.contains(&lower[0].as_str()) {
        (Some("MISC"), 0.9)
    } else if body.len() == 1 && body[0].is_acronym() {
        (Some("ORG"), 0.6)
    } else if body.len() == 1 && body[0].sentence_start {
        (None, 0.0)
    } else if body.len() > 1 && body.len() <= 3 {
        (Some("PER"), 0.6)
    } else {
        (Some("MISC"), 0.55)
    };

    match kind {
        None => tags.extend(body.iter().map(outside)),
        Some(kind) => tags.extend(body.iter().enumerate().map(|(i, word)| TokenTag {
            tag: format!("{}-{kind}", if i == 0 { "B" } else { "I" }),
            score,
            start: word.start,
            end: word.end,
        })),
    }
    tags
}
