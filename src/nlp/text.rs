//! Word segmentation with character offsets.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("valid regex")
});

/// A word of the input with its position.
///
/// `start`/`end` count characters, matching the offsets returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Raw text between the previous word and this one.
    pub gap: &'a str,
    pub start: usize,
    pub end: usize,
    /// True when no word precedes it in the current sentence.
    pub sentence_start: bool,
    /// True when only whitespace separates it from the previous word.
    pub joined: bool,
}

impl Word<'_> {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    /// Acronyms such as `NASA` or `UN`.
    pub fn is_acronym(&self) -> bool {
        let len = self.text.chars().count();
        (2..=5).contains(&len) && self.text.chars().all(|c| c.is_uppercase())
    }
}

/// Split `text` into words, tracking sentence boundaries.
pub fn words(text: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut last_byte = 0;
    let mut char_pos = 0;
    for found in WORD.find_iter(text) {
        let gap = &text[last_byte..found.start()];
        let start = char_pos + gap.chars().count();
        let end = start + found.as_str().chars().count();
        let sentence_start =
            out.is_empty() || gap.contains(|c: char| matches!(c, '.' | '!' | '?' | '\n'));
        let joined = !out.is_empty() && gap.chars().all(char::is_whitespace);
        out.push(Word {
            text: found.as_str(),
            gap,
            start,
            end,
            sentence_start,
            joined,
        });
        last_byte = found.end();
        char_pos = end;
    }
    out
}

/// Lower-cased words, for bag-of-words scoring.
pub fn lowercase_words(text: &str) -> Vec<String> {
    words(text).iter().map(Word::lower).collect()
}

/// Substring of `text` between two character offsets.
pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}
