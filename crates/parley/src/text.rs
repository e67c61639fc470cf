//! Text normalization shared by the red flag detector and the conflict scorer.

use std::collections::HashSet;

/// Fold unicode punctuation to ASCII, lowercase, and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let ascii_punctuation = text
        .replace(['\u{2019}', '\u{2018}'], "'") // U+2019/U+2018 SINGLE QUOTATION MARKs
        .replace(['\u{201C}', '\u{201D}'], "\"") // U+201C/U+201D DOUBLE QUOTATION MARKs
        .replace(['\u{2013}', '\u{2014}'], "-"); // U+2013/U+2014 EN/EM DASHes

    ascii_punctuation
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A message pre-processed once so that many phrase lists can be tested
/// against it cheaply.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    /// Original text, kept for examples.
    pub raw: String,
    /// Lowercased text with punctuation intact; regex rules run against this.
    pub normalized: String,
    tokens: Vec<String>,
    token_set: HashSet<String>,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        let normalized = normalize(text);

        // Strip leading/trailing punctuation but keep internal apostrophes
        let tokens: Vec<String> = normalized
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| c.is_ascii_punctuation())
                    .to_string()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let token_set = tokens.iter().cloned().collect();

        Self {
            raw: text.to_string(),
            normalized,
            tokens,
            token_set,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }

    /// Word-boundary aware phrase test: "ok" does not match "book".
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let phrase_tokens: Vec<&str> = phrase.split_whitespace().collect();
        if phrase_tokens.is_empty() {
            return false;
        }

        if phrase_tokens.len() == 1 {
            return self.contains_token(phrase_tokens[0]);
        }

        self.tokens.windows(phrase_tokens.len()).any(|window| {
            window
                .iter()
                .zip(phrase_tokens.iter())
                .all(|(token, phrase_token)| token == phrase_token)
        })
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.contains_phrase(phrase))
    }

    /// Plain substring test over the normalized text, ignoring word
    /// boundaries: "grateful" is found in "ungrateful".
    pub fn mentions_any(&self, phrases: &[&str]) -> bool {
        phrases
            .iter()
            .any(|phrase| !phrase.trim().is_empty() && self.normalized.contains(phrase))
    }
}
