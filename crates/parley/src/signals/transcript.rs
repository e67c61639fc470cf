//! Transcript tokenizer and the per-call context the suppression stages read.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::phrases::{
    APPRECIATION, CANCELLATION, EVASIVE_REPLY, EVASIVE_REPLY_MAX_TOKENS, HEDGING, RESOLUTION,
    SUPPORTIVE_REPLY,
};
use super::compile_pattern;
use crate::text::NormalizedText;

// "12/03/2024, 21:15 - Alex: message" (WhatsApp export)
static TIMESTAMPED_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile_pattern(
        r"^\s*(\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})),?\s+(\d{1,2}:\d{2}(?:\s?[aApP][mM])?)\s+-\s+([^:]+?)\s*:\s*(.+?)\s*$",
    )
});

// "12/03/2024, 21:14 - " with or without a speaker after it
static TIMESTAMP_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile_pattern(r"^\s*\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}),?\s+\d{1,2}:\d{2}(?:\s?[aApP][mM])?\s+-\s+")
});

// A speaker field that is really a date, e.g. "12/03/2024, 21"
static DATE_LIKE_SPEAKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile_pattern(r"^\d{1,2}/\d{1,2}/\d{2,4}\b"));

// "Alex: message"
static SPEAKER_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile_pattern(r"^\s*([^:]{1,50}?)\s*:\s*(.+?)\s*$"));

/// One attributed line of a transcript.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Position among parsed utterances, not the raw line number.
    pub index: usize,
    pub speaker: String,
    pub timestamp: Option<String>,
    pub text: NormalizedText,
}

impl Utterance {
    pub fn raw_text(&self) -> &str {
        &self.text.raw
    }
}

/// Parse one transcript line into `(speaker, timestamp, message)`.
/// Returns `None` for lines in neither supported format, including
/// WhatsApp system notices that carry a timestamp but no speaker.
pub fn parse_line(line: &str) -> Option<(String, Option<String>, String)> {
    if let Some(caps) = TIMESTAMPED_LINE
        .as_ref()
        .and_then(|re| re.captures(line))
    {
        let timestamp = format!("{}, {}", &caps[1], &caps[2]);
        return Some((caps[3].to_string(), Some(timestamp), caps[4].to_string()));
    }

    if matches_pattern(&TIMESTAMP_PREFIX, line) {
        return None;
    }

    let caps = SPEAKER_LINE.as_ref()?.captures(line)?;
    let speaker = caps[1].trim();
    if speaker.is_empty() || matches_pattern(&DATE_LIKE_SPEAKER, speaker) {
        return None;
    }
    Some((speaker.to_string(), None, caps[2].to_string()))
}

fn matches_pattern(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Split a newline-delimited transcript into utterances, dropping lines
/// that match neither format. Order is preserved.
pub fn tokenize(conversation: &str) -> Vec<Utterance> {
    conversation
        .lines()
        .filter_map(parse_line)
        .enumerate()
        .map(|(index, (speaker, timestamp, message))| Utterance {
            index,
            speaker,
            timestamp,
            text: NormalizedText::new(&message),
        })
        .collect()
}

/// Distinct speakers in first-seen order.
pub fn participants(utterances: &[Utterance]) -> Vec<String> {
    let mut seen = HashSet::new();
    utterances
        .iter()
        .filter(|u| seen.insert(u.speaker.as_str()))
        .map(|u| u.speaker.clone())
        .collect()
}

/// Transcript-wide facts gathered in one pass before rule evaluation.
#[derive(Debug, Default)]
pub struct TranscriptContext {
    last_index: HashMap<String, usize>,
    message_counts: HashMap<String, usize>,
    evasive_counts: HashMap<String, usize>,
    nuanced_speakers: HashSet<String>,
    positive_speakers: HashSet<String>,
    cancellation_indices: Vec<usize>,
    resolution_indices: Vec<usize>,
}

impl TranscriptContext {
    pub fn build(utterances: &[Utterance]) -> Self {
        let mut context = Self::default();

        for utterance in utterances {
            let speaker = &utterance.speaker;
            let text = &utterance.text;

            context.last_index.insert(speaker.clone(), utterance.index);
            *context.message_counts.entry(speaker.clone()).or_insert(0) += 1;

            if is_evasive_reply(text) {
                *context.evasive_counts.entry(speaker.clone()).or_insert(0) += 1;
            }
            if text.contains_any(HEDGING) {
                context.nuanced_speakers.insert(speaker.clone());
            }
            if text.contains_any(SUPPORTIVE_REPLY) || text.contains_any(APPRECIATION) {
                context.positive_speakers.insert(speaker.clone());
            }
            if text.contains_any(CANCELLATION) {
                context.cancellation_indices.push(utterance.index);
            }
            if text.contains_any(RESOLUTION) {
                context.resolution_indices.push(utterance.index);
            }
        }

        context
    }

    /// Whether `speaker` sends anything after utterance `index`.
    pub fn speaks_after(&self, speaker: &str, index: usize) -> bool {
        self.last_index
            .get(speaker)
            .is_some_and(|&last| last > index)
    }

    pub fn is_nuanced(&self, speaker: &str) -> bool {
        self.nuanced_speakers.contains(speaker)
    }

    /// Another participant replied positively somewhere in the transcript.
    pub fn has_reciprocal_positive_reply(&self, speaker: &str) -> bool {
        self.positive_speakers.iter().any(|s| s != speaker)
    }

    /// A cancellation was raised at or before `index`.
    pub fn cancellation_open_at(&self, index: usize) -> bool {
        self.cancellation_indices.iter().any(|&i| i <= index)
    }

    /// Apology or reschedule language appears after `index`.
    pub fn resolved_after(&self, index: usize) -> bool {
        self.resolution_indices.iter().any(|&i| i > index)
    }

    /// The other participants barely reply, or mostly reply evasively.
    pub fn other_party_evasive(&self, speaker: &str) -> bool {
        let (replies, evasive) = self
            .message_counts
            .iter()
            .filter(|(name, _)| name.as_str() != speaker)
            .fold((0, 0), |(replies, evasive), (name, count)| {
                (
                    replies + count,
                    evasive + self.evasive_counts.get(name).copied().unwrap_or(0),
                )
            });

        replies <= 2 || evasive * 2 >= replies
    }
}

fn is_evasive_reply(text: &NormalizedText) -> bool {
    text.token_count() <= EVASIVE_REPLY_MAX_TOKENS && text.contains_any(EVASIVE_REPLY)
}
