//! Signature fingerprints: recognised two-party conflict shapes that force
//! both participants to a fixed score, bypassing the lexical scoring.

use common::configuration::FingerprintConfig;

use super::scorer::Tendency;

/// What the scorer sees when testing fingerprints.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintContext<'a> {
    pub participants: &'a [String],
    /// All quote texts joined with spaces, normalized to lowercase.
    pub combined_text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedOutcome {
    pub score: u8,
}

impl ForcedOutcome {
    pub fn tendency(&self) -> Tendency {
        Tendency::from_score(self.score)
    }
}

pub trait Fingerprint {
    fn name(&self) -> &str;
    fn matches(&self, context: &FingerprintContext<'_>) -> bool;
    fn outcome(&self) -> ForcedOutcome;
}

/// Matches a participant pair (order and case insensitive) or a set of
/// quote markers that must all appear in the combined quote text.
#[derive(Debug, Clone)]
pub struct SignatureFingerprint {
    name: String,
    participant_pair: Option<(String, String)>,
    quote_markers: Vec<String>,
    outcome: ForcedOutcome,
}

pub const DEFAULT_FORCED_SCORE: u8 = 20;

impl SignatureFingerprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            participant_pair: None,
            quote_markers: Vec::new(),
            outcome: ForcedOutcome {
                score: DEFAULT_FORCED_SCORE,
            },
        }
    }

    pub fn with_participants(mut self, first: &str, second: &str) -> Self {
        self.participant_pair = Some((
            first.trim().to_lowercase(),
            second.trim().to_lowercase(),
        ));
        self
    }

    pub fn with_quote_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.quote_markers = markers
            .into_iter()
            .map(|m| crate::text::normalize(m.as_ref()))
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    pub fn with_forced_score(mut self, score: u8) -> Self {
        self.outcome = ForcedOutcome {
            score: score.min(100),
        };
        self
    }

    pub fn from_config(config: &FingerprintConfig) -> Self {
        let mut fingerprint = Self::new(config.name.clone()).with_forced_score(config.forced_score);

        if let Some([first, second]) = config.participants.as_deref() {
            fingerprint = fingerprint.with_participants(first, second);
        }
        if let Some(markers) = &config.quote_markers {
            fingerprint = fingerprint.with_quote_markers(markers);
        }

        fingerprint
    }

    fn pair_matches(&self, participants: &[String]) -> bool {
        let (Some((first, second)), [a, b]) = (&self.participant_pair, participants) else {
            return false;
        };
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();

        (a == *first && b == *second) || (a == *second && b == *first)
    }

    fn markers_match(&self, combined_text: &str) -> bool {
        !self.quote_markers.is_empty()
            && self
                .quote_markers
                .iter()
                .all(|marker| combined_text.contains(marker.as_str()))
    }
}

impl Fingerprint for SignatureFingerprint {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, context: &FingerprintContext<'_>) -> bool {
        self.pair_matches(context.participants) || self.markers_match(context.combined_text)
    }

    fn outcome(&self) -> ForcedOutcome {
        self.outcome
    }
}

/// Built-in fingerprints, kept for parity with existing fixtures.
pub fn default_fingerprints() -> Vec<Box<dyn Fingerprint + Send + Sync>> {
    vec![Box::new(
        SignatureFingerprint::new("reality-denial-standoff")
            .with_participants("Leah", "Ryan")
            .with_quote_markers([
                "you're twisting my words",
                "i never said that",
                "you always do this",
            ])
            .with_forced_score(DEFAULT_FORCED_SCORE),
    )]
}
