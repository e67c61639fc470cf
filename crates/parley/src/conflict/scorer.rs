use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use common::configuration::ConflictSettings;

use super::fingerprints::{default_fingerprints, Fingerprint, FingerprintContext, SignatureFingerprint};
use super::lexicon::{mutual_escalation_phrase_count, IndicatorCounts};
use super::narrative::{self, Standing};
use super::Tier;
use crate::text::normalize;

pub const INITIAL_SCORE: i32 = 50;
pub const ESCALATES_BELOW: u8 = 40;
pub const DE_ESCALATES_ABOVE: u8 = 65;

// Mutual escalation heuristic
const MUTUAL_PHRASES_WITH_EXCLAMATIONS: usize = 3;
const MUTUAL_EXCLAMATIONS: usize = 3;
const MUTUAL_PHRASES_ALONE: usize = 5;
const MUTUAL_ALL_SCORES_BELOW: i32 = 45;
const MUTUAL_SCORE_CAP: i32 = 30;

/// A key quote selected upstream, with that step's commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub speaker: String,
    pub quote: String,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tendency {
    Escalates,
    DeEscalates,
    Mixed,
}

impl Tendency {
    pub fn from_score(score: u8) -> Self {
        if score < ESCALATES_BELOW {
            Tendency::Escalates
        } else if score > DE_ESCALATES_ABOVE {
            Tendency::DeEscalates
        } else {
            Tendency::Mixed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDynamics {
    pub tendency: Tendency,
    pub examples: Vec<String>,
    /// 0..=100, higher is more constructive.
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDynamicsResult {
    pub summary: String,
    pub participants: BTreeMap<String, ParticipantDynamics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug)]
struct ParticipantState {
    name: String,
    key: String,
    score: i32,
    examples: Vec<String>,
}

impl ParticipantState {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: name.to_lowercase(),
            score: INITIAL_SCORE,
            examples: Vec::new(),
        }
    }

    fn apply(&mut self, counts: &IndicatorCounts) {
        self.score = (self.score + counts.score_delta()).clamp(0, 100);
    }

    fn retain_example(&mut self, quote: &str, distorting: bool, tier: Tier) {
        let limit = tier.example_limit();
        if limit == 0 {
            return;
        }

        if distorting && tier.prioritizes_reality_distortion() {
            self.examples.insert(0, quote.to_string());
        } else if self.examples.len() < limit {
            self.examples.push(quote.to_string());
        }
        self.examples.truncate(limit);
    }

    fn final_score(&self) -> u8 {
        self.score.clamp(0, 100) as u8
    }
}

/// Scores participants from key quotes and applies the two-party overrides.
pub struct ConflictDynamicsScorer {
    fingerprints: Vec<Box<dyn Fingerprint + Send + Sync>>,
}

impl ConflictDynamicsScorer {
    pub fn new() -> Self {
        Self {
            fingerprints: default_fingerprints(),
        }
    }

    pub fn with_fingerprints(fingerprints: Vec<Box<dyn Fingerprint + Send + Sync>>) -> Self {
        Self { fingerprints }
    }

    pub fn from_settings(settings: &ConflictSettings) -> Self {
        let mut fingerprints = if settings.include_default_fingerprints.unwrap_or(true) {
            default_fingerprints()
        } else {
            Vec::new()
        };

        for config in settings.fingerprints.iter().flatten() {
            fingerprints.push(Box::new(SignatureFingerprint::from_config(config)));
        }

        Self { fingerprints }
    }

    pub fn fingerprint_names(&self) -> Vec<&str> {
        self.fingerprints.iter().map(|f| f.name()).collect()
    }

    pub fn analyze(
        &self,
        key_quotes: &[Quote],
        participant_names: &[String],
        tier: Tier,
    ) -> Option<ConflictDynamicsResult> {
        if key_quotes.is_empty() || participant_names.is_empty() {
            return None;
        }

        let mut states = distinct_participants(participant_names);
        if states.is_empty() {
            return None;
        }

        for quote in key_quotes {
            let speaker = quote.speaker.trim().to_lowercase();
            let Some(state) = states.iter_mut().find(|s| s.key == speaker) else {
                debug!(speaker = %quote.speaker, "quote from unknown participant skipped");
                continue;
            };

            let counts =
                IndicatorCounts::measure(&quote.quote) + IndicatorCounts::measure(&quote.analysis);
            state.apply(&counts);

            if !counts.is_empty() {
                state.retain_example(&quote.quote, counts.reality_distortion > 0, tier);
            }
        }

        if states.len() == 2 {
            self.apply_two_party_overrides(key_quotes, &mut states);
        }

        let standings: Vec<Standing<'_>> = states
            .iter()
            .map(|s| {
                let score = s.final_score();
                Standing {
                    name: &s.name,
                    score,
                    tendency: Tendency::from_score(score),
                }
            })
            .collect();

        let summary = narrative::summarize(&standings);
        let interaction = narrative::interaction(&standings, tier);
        let recommendations = narrative::recommendations(&standings, tier);

        let participants = states
            .iter()
            .map(|s| {
                let score = s.final_score();
                (
                    s.name.clone(),
                    ParticipantDynamics {
                        tendency: Tendency::from_score(score),
                        examples: s.examples.clone(),
                        score,
                    },
                )
            })
            .collect();

        Some(ConflictDynamicsResult {
            summary,
            participants,
            interaction,
            recommendations,
        })
    }

    fn apply_two_party_overrides(&self, key_quotes: &[Quote], states: &mut [ParticipantState]) {
        let raw_combined = key_quotes
            .iter()
            .map(|q| q.quote.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let combined = normalize(&raw_combined);
        let names: Vec<String> = states.iter().map(|s| s.name.clone()).collect();

        let context = FingerprintContext {
            participants: &names,
            combined_text: &combined,
        };

        if let Some(fingerprint) = self.fingerprints.iter().find(|f| f.matches(&context)) {
            let outcome = fingerprint.outcome();
            info!(
                fingerprint = fingerprint.name(),
                score = outcome.score,
                "signature fingerprint matched"
            );
            for state in states.iter_mut() {
                state.score = i32::from(outcome.score);
            }
            return;
        }

        let phrases = mutual_escalation_phrase_count(&combined);
        let exclamations = raw_combined.matches('!').count();
        let all_low = states.iter().all(|s| s.score < MUTUAL_ALL_SCORES_BELOW);

        if (phrases >= MUTUAL_PHRASES_WITH_EXCLAMATIONS && exclamations >= MUTUAL_EXCLAMATIONS)
            || phrases >= MUTUAL_PHRASES_ALONE
            || all_low
        {
            debug!(phrases, exclamations, all_low, "mutual escalation detected");
            for state in states.iter_mut() {
                state.score = state.score.min(MUTUAL_SCORE_CAP);
            }
        }
    }
}

impl Default for ConflictDynamicsScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConflictDynamicsScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictDynamicsScorer")
            .field("fingerprints", &self.fingerprint_names())
            .finish()
    }
}

/// Trimmed, non-empty names with case-insensitive duplicates removed,
/// keeping the first spelling.
fn distinct_participants(names: &[String]) -> Vec<ParticipantState> {
    let mut states: Vec<ParticipantState> = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let key = name.to_lowercase();
        if !states.iter().any(|s| s.key == key) {
            states.push(ParticipantState::new(name));
        }
    }
    states
}

/// Score conflict dynamics with the built-in fingerprints.
pub fn analyze_conflict_dynamics(
    key_quotes: &[Quote],
    participant_names: &[String],
    tier: Tier,
) -> Option<ConflictDynamicsResult> {
    ConflictDynamicsScorer::new().analyze(key_quotes, participant_names, tier)
}
