use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use common::configuration::DetectorSettings;
use common::consts::{DEFAULT_HEALTHY_SCORE_THRESHOLD, DEFAULT_MAX_UTTERANCES};

use super::catalogue::{catalogue, FlagCategory, PatternRule};
use super::suppression::first_suppressing_stage;
use super::transcript::{tokenize, TranscriptContext, Utterance};

/// A quoted line supporting a red flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagExample {
    pub text: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Category display name, e.g. "Gaslighting". Free-form for flags
    /// supplied by an upstream analysis.
    #[serde(rename = "type")]
    pub flag_type: String,
    pub description: String,
    pub severity: u8,
    #[serde(default)]
    pub examples: Vec<FlagExample>,
    #[serde(default)]
    pub participant: Option<String>,
}

impl RedFlag {
    fn from_match(rule: &PatternRule, utterance: &Utterance) -> Self {
        Self {
            flag_type: rule.category.to_string(),
            description: rule.description.to_string(),
            severity: rule.severity,
            examples: vec![FlagExample {
                text: utterance.raw_text().to_string(),
                from: utterance.speaker.clone(),
            }],
            participant: Some(utterance.speaker.clone()),
        }
    }
}

/// Rule-based red flag detector.
#[derive(Debug, Clone)]
pub struct RedFlagDetector {
    /// Health scores at or above this skip detection
    healthy_score_threshold: f64,
    /// Keep critical safety rules active above the threshold
    exempt_critical_safety: bool,
    /// Utterances beyond this are ignored (prevents unbounded computation)
    max_utterances: usize,
}

impl RedFlagDetector {
    pub fn new() -> Self {
        Self {
            healthy_score_threshold: DEFAULT_HEALTHY_SCORE_THRESHOLD,
            exempt_critical_safety: false,
            max_utterances: DEFAULT_MAX_UTTERANCES,
        }
    }

    pub fn from_settings(settings: &DetectorSettings) -> Self {
        Self {
            healthy_score_threshold: settings
                .healthy_score_threshold
                .unwrap_or(DEFAULT_HEALTHY_SCORE_THRESHOLD),
            exempt_critical_safety: settings
                .exempt_critical_safety_from_health_bypass
                .unwrap_or(false),
            max_utterances: settings.max_utterances.unwrap_or(DEFAULT_MAX_UTTERANCES),
        }
    }

    pub fn with_critical_safety_exemption(mut self, exempt: bool) -> Self {
        self.exempt_critical_safety = exempt;
        self
    }

    /// Scan a newline-delimited transcript and return at most one flag per
    /// category, in the order they were first found.
    pub fn detect(&self, conversation: &str, health_score: Option<f64>) -> Vec<RedFlag> {
        if conversation.trim().is_empty() {
            return Vec::new();
        }

        let critical_only = match health_score {
            Some(score) if score >= self.healthy_score_threshold => {
                if !self.exempt_critical_safety {
                    debug!(
                        health_score = score,
                        threshold = self.healthy_score_threshold,
                        "health score above threshold, skipping red flag detection"
                    );
                    return Vec::new();
                }
                true
            }
            _ => false,
        };

        let mut utterances = tokenize(conversation);
        if utterances.len() > self.max_utterances {
            warn!(
                utterances = utterances.len(),
                max_utterances = self.max_utterances,
                "transcript truncated for red flag detection"
            );
            utterances.truncate(self.max_utterances);
        }

        let context = TranscriptContext::build(&utterances);
        let mut found: HashSet<FlagCategory> = HashSet::new();
        let mut flags = Vec::new();

        for utterance in &utterances {
            for rule in catalogue() {
                if found.contains(&rule.category) {
                    continue;
                }
                if critical_only && !rule.is_critical_safety() {
                    continue;
                }
                if !rule.is_match(&utterance.text.normalized) {
                    continue;
                }

                if let Some(stage) = first_suppressing_stage(rule.category, utterance, &context) {
                    debug!(
                        category = %rule.category,
                        stage = stage.name(),
                        speaker = %utterance.speaker,
                        index = utterance.index,
                        "suppressed pattern match"
                    );
                    continue;
                }

                found.insert(rule.category);
                flags.push(RedFlag::from_match(rule, utterance));
            }
        }

        debug!(
            utterances = utterances.len(),
            flags = flags.len(),
            critical_only,
            "red flag detection complete"
        );

        flags
    }
}

impl Default for RedFlagDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect red flags with the default settings.
pub fn detect_red_flags(conversation: &str, health_score: Option<f64>) -> Vec<RedFlag> {
    RedFlagDetector::new().detect(conversation, health_score)
}

/// Combine detected flags with an externally supplied list. Detected flags
/// come first; external flags are appended unless their type (compared
/// case-insensitively) is already present.
pub fn merge_red_flags(detected: Vec<RedFlag>, external: Vec<RedFlag>) -> Vec<RedFlag> {
    let mut seen: HashSet<String> = detected
        .iter()
        .map(|flag| flag.flag_type.trim().to_lowercase())
        .collect();
    let mut merged = detected;

    for flag in external {
        if seen.insert(flag.flag_type.trim().to_lowercase()) {
            merged.push(flag);
        }
    }

    merged
}
