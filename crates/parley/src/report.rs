//! Combined analysis: red flags plus conflict dynamics for one request.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};
use uuid::Uuid;

use common::configuration::Configuration;

use crate::conflict::{ConflictDynamicsResult, ConflictDynamicsScorer, Quote, Tier};
use crate::signals::transcript::{participants, tokenize};
use crate::signals::{merge_red_flags, RedFlag, RedFlagDetector};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Correlates log lines; a random one is generated when absent.
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub conversation: String,
    #[serde(default)]
    pub health_score: Option<f64>,
    /// Flags from an upstream analysis, merged after the detected ones.
    #[serde(default)]
    pub external_red_flags: Vec<RedFlag>,
    #[serde(default)]
    pub key_quotes: Vec<Quote>,
    /// When absent, the transcript's speakers are used in first-seen order.
    #[serde(default)]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub red_flags: Vec<RedFlag>,
    pub conflict_dynamics: Option<ConflictDynamicsResult>,
}

#[derive(Debug, Default)]
pub struct AnalysisEngine {
    detector: RedFlagDetector,
    scorer: ConflictDynamicsScorer,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Configuration) -> Self {
        let detector = config
            .detector
            .as_ref()
            .map(RedFlagDetector::from_settings)
            .unwrap_or_default();
        let scorer = config
            .conflict
            .as_ref()
            .map(ConflictDynamicsScorer::from_settings)
            .unwrap_or_default();

        Self { detector, scorer }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let span = info_span!("analysis", request_id = %request_id);
        let _enter = span.enter();

        let detected = self
            .detector
            .detect(&request.conversation, request.health_score);
        let detected_count = detected.len();
        let red_flags = merge_red_flags(detected, request.external_red_flags.clone());

        let participant_names = match &request.participants {
            Some(names) => names.clone(),
            None => participants(&tokenize(&request.conversation)),
        };
        let conflict_dynamics =
            self.scorer
                .analyze(&request.key_quotes, &participant_names, request.tier);

        info!(
            detected = detected_count,
            red_flags = red_flags.len(),
            participants = participant_names.len(),
            tier = ?request.tier,
            conflict_dynamics = conflict_dynamics.is_some(),
            "analysis complete"
        );

        AnalysisReport {
            red_flags,
            conflict_dynamics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::Tendency;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_participants_discovered_from_transcript() {
        let request = AnalysisRequest {
            conversation: "Alex: You never listen to me!\nJamie: I'm sorry, I didn't realize that."
                .to_string(),
            key_quotes: vec![Quote {
                speaker: "Jamie".to_string(),
                quote: "I'm sorry".to_string(),
                analysis: String::new(),
            }],
            tier: Tier::Personal,
            ..Default::default()
        };

        let report = AnalysisEngine::new().analyze(&request);
        assert_eq!(report.red_flags.len(), 1);

        let dynamics = report.conflict_dynamics.unwrap();
        let names: Vec<&str> = dynamics.participants.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alex", "Jamie"]);
        assert_eq!(dynamics.participants["Jamie"].score, 55);
        assert_eq!(dynamics.participants["Jamie"].examples, vec!["I'm sorry"]);
    }

    #[test]
    fn test_whatsapp_system_notice_is_not_a_participant() {
        let request = AnalysisRequest {
            conversation: "12/03/2024, 21:14 - Messages and calls are end-to-end encrypted.\n\
                           12/03/2024, 21:15 - Leah: You always do this!\n\
                           12/03/2024, 21:16 - Ryan: I never said that"
                .to_string(),
            key_quotes: vec![
                Quote {
                    speaker: "Leah".to_string(),
                    quote: "You always do this!".to_string(),
                    analysis: String::new(),
                },
                Quote {
                    speaker: "Ryan".to_string(),
                    quote: "I never said that".to_string(),
                    analysis: String::new(),
                },
            ],
            tier: Tier::Pro,
            ..Default::default()
        };

        let report = AnalysisEngine::new().analyze(&request);
        assert!(report
            .red_flags
            .iter()
            .all(|f| f.participant.as_deref().is_some_and(|p| p == "Leah" || p == "Ryan")));

        let dynamics = report.conflict_dynamics.unwrap();
        let names: Vec<&str> = dynamics.participants.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Leah", "Ryan"]);
        for name in ["Leah", "Ryan"] {
            assert_eq!(dynamics.participants[name].tendency, Tendency::Escalates);
            assert_eq!(dynamics.participants[name].score, 20);
        }
    }

    #[test]
    fn test_no_quotes_means_no_dynamics() {
        let request = AnalysisRequest {
            conversation: "A: hi\nB: hello".to_string(),
            ..Default::default()
        };
        let report = AnalysisEngine::new().analyze(&request);
        assert!(report.red_flags.is_empty());
        assert_eq!(report.conflict_dynamics, None);
    }

    #[test]
    fn test_external_flags_merged() {
        let request: AnalysisRequest = serde_json::from_value(serde_json::json!({
            "conversation": "A: You never listen",
            "external_red_flags": [
                {"type": "Stonewalling", "description": "Refuses to engage", "severity": 6}
            ],
            "tier": "PRO"
        }))
        .unwrap();
        assert_eq!(request.tier, Tier::Pro);

        let report = AnalysisEngine::new().analyze(&request);
        let types: Vec<&str> = report.red_flags.iter().map(|f| f.flag_type.as_str()).collect();
        assert_eq!(types, vec!["All-or-Nothing Thinking", "Stonewalling"]);
    }

    #[test]
    fn test_engine_honours_configuration() {
        let config = Configuration::from_yaml_str(
            r#"
version: v0.1
detector:
  healthy_score_threshold: 90
conflict:
  include_default_fingerprints: false
"#,
        )
        .unwrap();
        let engine = AnalysisEngine::from_config(&config);

        // 87 is below the configured threshold, so detection runs.
        let request = AnalysisRequest {
            conversation: "A: You never listen".to_string(),
            health_score: Some(87.0),
            key_quotes: vec![Quote {
                speaker: "Leah".to_string(),
                quote: "thanks".to_string(),
                analysis: String::new(),
            }],
            participants: Some(vec!["Leah".to_string(), "Ryan".to_string()]),
            ..Default::default()
        };
        let report = engine.analyze(&request);
        assert_eq!(report.red_flags.len(), 1);

        let dynamics = report.conflict_dynamics.unwrap();
        assert_eq!(dynamics.participants["Leah"].score, 55);
    }
}
