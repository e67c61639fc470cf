use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub version: String,
    pub detector: Option<DetectorSettings>,
    pub conflict: Option<ConflictSettings>,
    pub logging: Option<Logging>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: "v0.1".to_string(),
            detector: None,
            conflict: None,
            logging: None,
        }
    }
}

impl Configuration {
    /// Read, parse and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Configuration = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(detector) = &self.detector {
            if let Some(threshold) = detector.healthy_score_threshold {
                if !(0.0..=100.0).contains(&threshold) {
                    return Err(ConfigError::Invalid {
                        why: format!(
                            "detector.healthy_score_threshold must be within 0..=100, got {}",
                            threshold
                        ),
                    });
                }
            }
            if detector.max_utterances == Some(0) {
                return Err(ConfigError::Invalid {
                    why: "detector.max_utterances must be greater than zero".to_string(),
                });
            }
        }

        for fingerprint in self
            .conflict
            .as_ref()
            .and_then(|c| c.fingerprints.as_deref())
            .unwrap_or_default()
        {
            fingerprint.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetectorSettings {
    /// Health scores at or above this value skip red flag detection.
    pub healthy_score_threshold: Option<f64>,
    /// Keep running critical safety rules when the health score bypass applies.
    pub exempt_critical_safety_from_health_bypass: Option<bool>,
    pub max_utterances: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConflictSettings {
    /// Whether the built-in signature fingerprints are installed ahead of
    /// the configured ones. Defaults to true.
    pub include_default_fingerprints: Option<bool>,
    pub fingerprints: Option<Vec<FingerprintConfig>>,
}

/// A signature that forces both participants of a two-person conversation
/// to a fixed score when it matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintConfig {
    pub name: String,
    /// Exactly two names; matched case-insensitively in either order.
    pub participants: Option<Vec<String>>,
    /// Every marker must appear in the combined quote text.
    pub quote_markers: Option<Vec<String>>,
    pub forced_score: u8,
}

impl FingerprintConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                why: "fingerprint name must not be empty".to_string(),
            });
        }

        if let Some(participants) = &self.participants {
            if participants.len() != 2 {
                return Err(ConfigError::Invalid {
                    why: format!(
                        "fingerprint '{}' must name exactly two participants, got {}",
                        self.name,
                        participants.len()
                    ),
                });
            }
        }

        let has_markers = self
            .quote_markers
            .as_ref()
            .is_some_and(|markers| markers.iter().any(|m| !m.trim().is_empty()));
        if self.participants.is_none() && !has_markers {
            return Err(ConfigError::Invalid {
                why: format!(
                    "fingerprint '{}' needs participants or quote_markers",
                    self.name
                ),
            });
        }

        if self.forced_score > 100 {
            return Err(ConfigError::Invalid {
                why: format!(
                    "fingerprint '{}' forced_score must be within 0..=100, got {}",
                    self.name, self.forced_score
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Logging {
    /// Filter directive used when RUST_LOG is not set, e.g. "info" or "parley=debug".
    pub level: Option<String>,
}
