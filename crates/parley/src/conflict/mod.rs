//! Conflict dynamics: per-participant escalation scoring over key quotes.

pub mod fingerprints;
pub mod lexicon;
pub mod narrative;
pub mod scorer;

pub use fingerprints::{default_fingerprints, Fingerprint, FingerprintContext, SignatureFingerprint};
pub use scorer::{
    analyze_conflict_dynamics, ConflictDynamicsResult, ConflictDynamicsScorer,
    ParticipantDynamics, Quote, Tendency,
};

use serde::{Deserialize, Serialize};

/// Subscription tier controlling example disclosure and narrative depth.
/// Parsing is case-insensitive; anything unrecognised is `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tier {
    #[default]
    Free,
    Personal,
    Pro,
    Instant,
}

impl Tier {
    pub fn parse(tier: &str) -> Self {
        match tier.trim().to_lowercase().as_str() {
            "personal" => Tier::Personal,
            "pro" => Tier::Pro,
            "instant" => Tier::Instant,
            _ => Tier::Free,
        }
    }

    /// Maximum examples retained per participant.
    pub fn example_limit(&self) -> usize {
        match self {
            Tier::Free => 0,
            Tier::Personal => 1,
            Tier::Pro | Tier::Instant => 3,
        }
    }

    pub fn prioritizes_reality_distortion(&self) -> bool {
        self.is_detailed()
    }

    pub fn includes_narrative(&self) -> bool {
        !matches!(self, Tier::Free)
    }

    pub fn is_detailed(&self) -> bool {
        matches!(self, Tier::Pro | Tier::Instant)
    }
}

impl From<&str> for Tier {
    fn from(value: &str) -> Self {
        Tier::parse(value)
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Tier::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::parse("PRO"), Tier::Pro);
        assert_eq!(Tier::parse(" personal "), Tier::Personal);
        assert_eq!(Tier::parse("instant"), Tier::Instant);
        assert_eq!(Tier::parse("enterprise"), Tier::Free);
        assert_eq!(Tier::parse(""), Tier::Free);
    }

    #[test]
    fn test_tier_serde() {
        let tier: Tier = serde_json::from_str("\"Instant\"").unwrap();
        assert_eq!(tier, Tier::Instant);
        let tier: Tier = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(tier, Tier::Free);
        assert_eq!(serde_json::to_string(&Tier::Personal).unwrap(), "\"personal\"");
    }

    #[test]
    fn test_tier_policies() {
        assert_eq!(Tier::Free.example_limit(), 0);
        assert_eq!(Tier::Personal.example_limit(), 1);
        assert_eq!(Tier::Pro.example_limit(), 3);
        assert!(!Tier::Free.includes_narrative());
        assert!(Tier::Personal.includes_narrative());
        assert!(!Tier::Personal.prioritizes_reality_distortion());
        assert!(Tier::Instant.is_detailed());
    }
}
