//! Indicator lexicons for the conflict scorer. Matching is a case-insensitive
//! substring test, so several entries are stems ("accus", "apologiz").

use std::ops::Add;

use crate::text::normalize;

pub const ESCALATION_INDICATORS: [&str; 23] = [
    "attack",
    "blame",
    "fault",
    "gaslight",
    "always",
    "never",
    "ridiculous",
    "stupid",
    "shut up",
    "hate",
    "whatever",
    "yell",
    "scream",
    "threat",
    "accus",
    "liar",
    "lying",
    "pathetic",
    "useless",
    "sick of",
    "fed up",
    "dismiss",
    "insult",
];

pub const DE_ESCALATION_INDICATORS: [&str; 20] = [
    "listen",
    "acknowledge",
    "apologiz",
    "sorry",
    "understand",
    "clarify",
    "appreciate",
    "let's",
    "together",
    "calm",
    "compromise",
    "i respect",
    "hear you",
    "that's fair",
    "you're right",
    "thank",
    "support",
    "work through",
    "empath",
    "care about",
];

/// Higher-weight phrases that deny or rewrite the other person's experience.
pub const REALITY_DISTORTION_PHRASES: [&str; 10] = [
    "you always",
    "you never",
    "never said",
    "didn't happen",
    "never happened",
    "twisting my words",
    "making things up",
    "you're imagining",
    "that's not what happened",
    "you're crazy",
];

/// Phrases counted (with repetition) across all quotes for the mutual
/// escalation check.
pub const MUTUAL_ESCALATION_PHRASES: [&str; 12] = [
    "you always",
    "you never",
    "shut up",
    "i'm done",
    "whatever",
    "i don't care",
    "your fault",
    "you're crazy",
    "this is ridiculous",
    "leave me alone",
    "i hate",
    "you started",
];

pub const DE_ESCALATION_WEIGHT: i32 = 5;
pub const ESCALATION_WEIGHT: i32 = 7;
pub const REALITY_DISTORTION_WEIGHT: i32 = 10;
/// Extra escalation count added per reality-distortion match.
pub const REALITY_DISTORTION_ESCALATION_BONUS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorCounts {
    pub escalation: usize,
    pub de_escalation: usize,
    pub reality_distortion: usize,
}

impl IndicatorCounts {
    /// Count indicators present in `text`. Each indicator counts at most once.
    pub fn measure(text: &str) -> Self {
        let text = normalize(text);
        if text.is_empty() {
            return Self::default();
        }

        let count = |list: &[&str]| list.iter().filter(|term| text.contains(*term)).count();

        let reality_distortion = count(&REALITY_DISTORTION_PHRASES);
        Self {
            escalation: count(&ESCALATION_INDICATORS)
                + reality_distortion * REALITY_DISTORTION_ESCALATION_BONUS,
            de_escalation: count(&DE_ESCALATION_INDICATORS),
            reality_distortion,
        }
    }

    pub fn score_delta(&self) -> i32 {
        self.de_escalation as i32 * DE_ESCALATION_WEIGHT
            - self.escalation as i32 * ESCALATION_WEIGHT
            - self.reality_distortion as i32 * REALITY_DISTORTION_WEIGHT
    }

    pub fn is_empty(&self) -> bool {
        self.escalation == 0 && self.de_escalation == 0 && self.reality_distortion == 0
    }
}

impl Add for IndicatorCounts {
    type Output = IndicatorCounts;

    fn add(self, other: IndicatorCounts) -> IndicatorCounts {
        IndicatorCounts {
            escalation: self.escalation + other.escalation,
            de_escalation: self.de_escalation + other.de_escalation,
            reality_distortion: self.reality_distortion + other.reality_distortion,
        }
    }
}

/// Occurrences of mutual escalation phrases in already-lowercased text.
pub fn mutual_escalation_phrase_count(lowercase_text: &str) -> usize {
    MUTUAL_ESCALATION_PHRASES
        .iter()
        .map(|phrase| lowercase_text.matches(phrase).count())
        .sum()
}
