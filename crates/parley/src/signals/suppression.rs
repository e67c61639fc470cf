//! Suppression pipeline: named predicate stages that veto a raw pattern
//! match before it becomes a red flag.
//!
//! Stages run in [`PIPELINE`] order and the first one that both applies to
//! the rule's category and fires wins. Each stage is a plain function over
//! the utterance and the transcript context so it can be tested alone.

use super::catalogue::FlagCategory;
use super::phrases::{
    APPRECIATION, CANCELLATION, CARING, CLEARLY_SUPPORTIVE, CONDITIONAL_LEVERAGE,
    CONTINUING_ENGAGEMENT, DISMISSIVE, EXPLICIT_DISENGAGEMENT, FRUSTRATION_OR_FATIGUE, LEVERAGE,
    MANIPULATIVE_FRAMING, NEUTRAL_AWARENESS, PROTECTIVE_CONTEXT, RECONCILIATION,
    SUPPORTIVE_REPLY, WILLINGNESS_TO_IMPROVE,
};
use super::transcript::{TranscriptContext, Utterance};
use crate::text::NormalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionStage {
    /// Clearly supportive messages are never evidence. Applies to every category.
    SupportiveAllowList,
    NuancedSpeaker,
    ContinuedEngagement,
    CaringWithoutLeverage,
    SupportiveReply,
    ResolvedCancellation,
    ProtectiveReport,
    AwarenessWithoutDismissal,
}

pub const PIPELINE: [SuppressionStage; 8] = [
    SuppressionStage::SupportiveAllowList,
    SuppressionStage::NuancedSpeaker,
    SuppressionStage::ContinuedEngagement,
    SuppressionStage::CaringWithoutLeverage,
    SuppressionStage::SupportiveReply,
    SuppressionStage::ResolvedCancellation,
    SuppressionStage::ProtectiveReport,
    SuppressionStage::AwarenessWithoutDismissal,
];

impl SuppressionStage {
    pub fn name(&self) -> &'static str {
        match self {
            SuppressionStage::SupportiveAllowList => "supportive_allow_list",
            SuppressionStage::NuancedSpeaker => "nuanced_speaker",
            SuppressionStage::ContinuedEngagement => "continued_engagement",
            SuppressionStage::CaringWithoutLeverage => "caring_without_leverage",
            SuppressionStage::SupportiveReply => "supportive_reply",
            SuppressionStage::ResolvedCancellation => "resolved_cancellation",
            SuppressionStage::ProtectiveReport => "protective_report",
            SuppressionStage::AwarenessWithoutDismissal => "awareness_without_dismissal",
        }
    }

    pub fn applies_to(&self, category: FlagCategory) -> bool {
        use FlagCategory::*;

        match self {
            SuppressionStage::SupportiveAllowList => true,
            SuppressionStage::NuancedSpeaker => category == AllOrNothingThinking,
            SuppressionStage::ContinuedEngagement => category == EmotionalWithdrawal,
            SuppressionStage::CaringWithoutLeverage => category == EmotionalManipulation,
            SuppressionStage::SupportiveReply => category == GuiltTripping,
            SuppressionStage::ResolvedCancellation => {
                matches!(category, GuiltTripping | PassiveAggression | BlameShifting)
            }
            SuppressionStage::ProtectiveReport => {
                matches!(
                    category,
                    CustodyViolation | LegalIntimidation | CrisisEscalation
                )
            }
            SuppressionStage::AwarenessWithoutDismissal => category == Passivity,
        }
    }

    pub fn suppresses(&self, utterance: &Utterance, context: &TranscriptContext) -> bool {
        match self {
            SuppressionStage::SupportiveAllowList => is_clearly_supportive(&utterance.text),
            SuppressionStage::NuancedSpeaker => context.is_nuanced(&utterance.speaker),
            SuppressionStage::ContinuedEngagement => {
                context.speaks_after(&utterance.speaker, utterance.index)
                    || is_fatigue_without_disengagement(&utterance.text)
                    || utterance.text.contains_any(CONTINUING_ENGAGEMENT)
            }
            SuppressionStage::CaringWithoutLeverage => {
                is_care_without_leverage(&utterance.text)
                    || is_reconciliation_without_conditions(&utterance.text)
            }
            SuppressionStage::SupportiveReply => {
                utterance.text.contains_any(SUPPORTIVE_REPLY)
                    || (is_genuine_appreciation(&utterance.text)
                        && context.has_reciprocal_positive_reply(&utterance.speaker))
            }
            SuppressionStage::ResolvedCancellation => {
                (utterance.text.contains_any(CANCELLATION)
                    || context.cancellation_open_at(utterance.index))
                    && context.resolved_after(utterance.index)
            }
            SuppressionStage::ProtectiveReport => {
                utterance.text.contains_any(PROTECTIVE_CONTEXT)
                    && context.other_party_evasive(&utterance.speaker)
            }
            SuppressionStage::AwarenessWithoutDismissal => {
                is_awareness_without_dismissal(&utterance.text)
                    || utterance.text.contains_any(WILLINGNESS_TO_IMPROVE)
            }
        }
    }
}

/// First stage in pipeline order that vetoes a match of `category` in `utterance`.
pub fn first_suppressing_stage(
    category: FlagCategory,
    utterance: &Utterance,
    context: &TranscriptContext,
) -> Option<SuppressionStage> {
    PIPELINE
        .into_iter()
        .filter(|stage| stage.applies_to(category))
        .find(|stage| stage.suppresses(utterance, context))
}

/// Substring match, so any utterance containing an allow-listed phrase is
/// excluded even inside a longer word.
pub fn is_clearly_supportive(text: &NormalizedText) -> bool {
    text.mentions_any(CLEARLY_SUPPORTIVE)
}

pub fn is_fatigue_without_disengagement(text: &NormalizedText) -> bool {
    text.contains_any(FRUSTRATION_OR_FATIGUE) && !text.contains_any(EXPLICIT_DISENGAGEMENT)
}

/// "I care about you" alone is never enough.
pub fn is_care_without_leverage(text: &NormalizedText) -> bool {
    text.contains_any(CARING) && !text.contains_any(LEVERAGE)
}

pub fn is_reconciliation_without_conditions(text: &NormalizedText) -> bool {
    text.contains_any(RECONCILIATION) && !text.contains_any(CONDITIONAL_LEVERAGE)
}

pub fn is_genuine_appreciation(text: &NormalizedText) -> bool {
    text.contains_any(APPRECIATION) && !text.contains_any(MANIPULATIVE_FRAMING)
}

pub fn is_awareness_without_dismissal(text: &NormalizedText) -> bool {
    text.contains_any(NEUTRAL_AWARENESS) && !text.contains_any(DISMISSIVE)
}
