//! The ordered catalogue of red flag pattern rules.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::compile_pattern;

/// Severity at or above which a rule is a critical safety override.
pub const CRITICAL_SEVERITY: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagCategory {
    #[serde(rename = "All-or-Nothing Thinking")]
    AllOrNothingThinking,
    #[serde(rename = "Guilt Tripping")]
    GuiltTripping,
    #[serde(rename = "Gaslighting")]
    Gaslighting,
    #[serde(rename = "Emotional Manipulation")]
    EmotionalManipulation,
    #[serde(rename = "Emotional Withdrawal")]
    EmotionalWithdrawal,
    #[serde(rename = "Blame Shifting")]
    BlameShifting,
    #[serde(rename = "Victim Mentality")]
    VictimMentality,
    #[serde(rename = "Moving the Goalposts")]
    MovingTheGoalposts,
    #[serde(rename = "Love Bombing")]
    LoveBombing,
    #[serde(rename = "Dismissing/Invalidating")]
    DismissingInvalidating,
    #[serde(rename = "Dominance/Control")]
    DominanceControl,
    #[serde(rename = "Passive Aggression")]
    PassiveAggression,
    #[serde(rename = "Emotional Blackmail")]
    EmotionalBlackmail,
    #[serde(rename = "Passivity")]
    Passivity,
    #[serde(rename = "Custody Violation")]
    CustodyViolation,
    #[serde(rename = "Child Welfare Violations")]
    ChildWelfareViolations,
    #[serde(rename = "Medical Control")]
    MedicalControl,
    #[serde(rename = "Legal Intimidation")]
    LegalIntimidation,
    #[serde(rename = "Crisis Escalation")]
    CrisisEscalation,
    #[serde(rename = "Self-harm/Suicide Threats")]
    SelfHarmSuicideThreats,
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::AllOrNothingThinking => "All-or-Nothing Thinking",
            FlagCategory::GuiltTripping => "Guilt Tripping",
            FlagCategory::Gaslighting => "Gaslighting",
            FlagCategory::EmotionalManipulation => "Emotional Manipulation",
            FlagCategory::EmotionalWithdrawal => "Emotional Withdrawal",
            FlagCategory::BlameShifting => "Blame Shifting",
            FlagCategory::VictimMentality => "Victim Mentality",
            FlagCategory::MovingTheGoalposts => "Moving the Goalposts",
            FlagCategory::LoveBombing => "Love Bombing",
            FlagCategory::DismissingInvalidating => "Dismissing/Invalidating",
            FlagCategory::DominanceControl => "Dominance/Control",
            FlagCategory::PassiveAggression => "Passive Aggression",
            FlagCategory::EmotionalBlackmail => "Emotional Blackmail",
            FlagCategory::Passivity => "Passivity",
            FlagCategory::CustodyViolation => "Custody Violation",
            FlagCategory::ChildWelfareViolations => "Child Welfare Violations",
            FlagCategory::MedicalControl => "Medical Control",
            FlagCategory::LegalIntimidation => "Legal Intimidation",
            FlagCategory::CrisisEscalation => "Crisis Escalation",
            FlagCategory::SelfHarmSuicideThreats => "Self-harm/Suicide Threats",
        }
    }

    /// Categories that are safety overrides regardless of rule severity.
    pub fn is_always_critical(&self) -> bool {
        matches!(
            self,
            FlagCategory::ChildWelfareViolations
                | FlagCategory::MedicalControl
                | FlagCategory::LegalIntimidation
        )
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled rule. Patterns run against normalized (lowercased,
/// ASCII-punctuated) message text.
#[derive(Debug)]
pub struct PatternRule {
    pub category: FlagCategory,
    pub description: &'static str,
    pub severity: u8,
    pattern: Regex,
}

impl PatternRule {
    pub fn is_match(&self, normalized_text: &str) -> bool {
        self.pattern.is_match(normalized_text)
    }

    pub fn is_critical_safety(&self) -> bool {
        self.severity >= CRITICAL_SEVERITY || self.category.is_always_critical()
    }
}

struct RuleDef {
    category: FlagCategory,
    pattern: &'static str,
    description: &'static str,
    severity: u8,
}

macro_rules! rule {
    ($category:ident, $pattern:expr, $description:expr, $severity:expr) => {
        RuleDef {
            category: FlagCategory::$category,
            pattern: $pattern,
            description: $description,
            severity: $severity,
        }
    };
}

// Order matters: earlier rules win within an utterance.
const RULE_DEFS: &[RuleDef] = &[
    rule!(
        SelfHarmSuicideThreats,
        r"\b(kill|hurt|harm) myself\b|\bend (it all|my life)\b|\b(don't|do not) want to (live|be alive)\b",
        "Statements of self-harm or suicidal intent, including threats used as leverage",
        10
    ),
    rule!(
        CustodyViolation,
        r"\byou('ll| will) never see (the kids|the children|them|your (son|daughter|kids|children)) again\b",
        "Threatening to cut off a parent's access to their children",
        9
    ),
    rule!(
        CustodyViolation,
        r"\b(i'm|i am) (keeping|taking) (the kids|the children|the baby)\b",
        "Withholding children outside of an agreed arrangement",
        9
    ),
    rule!(
        ChildWelfareViolations,
        r"\b(left|leave|leaving) (the kids|the children|the baby) (home )?alone\b",
        "Leaving children unsupervised",
        8
    ),
    rule!(
        ChildWelfareViolations,
        r"\b(didn't|did not|won't|will not) (feed|pick up) (the kids|the children|the baby)\b",
        "Neglecting children's basic needs",
        8
    ),
    rule!(
        MedicalControl,
        r"\byou (don't|do not) need (your|that|the) (medication|meds|doctor|therapy|therapist)\b|\b(stop|quit) taking your (medication|meds)\b",
        "Interfering with someone's medical care or treatment",
        8
    ),
    rule!(
        LegalIntimidation,
        r"\bmy lawyer will\b|\b(i'll|i will) (take you to court|have you arrested|report you)\b|\bsee you in court\b",
        "Using legal threats to intimidate or coerce",
        8
    ),
    rule!(
        CrisisEscalation,
        r"\b(i'm|i am) (calling|going to call) (the police|911|the cops)\b",
        "Escalating a disagreement into an emergency response",
        7
    ),
    rule!(
        EmotionalBlackmail,
        r"\bif you (really|truly) (loved|cared about) me,? you (would|wouldn't)\b",
        "Making love or care conditional on compliance",
        8
    ),
    rule!(
        EmotionalBlackmail,
        r"\bif you leave,? i('ll| will)\b",
        "Threatening consequences to prevent the other person leaving",
        8
    ),
    rule!(
        Gaslighting,
        r"\b(that|it) never happened\b|\bi never said (that|it)\b",
        "Denying events or statements to make the other person doubt their memory",
        8
    ),
    rule!(
        Gaslighting,
        r"\byou('re| are) (imagining things|making (it|this|that|things) up)\b",
        "Telling the other person their perception is invented",
        8
    ),
    rule!(
        DominanceControl,
        r"\byou('re| are) not allowed to\b|\bi forbid you\b",
        "Dictating what the other person may do",
        7
    ),
    rule!(
        DominanceControl,
        r"\b(give|hand) me your (phone|passwords?)\b",
        "Demanding access to private accounts or devices",
        7
    ),
    rule!(
        EmotionalManipulation,
        r"\b(no one|nobody) (else )?(will|would) (ever )?(love|want|put up with) you\b",
        "Undermining self-worth to create dependence",
        7
    ),
    rule!(
        EmotionalManipulation,
        r"\bi (care about|love|worry about) you\b|\bi'm worried about you\b",
        "Caring language used as leverage",
        5
    ),
    rule!(
        BlameShifting,
        r"\byou made me (do|say) (it|that|this)\b",
        "Holding the other person responsible for one's own actions",
        7
    ),
    rule!(
        BlameShifting,
        r"\b(this|it)('s| is) (all )?your fault\b",
        "Assigning blame for a shared problem to one person",
        6
    ),
    rule!(
        GuiltTripping,
        r"\bafter (all|everything) i('ve| have)? done for you\b",
        "Invoking past sacrifices to induce guilt",
        6
    ),
    rule!(
        GuiltTripping,
        r"\bi (sacrificed|gave up) (so much|everything)\b",
        "Framing personal sacrifices as a debt",
        6
    ),
    rule!(
        GuiltTripping,
        r"\bi guess i'll (just )?(do it|handle it|deal with it) (myself|alone)\b",
        "Martyrdom used to make the other person feel guilty",
        4
    ),
    rule!(
        DismissingInvalidating,
        r"\byou('re| are) (too|being|so) (sensitive|dramatic|emotional)\b|\b(stop|quit) overreacting\b",
        "Dismissing the other person's feelings as invalid",
        6
    ),
    rule!(
        EmotionalWithdrawal,
        r"\b(i'm|i am) done (talking|discussing|with this conversation)\b|\b(i'm|i am) not (talking|discussing) (about )?(this|it) any ?more\b|\bleave me alone\b",
        "Shutting down communication to avoid the conversation (stonewalling)",
        6
    ),
    rule!(
        EmotionalWithdrawal,
        r"\bi (can't|cannot) (do|deal with) this any ?more\b",
        "Withdrawing from the conversation instead of engaging",
        5
    ),
    rule!(
        AllOrNothingThinking,
        r"\byou (always|never)\b",
        "Absolute language that frames behaviour as all-or-nothing",
        5
    ),
    rule!(
        AllOrNothingThinking,
        r"\b(nothing|everything) i do is\b",
        "Sweeping generalisations about an entire relationship",
        4
    ),
    rule!(
        MovingTheGoalposts,
        r"\b(it's|that's|it is|that is) still not (good )?enough\b",
        "Changing expectations once they have been met",
        5
    ),
    rule!(
        VictimMentality,
        r"\b(everyone|everybody) is (always )?against me\b|\bwhy does this always happen to me\b",
        "Casting oneself as a perpetual victim to deflect responsibility",
        4
    ),
    rule!(
        LoveBombing,
        r"\byou('re| are) (my|the) (everything|soulmate|only one)\b|\bnever (loved|felt this way about) anyone (like this|this much)\b",
        "Overwhelming affection used to gain influence",
        4
    ),
    rule!(
        PassiveAggression,
        r"\bthanks for nothing\b|\bmust be nice\b",
        "Indirect hostility expressed through sarcasm",
        4
    ),
    rule!(
        Passivity,
        r"\bi (didn't|did not) (realize|know|notice)\b|\bwhatever you (want|think|decide)\b",
        "Avoiding responsibility or engagement in decisions",
        3
    ),
];

static CATALOGUE: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    RULE_DEFS
        .iter()
        .filter_map(|def| {
            compile_pattern(def.pattern).map(|pattern| PatternRule {
                category: def.category,
                description: def.description,
                severity: def.severity,
                pattern,
            })
        })
        .collect()
});

/// All compiled rules in evaluation order. Rules whose pattern failed to
/// compile are absent (and were logged when the catalogue was built).
pub fn catalogue() -> &'static [PatternRule] {
    &CATALOGUE
}
