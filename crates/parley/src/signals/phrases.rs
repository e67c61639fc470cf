//! Phrase lists consulted by the transcript context and the suppression
//! stages. All entries are lowercase and matched on word boundaries, except
//! [`CLEARLY_SUPPORTIVE`], which is a plain substring test.

/// Utterances containing any of these are never used as red flag evidence.
pub const CLEARLY_SUPPORTIVE: &[&str] = &[
    "always here for you",
    "here for you",
    "thank you",
    "thanks so much",
    "thanks for everything",
    "grateful",
    "i appreciate you",
    "proud of you",
    "means a lot",
];

// Nuance / hedging
pub const HEDGING: &[&str] = &[
    "maybe",
    "perhaps",
    "felt like",
    "feel like",
    "i think",
    "sometimes",
    "kind of",
    "sort of",
    "might",
    "it seems",
    "possibly",
];

pub const CANCELLATION: &[&str] = &[
    "cancel",
    "cancelled",
    "canceled",
    "canceling",
    "cancelling",
    "missed",
    "couldn't make it",
    "can't make it",
    "didn't show",
    "no-show",
    "stood me up",
    "bailed",
];

/// Apology or reschedule language that closes a cancellation thread.
pub const RESOLUTION: &[&str] = &[
    "sorry",
    "apologize",
    "reschedule",
    "make it up",
    "another time",
    "next week",
    "rain check",
    "my bad",
];

/// Short replies that avoid the conversation.
pub const EVASIVE_REPLY: &[&str] = &[
    "busy",
    "later",
    "gtg",
    "g2g",
    "can't talk",
    "idk",
    "k",
    "ok",
    "whatever",
    "not now",
    "brb",
    "ttyl",
];

/// Replies longer than this many tokens are never treated as evasive.
pub const EVASIVE_REPLY_MAX_TOKENS: usize = 4;

pub const EXPLICIT_DISENGAGEMENT: &[&str] = &[
    "done talking",
    "not talking",
    "done discussing",
    "not discussing",
    "leave me alone",
    "stop texting",
    "don't text me",
    "don't contact me",
    "i'm out",
    "goodbye",
    "done with this conversation",
];

pub const FRUSTRATION_OR_FATIGUE: &[&str] = &[
    "tired",
    "exhausted",
    "frustrated",
    "drained",
    "overwhelmed",
    "can't deal",
    "can't do this",
    "so done",
];

pub const CONTINUING_ENGAGEMENT: &[&str] = &[
    "not trying to",
    "want us to",
    "let's talk",
    "can we talk",
    "talk later",
    "talk tomorrow",
];

pub const CARING: &[&str] = &[
    "i care about you",
    "i love you",
    "i worry about you",
    "i'm worried about you",
    "i just want you to be happy",
    "i want what's best for you",
];

pub const LEVERAGE: &[&str] = &[
    "but you",
    "if you",
    "you should",
    "you need to",
    "you have to",
    "you owe",
];

pub const RECONCILIATION: &[&str] = &[
    "i'm sorry",
    "let's work on",
    "i want to fix",
    "can we talk",
    "work this out",
    "start over",
    "make this right",
];

pub const CONDITIONAL_LEVERAGE: &[&str] = &[
    "only if",
    "unless you",
    "if you don't",
    "as long as you",
    "or else",
];

pub const SUPPORTIVE_REPLY: &[&str] = &[
    "of course",
    "happy to help",
    "no problem",
    "anytime",
    "glad to help",
    "no worries",
    "my pleasure",
];

pub const APPRECIATION: &[&str] = &[
    "appreciate",
    "thanks",
    "thank you",
    "means a lot",
    "grateful",
];

pub const MANIPULATIVE_FRAMING: &[&str] = &[
    "after all",
    "after everything",
    "the least you",
    "you owe",
    "for once",
    "never do anything",
    "i guess",
];

pub const PROTECTIVE_CONTEXT: &[&str] = &[
    "police",
    "officer",
    "doctor",
    "hospital",
    "pediatrician",
    "medication",
    "medicine",
    "allergy",
    "asthma",
    "inhaler",
    "fever",
    "safety",
    "safe",
    "school called",
    "court order",
    "custody order",
    "cps",
    "social worker",
];

pub const NEUTRAL_AWARENESS: &[&str] = &[
    "i didn't realize",
    "i didn't know",
    "i didn't notice",
    "i wasn't aware",
    "i had no idea",
];

/// Dismissive, blame-avoidant or impact-minimizing clauses.
pub const DISMISSIVE: &[&str] = &[
    "whatever",
    "not my problem",
    "not my fault",
    "you should have told me",
    "how was i supposed to",
    "not a big deal",
    "no big deal",
    "overreacting",
    "get over it",
    "so what",
    "doesn't matter",
];

pub const WILLINGNESS_TO_IMPROVE: &[&str] = &[
    "next time",
    "will try",
    "i'll try",
    "i'll do better",
    "i'll make sure",
    "won't happen again",
    "i'll remember",
];
