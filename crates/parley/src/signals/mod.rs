//! Red flag detection over multi-speaker chat transcripts.
//!
//! A transcript is tokenized into attributed utterances, every utterance is
//! tested against the ordered [`catalogue`](catalogue::catalogue), and each
//! raw match passes through the [`suppression`] pipeline before it is
//! recorded. At most one flag is emitted per category.

pub mod catalogue;
pub mod phrases;
pub mod red_flags;
pub mod suppression;
pub mod transcript;

pub use catalogue::{FlagCategory, PatternRule};
pub use red_flags::{detect_red_flags, merge_red_flags, FlagExample, RedFlag, RedFlagDetector};
pub use transcript::{tokenize, TranscriptContext, Utterance};

use regex::Regex;
use tracing::error;

/// Compile a built-in pattern, logging instead of panicking if it is invalid.
pub(crate) fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            error!(pattern = %pattern, error = %err, "failed to compile pattern, rule disabled");
            None
        }
    }
}
