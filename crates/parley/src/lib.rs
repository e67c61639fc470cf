pub mod conflict;
pub mod errors;
pub mod report;
pub mod signals;
pub mod text;
pub mod utils;

pub use conflict::{analyze_conflict_dynamics, ConflictDynamicsResult, Quote, Tendency, Tier};
pub use report::{AnalysisEngine, AnalysisReport, AnalysisRequest};
pub use signals::{detect_red_flags, merge_red_flags, RedFlag};
