pub mod client;
pub mod parse;
pub mod prompt;
pub mod types;

pub use client::AnalysisClient;
pub use parse::{parse_record, strip_code_fence};
pub use prompt::build_analysis_prompt;
pub use types::{AnalysisError, AnalysisOutcome, AnalysisRecord, AnalysisRequest, UsageInfo};
