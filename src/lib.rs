pub mod analysis;
pub mod cli;
pub mod config;
pub mod extract;
pub mod report;
pub mod session;
pub mod utils;
pub mod web;

pub use analysis::client::AnalysisClient;
pub use analysis::types::{AnalysisError, AnalysisOutcome, AnalysisRecord, AnalysisRequest};
pub use config::AppConfig;
pub use extract::{extract, DocumentKind, ExtractedDocument, ExtractionError};
pub use report::catalog::SlotCatalog;
pub use report::model::ReportValues;
pub use session::ProfileSession;
pub use web::start_web_server;
