// src/report/export/mod.rs
//! Report export: paginated PDF (contract A) and Word-compatible flow
//! document (contract B). Both build the full artifact in memory; a failure
//! at any point yields `ExportFailed` and no partial output.

pub mod pdf;
pub mod word;

use crate::report::model::ReportValues;
use thiserror::Error;

pub use pdf::export_pdf;
pub use word::{export_word, WORD_MIME_TYPE};

/// File-name stem shared by both artifacts.
const FILE_STEM_PREFIX: &str = "Kinspire_CoreHire";
const DEFAULT_CANDIDATE: &str = "Candidate";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export failed: {0}")]
    ExportFailed(String),
}

/// `Kinspire_CoreHire_<candidate name>` with the literal default when the
/// name slot is empty. Extension is the exporter's concern.
pub fn export_file_stem(values: &ReportValues) -> String {
    let name = values
        .get("full_name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_CANDIDATE);
    format!("{}_{}", FILE_STEM_PREFIX, name)
}
