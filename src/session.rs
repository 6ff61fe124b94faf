// src/session.rs
//! Explicit session object for the analysis workflow.
//!
//! Replaces ambient "current upload / current job description" state with a
//! context passed to each command: upload, set job description, request
//! analysis, clear. The in-flight guard lives in the `AnalysisClient` the
//! session borrows; the session itself only holds inputs and report values.

use crate::analysis::client::AnalysisClient;
use crate::analysis::types::{AnalysisError, AnalysisRequest, UsageInfo};
use crate::extract::{extract, DocumentKind, ExtractedDocument, ExtractionError};
use crate::report::catalog::SlotCatalog;
use crate::report::model::ReportValues;
use tracing::info;

#[derive(Debug, Default)]
pub struct ProfileSession {
    document: Option<ExtractedDocument>,
    job_description: String,
    values: ReportValues,
    catalog: SlotCatalog,
}

impl ProfileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest an uploaded file: extension check, extraction, and replacement
    /// of any previously held document. On failure the prior document is
    /// kept untouched.
    pub fn upload_document(
        &mut self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<&ExtractedDocument, ExtractionError> {
        let kind = DocumentKind::from_file_name(file_name)?;
        let text = extract(bytes, file_name)?;
        info!(
            "Extracted {} chars from {} ({:?})",
            text.len(),
            file_name,
            kind
        );

        Ok(self.document.insert(ExtractedDocument {
            source_file_name: file_name.to_string(),
            kind,
            text,
        }))
    }

    pub fn document(&self) -> Option<&ExtractedDocument> {
        self.document.as_ref()
    }

    pub fn clear_document(&mut self) {
        self.document = None;
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Reset all inputs and report values.
    pub fn clear_all(&mut self) {
        self.document = None;
        self.job_description.clear();
        self.values.clear();
    }

    pub fn values(&self) -> &ReportValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ReportValues {
        &mut self.values
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Build the request from current inputs, or the matching input error.
    pub fn analysis_request(&self) -> Result<AnalysisRequest, AnalysisError> {
        let cv_text = self
            .document
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_default();
        let request = AnalysisRequest::new(cv_text, self.job_description.clone());
        request.validate()?;
        Ok(request)
    }

    /// Run one analysis and fold the resulting record into the report
    /// values. Slot values are only written here and via `set`; errors leave
    /// them untouched.
    pub async fn request_analysis(
        &mut self,
        client: &AnalysisClient,
    ) -> Result<UsageInfo, AnalysisError> {
        let request = self.analysis_request()?;
        let outcome = client.analyze(&request).await?;
        self.values.apply_record(&outcome.record, &self.catalog);
        Ok(outcome.usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_replaces_previous_document() {
        let mut session = ProfileSession::new();
        session.upload_document(b"first cv", "a.txt").unwrap();
        session.upload_document(b"second cv", "b.txt").unwrap();
        assert_eq!(session.document().unwrap().text, "second cv");
        assert_eq!(session.document().unwrap().source_file_name, "b.txt");
    }

    #[test]
    fn test_failed_upload_keeps_prior_document() {
        let mut session = ProfileSession::new();
        session.upload_document(b"good cv", "a.txt").unwrap();
        assert!(session.upload_document(b"", "bad.rtf").is_err());
        assert_eq!(session.document().unwrap().text, "good cv");
    }

    #[test]
    fn test_analysis_request_requires_both_inputs() {
        let mut session = ProfileSession::new();
        assert!(matches!(
            session.analysis_request(),
            Err(AnalysisError::InvalidInput(_))
        ));

        session.upload_document(b"cv text", "cv.txt").unwrap();
        assert!(matches!(
            session.analysis_request(),
            Err(AnalysisError::InvalidInput(_))
        ));

        session.set_job_description("a job");
        assert!(session.analysis_request().is_ok());
    }

    #[test]
    fn test_clear_all_resets_state() {
        let mut session = ProfileSession::new();
        session.upload_document(b"cv", "cv.txt").unwrap();
        session.set_job_description("job");
        session.values_mut().set("full_name", "Jane");

        session.clear_all();
        assert!(session.document().is_none());
        assert!(session.job_description().is_empty());
        assert_eq!(session.values().get("full_name"), None);
    }
}
