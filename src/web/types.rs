// src/web/types.rs
use crate::analysis::types::{AnalysisRecord, UsageInfo};
use rocket::serde::{Deserialize, Serialize};

/// `GET /api/status` body. This endpoint never errors: a missing key is
/// reported as `apiKeyConfigured: false`, not as a fault.
#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub model: String,
}

/// `POST /api/analyze` body. Fields are optional at the wire level so that
/// their absence maps to the contract's 400, not a framework-level reject.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalyzeApiRequest {
    #[serde(default)]
    pub cv_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalyzeSuccessResponse {
    pub success: bool,
    pub data: AnalysisRecord,
    pub usage: UsageInfo,
}

/// Classified error body: `error` is the stable marker, `message` the
/// human-readable remediation.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
