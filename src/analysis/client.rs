// src/analysis/client.rs
//! Client for the analysis service.
//!
//! One instance permits at most one in-flight analysis. The guard is an
//! explicit Idle/InFlight transition checked before any network work, and it
//! settles back to Idle on every exit path, success or error. Callers that
//! want to abandon a call must wait for it to settle before issuing another.

use super::parse::strip_code_fence;
use super::types::{AnalysisError, AnalysisOutcome, AnalysisRequest, UsageInfo};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Marker the service puts in the 500 body when no key is configured
/// server-side; distinguishes it from a generic backend fault.
const KEY_NOT_CONFIGURED_MARKER: &str = "API key not configured";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: String,
    pub api_key_configured: bool,
    pub model: String,
}

#[derive(Deserialize)]
struct AnalyzeEnvelope {
    success: bool,
    data: serde_json::Value,
    #[serde(default)]
    usage: UsageInfo,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

pub struct AnalysisClient {
    client: Client,
    base_url: String,
    in_flight: AtomicBool,
}

/// Resets the client to Idle when the call settles, whichever way it exits.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            in_flight: AtomicBool::new(false),
        })
    }

    /// Idle -> InFlight, or a rejection if a call is already running.
    fn begin_flight(&self) -> Result<FlightGuard<'_>, AnalysisError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AnalysisError::AnalysisInFlight)?;
        Ok(FlightGuard {
            flag: &self.in_flight,
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Check the service status. Never classifies - the status endpoint is
    /// specified to always answer, so any failure here is transport-level.
    pub async fn status(&self) -> Result<ServiceStatus> {
        let url = format!("{}/api/status", self.base_url);
        let status = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach analysis service")?
            .json::<ServiceStatus>()
            .await
            .context("Failed to parse status response")?;
        Ok(status)
    }

    /// Run one analysis. Validates inputs before any network call, holds the
    /// in-flight guard for the duration, and classifies every failure into
    /// the fixed taxonomy.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        request.validate()?;
        let _guard = self.begin_flight()?;

        info!(
            "Sending analysis request: cv={} chars, job={} chars",
            request.cv_text.len(),
            request.job_description.len()
        );

        let url = format!("{}/api/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::AnalysisFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::AnalysisFailed(e.to_string()))?;

        if !status.is_success() {
            let classified = classify_failure(status, &body);
            error!("Analysis request failed ({}): {}", status, classified);
            return Err(classified);
        }

        parse_success(&body)
    }
}

/// Map a non-2xx service response onto the error taxonomy. The two 500
/// variants are deliberately distinct by body marker.
pub fn classify_failure(status: StatusCode, body: &str) -> AnalysisError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    match status.as_u16() {
        400 => AnalysisError::InvalidInput(message_or(&parsed, "Missing required fields")),
        401 => AnalysisError::InvalidCredentials,
        402 => AnalysisError::QuotaExhausted,
        429 => AnalysisError::RateLimited,
        500 if parsed.error == KEY_NOT_CONFIGURED_MARKER => {
            AnalysisError::CredentialsNotConfigured
        }
        _ => AnalysisError::AnalysisFailed(message_or(&parsed, "Analysis failed")),
    }
}

fn message_or(body: &ErrorBody, fallback: &str) -> String {
    if !body.message.is_empty() {
        body.message.clone()
    } else if !body.error.is_empty() {
        body.error.clone()
    } else {
        fallback.to_string()
    }
}

fn parse_success(body: &str) -> Result<AnalysisOutcome, AnalysisError> {
    // The service answers bare JSON; stripping here guards against any
    // decoration slipping through from the model layer.
    let payload = strip_code_fence(body);

    let envelope: AnalyzeEnvelope = serde_json::from_str(payload)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    if !envelope.success {
        return Err(AnalysisError::AnalysisFailed(
            "service reported an unsuccessful analysis".to_string(),
        ));
    }

    let object = envelope.data.as_object().ok_or_else(|| {
        AnalysisError::MalformedResponse("analysis data is not a JSON object".to_string())
    })?;
    let record = crate::analysis::types::AnalysisRecord::from_json_object(object);
    info!("Analysis succeeded: {} fields returned", record.len());

    Ok(AnalysisOutcome {
        record,
        usage: envelope.usage,
    })
}
