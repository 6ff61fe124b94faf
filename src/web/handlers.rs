// src/web/handlers.rs
//! Handlers for the analysis service endpoints.

use super::openai::{OpenAiClient, OpenAiError};
use super::types::{AnalyzeApiRequest, AnalyzeSuccessResponse, ApiErrorResponse, StatusResponse};
use crate::analysis::parse::parse_record;
use crate::analysis::prompt::{build_analysis_prompt, SYSTEM_PROMPT};
use crate::config::AppConfig;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

type ApiError = Custom<Json<ApiErrorResponse>>;

fn api_error(status: Status, error: &str, message: impl Into<String>) -> ApiError {
    Custom(status, Json(ApiErrorResponse::new(error, message)))
}

pub async fn status_handler(config: &State<AppConfig>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        api_key_configured: config.api_key_configured(),
        model: config.openai_model.clone(),
    })
}

pub async fn analyze_handler(
    request: Json<AnalyzeApiRequest>,
    config: &State<AppConfig>,
) -> Result<Json<AnalyzeSuccessResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let cv_text = request.cv_text.as_deref().unwrap_or("").trim();
    let job_description = request.job_description.as_deref().unwrap_or("").trim();

    if cv_text.is_empty() || job_description.is_empty() {
        return Err(api_error(
            Status::BadRequest,
            "Missing required fields",
            "Both cvText and jobDescription are required",
        ));
    }

    if !config.api_key_configured() {
        return Err(api_error(
            Status::InternalServerError,
            "API key not configured",
            "Please add your OpenAI API key to the .env file",
        ));
    }

    info!(
        "[{}] Starting analysis: cv={} chars, job={} chars",
        request_id,
        cv_text.len(),
        job_description.len()
    );

    let backend = OpenAiClient::from_config(config)
        .map_err(|e| map_backend_error(&request_id, e))?;

    let prompt = build_analysis_prompt(cv_text, job_description);
    let outcome = backend
        .complete(SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| map_backend_error(&request_id, e))?;

    // Same parsing logic as the client library: strip any fence the model
    // added despite instructions, then decode the record.
    let record = parse_record(&outcome.content).map_err(|e| {
        error!("[{}] Model output unparseable: {}", request_id, e);
        api_error(
            Status::InternalServerError,
            "Analysis failed",
            format!("The analysis response could not be parsed: {e}"),
        )
    })?;

    info!(
        "[{}] Analysis complete: {} fields, {} tokens",
        request_id,
        record.len(),
        outcome.usage.total_tokens
    );

    Ok(Json(AnalyzeSuccessResponse {
        success: true,
        data: record,
        usage: outcome.usage,
    }))
}

/// Map backend failures onto the public status taxonomy: 401 bad key, 402 no
/// quota, 429 rate limit, 500 for everything else with the backend's message
/// passed through.
fn map_backend_error(request_id: &Uuid, err: OpenAiError) -> ApiError {
    error!("[{}] Analysis error: {}", request_id, err);
    match err {
        OpenAiError::InvalidApiKey => api_error(
            Status::Unauthorized,
            "Invalid API key",
            "Your OpenAI API key is invalid. Please check your .env file.",
        ),
        OpenAiError::InsufficientQuota => api_error(
            Status::PaymentRequired,
            "Insufficient credits",
            "Your OpenAI account has no credits. Please add payment method at platform.openai.com",
        ),
        OpenAiError::RateLimited => api_error(
            Status::TooManyRequests,
            "Rate limit exceeded",
            "Too many requests. Please wait a moment and try again.",
        ),
        OpenAiError::Api(message) | OpenAiError::Transport(message) => api_error(
            Status::InternalServerError,
            "Analysis failed",
            if message.is_empty() {
                "An unexpected error occurred".to_string()
            } else {
                message
            },
        ),
    }
}
