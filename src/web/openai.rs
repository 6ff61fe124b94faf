// src/web/openai.rs
//! Chat-completions client for the model backend.
//!
//! The backend's failure modes that matter to users (bad key, no credits,
//! rate limit) are detected here from the error body's `code` field, with the
//! HTTP status as fallback, and surfaced as typed variants the handler maps
//! onto the public status taxonomy.

use crate::analysis::types::UsageInfo;
use crate::config::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("the API key was rejected")]
    InvalidApiKey,
    #[error("the account has insufficient quota")]
    InsufficientQuota,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("backend error: {0}")]
    Api(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: ChatUsage,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize, Default)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: ApiErrorDetail,
}

#[derive(Deserialize, Default)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

pub struct ChatOutcome {
    pub content: String,
    pub usage: UsageInfo,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Requires a configured key; the handler checks `api_key_configured`
    /// before constructing one.
    pub fn from_config(config: &AppConfig) -> Result<Self, OpenAiError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| OpenAiError::Api("no API key in configuration".to_string()))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| OpenAiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    /// One chat completion: system instruction plus the analysis prompt.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ChatOutcome, OpenAiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        info!("Calling model backend: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| OpenAiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OpenAiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let classified = classify_api_error(status.as_u16(), &body);
            error!("Model backend error {}: {}", status, classified);
            return Err(classified);
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| OpenAiError::Api(format!("unreadable completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OpenAiError::Api("completion had no choices".to_string()))?;

        Ok(ChatOutcome {
            content,
            usage: UsageInfo {
                prompt_tokens: parsed.usage.prompt_tokens,
                completion_tokens: parsed.usage.completion_tokens,
                total_tokens: parsed.usage.total_tokens,
            },
        })
    }
}

/// The backend reports quota and rate-limit failures with overlapping HTTP
/// statuses; the error `code` is authoritative, the status is the fallback.
fn classify_api_error(status: u16, body: &str) -> OpenAiError {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).unwrap_or_default();

    match envelope.error.code.as_deref() {
        Some("invalid_api_key") => return OpenAiError::InvalidApiKey,
        Some("insufficient_quota") => return OpenAiError::InsufficientQuota,
        Some("rate_limit_exceeded") => return OpenAiError::RateLimited,
        _ => {}
    }

    match status {
        401 => OpenAiError::InvalidApiKey,
        429 => OpenAiError::RateLimited,
        _ => OpenAiError::Api(if envelope.error.message.is_empty() {
            format!("backend returned status {}", status)
        } else {
            envelope.error.message
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_takes_precedence_over_status() {
        let body = r#"{"error":{"message":"quota","code":"insufficient_quota"}}"#;
        assert!(matches!(
            classify_api_error(429, body),
            OpenAiError::InsufficientQuota
        ));
    }

    #[test]
    fn test_status_fallback() {
        assert!(matches!(
            classify_api_error(401, "{}"),
            OpenAiError::InvalidApiKey
        ));
        assert!(matches!(
            classify_api_error(429, "{}"),
            OpenAiError::RateLimited
        ));
        assert!(matches!(
            classify_api_error(503, "not even json"),
            OpenAiError::Api(_)
        ));
    }

    #[test]
    fn test_api_error_carries_backend_message() {
        let body = r#"{"error":{"message":"model overloaded"}}"#;
        assert!(
            matches!(classify_api_error(500, body), OpenAiError::Api(msg) if msg == "model overloaded")
        );
    }
}
