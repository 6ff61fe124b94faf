// src/config.rs
//! Unified configuration loading - everything comes from the environment

use serde::Deserialize;
use tracing::info;

/// Placeholder value shipped in the sample .env; treated the same as no key.
const API_KEY_PLACEHOLDER: &str = "sk-your-api-key-here";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment (.env already applied).
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let request_timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        info!("Loaded configuration: port={}, model={}", port, openai_model);

        Self {
            port,
            openai_api_key,
            openai_model,
            openai_base_url,
            request_timeout_secs,
        }
    }

    /// Whether a usable API key is present. The sample placeholder value is
    /// reported as not configured, never as a fault.
    pub fn api_key_configured(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .map(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> AppConfig {
        AppConfig {
            port: DEFAULT_PORT,
            openai_api_key: key.map(|k| k.to_string()),
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_timeout_read_from_env() {
        std::env::set_var("OPENAI_TIMEOUT_SECS", "120");
        assert_eq!(AppConfig::from_env().request_timeout_secs, 120);

        std::env::set_var("OPENAI_TIMEOUT_SECS", "not-a-number");
        assert_eq!(
            AppConfig::from_env().request_timeout_secs,
            DEFAULT_TIMEOUT_SECS
        );

        std::env::remove_var("OPENAI_TIMEOUT_SECS");
    }

    #[test]
    fn test_api_key_configured() {
        assert!(config_with_key(Some("sk-real-key")).api_key_configured());
        assert!(!config_with_key(Some(API_KEY_PLACEHOLDER)).api_key_configured());
        assert!(!config_with_key(Some("")).api_key_configured());
        assert!(!config_with_key(None).api_key_configured());
    }
}
