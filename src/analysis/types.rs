// src/analysis/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One analysis attempt's inputs. Both fields are required non-empty;
/// constructed fresh per attempt and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub cv_text: String,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(cv_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            cv_text: cv_text.into(),
            job_description: job_description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.cv_text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "CV text is missing. Upload a CV or paste its text first.".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Job description is missing. Paste or compose one first.".to_string(),
            ));
        }
        Ok(())
    }
}

/// The flat key -> value record the backend fills. Immutable after parse;
/// unknown keys are carried here and filtered against the catalog at
/// field-mapping time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnalysisRecord {
    fields: BTreeMap<String, String>,
}

impl AnalysisRecord {
    /// Build a record from a parsed JSON object. String values are taken as
    /// is, other scalars are coerced to their display form, and structured
    /// values are ignored.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut fields = BTreeMap::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                _ => None,
            };
            if let Some(text) = text {
                fields.insert(key.clone(), text);
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for AnalysisRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Token accounting reported by the backend for one analysis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A successful analysis: the parsed record plus usage counters.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub record: AnalysisRecord,
    pub usage: UsageInfo,
}

/// Failure taxonomy for the analysis path. Callers must be able to tell a
/// credentials problem from exhausted quota from a rate limit and react
/// differently; none of these are retried automatically.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("an analysis is already in flight for this client")]
    AnalysisInFlight,
    #[error("the API key was rejected by the model backend")]
    InvalidCredentials,
    #[error("the backend account has no remaining credits")]
    QuotaExhausted,
    #[error("the backend rate limit was hit")]
    RateLimited,
    #[error("no API key is configured on the server")]
    CredentialsNotConfigured,
    #[error("the backend response could not be parsed: {0}")]
    MalformedResponse(String),
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}

impl AnalysisError {
    /// User-facing remediation message. Total over the taxonomy: every kind
    /// has a defined message; only `AnalysisFailed` passes the backend's own
    /// message through.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::AnalysisInFlight => {
                "An analysis is already running. Wait for it to finish before starting another."
                    .to_string()
            }
            Self::InvalidCredentials => {
                "Invalid API key. Please check your .env file.".to_string()
            }
            Self::QuotaExhausted => {
                "No OpenAI credits. Add payment at platform.openai.com".to_string()
            }
            Self::RateLimited => {
                "Rate limit exceeded. Please wait and try again.".to_string()
            }
            Self::CredentialsNotConfigured => {
                "API key not configured. Edit the .env file and restart the server.".to_string()
            }
            Self::MalformedResponse(_) => {
                "The analysis response could not be interpreted. Try again.".to_string()
            }
            Self::AnalysisFailed(msg) => msg.clone(),
        }
    }

    /// Only a rate limit is sensibly retryable right away by the user.
    pub fn retryable_now(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(matches!(
            AnalysisRequest::new("", "Some job").validate(),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            AnalysisRequest::new("Some CV", "  ").validate(),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(AnalysisRequest::new("cv", "job").validate().is_ok());
    }

    #[test]
    fn test_record_coerces_scalars_and_drops_structures() {
        let object = serde_json::json!({
            "full_name": "Bob",
            "score": 7,
            "flagged": false,
            "nested": {"ignored": true},
            "list": ["ignored"]
        });
        let record = AnalysisRecord::from_json_object(object.as_object().unwrap());
        assert_eq!(record.get("full_name"), Some("Bob"));
        assert_eq!(record.get("score"), Some("7"));
        assert_eq!(record.get("flagged"), Some("false"));
        assert_eq!(record.get("nested"), None);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_every_error_kind_has_a_message() {
        let kinds = [
            AnalysisError::InvalidInput("x".into()),
            AnalysisError::AnalysisInFlight,
            AnalysisError::InvalidCredentials,
            AnalysisError::QuotaExhausted,
            AnalysisError::RateLimited,
            AnalysisError::CredentialsNotConfigured,
            AnalysisError::MalformedResponse("x".into()),
            AnalysisError::AnalysisFailed("backend says no".into()),
        ];
        for kind in &kinds {
            assert!(!kind.user_message().is_empty());
        }
        assert!(AnalysisError::RateLimited.retryable_now());
        assert!(!AnalysisError::InvalidCredentials.retryable_now());
    }
}
