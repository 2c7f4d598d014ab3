//! LLM Client: the single point of entry for hosted model calls.
//!
//! ARCHITECTURAL RULE: No other module may call a model API directly.
//! The dispatcher only sees the `ChatBackend` trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

pub mod gemini;
pub mod openai;
pub mod prompts;

/// Provider error codes that mean "out of quota, throttled, or bad key".
const QUOTA_OR_AUTH_CODES: &[&str] = &[
    "insufficient_quota",
    "rate_limit_exceeded",
    "invalid_api_key",
    "RESOURCE_EXHAUSTED",
    "PERMISSION_DENIED",
    "UNAUTHENTICATED",
];

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backend did not answer within {0}s")]
    Timeout(u64),
}

/// How the dispatcher reacts to a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Throttling, exhausted quota or rejected credentials: answer from the mock.
    QuotaOrAuth,
    /// Anything else: answer with the static basic response.
    Other,
}

fn is_quota_or_auth_status(status: u16) -> bool {
    matches!(status, 401 | 403 | 429)
}

impl BackendError {
    pub fn class(&self) -> FailureClass {
        let quota_or_auth = match self {
            BackendError::Api { status, code, .. } => {
                is_quota_or_auth_status(*status)
                    || code
                        .as_deref()
                        .is_some_and(|c| QUOTA_OR_AUTH_CODES.contains(&c))
            }
            BackendError::Http(e) => e
                .status()
                .is_some_and(|s| is_quota_or_auth_status(s.as_u16())),
            BackendError::Parse(_) | BackendError::Timeout(_) => false,
        };

        if quota_or_auth {
            FailureClass::QuotaOrAuth
        } else {
            FailureClass::Other
        }
    }
}

/// Everything a backend needs to answer one turn.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    pub system: String,
    /// Earlier user turns, oldest first. AI turns are not replayed.
    pub user_turns: Vec<String>,
    pub message: String,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Returns the raw reply text, which may be empty.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, BackendError>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client, BackendError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    /// OpenAI sends a string code, Gemini a numeric one.
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<String>,
}

/// Turns a non-success response into `BackendError::Api`, keeping whatever
/// error code the provider put in the body.
pub(crate) async fn api_error(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    parse_api_error(status, body)
}

fn parse_api_error(status: u16, body: String) -> BackendError {
    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => {
            // Gemini puts the HTTP status in a numeric `code`.
            let status = envelope
                .error
                .code
                .as_ref()
                .and_then(serde_json::Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(status);
            let code = envelope
                .error
                .code
                .and_then(|c| c.as_str().map(String::from))
                .or(envelope.error.status);
            BackendError::Api {
                status,
                code,
                message: envelope.error.message.unwrap_or(body),
            }
        }
        Err(_) => BackendError::Api {
            status,
            code: None,
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>) -> BackendError {
        BackendError::Api {
            status,
            code: code.map(String::from),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_quota_and_auth_statuses() {
        for status in [401, 403, 429] {
            assert_eq!(api(status, None).class(), FailureClass::QuotaOrAuth);
        }
        assert_eq!(api(500, None).class(), FailureClass::Other);
        assert_eq!(api(400, None).class(), FailureClass::Other);
    }

    #[test]
    fn test_quota_codes_override_status() {
        assert_eq!(
            api(400, Some("insufficient_quota")).class(),
            FailureClass::QuotaOrAuth
        );
        assert_eq!(
            api(400, Some("invalid_api_key")).class(),
            FailureClass::QuotaOrAuth
        );
        assert_eq!(api(500, Some("server_error")).class(), FailureClass::Other);
    }

    #[test]
    fn test_timeout_is_not_quota() {
        assert_eq!(BackendError::Timeout(30).class(), FailureClass::Other);
    }

    #[test]
    fn test_parse_openai_error_body() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        match parse_api_error(429, body.to_string()) {
            BackendError::Api { status, code, message } => {
                assert_eq!(status, 429);
                assert_eq!(code.as_deref(), Some("insufficient_quota"));
                assert_eq!(message, "You exceeded your current quota");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_gemini_error_body_uses_status_string() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = parse_api_error(400, body.to_string());
        assert!(matches!(
            &err,
            BackendError::Api { code: Some(c), .. } if c == "INVALID_ARGUMENT"
        ));
        assert_eq!(err.class(), FailureClass::Other);

        let body = r#"{"error":{"code":403,"message":"denied","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            parse_api_error(400, body.to_string()).class(),
            FailureClass::QuotaOrAuth
        );
    }

    #[test]
    fn test_numeric_body_code_is_the_status() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"UNAVAILABLE"}}"#;
        let err = parse_api_error(500, body.to_string());
        assert!(matches!(err, BackendError::Api { status: 429, .. }));
        assert_eq!(err.class(), FailureClass::QuotaOrAuth);
    }

    #[test]
    fn test_unparseable_body_kept_as_message() {
        match parse_api_error(502, "Bad Gateway".to_string()) {
            BackendError::Api { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
