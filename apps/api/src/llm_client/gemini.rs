//! Google Gemini `generateContent` backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{api_error, http_client, BackendError, ChatBackend, ChatPrompt};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini gets a single flattened prompt: instructions, then the user side of
/// the transcript as `User:` lines.
pub fn flatten_prompt(prompt: &ChatPrompt) -> String {
    let history = prompt
        .user_turns
        .iter()
        .map(|turn| format!("User: {turn}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n{}\nUser: {}", prompt.system, history, prompt.message)
}

#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, BackendError> {
        let text = flatten_prompt(prompt);
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &text }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        let answer = parsed.into_text();

        debug!(model = %self.model, chars = answer.len(), "Gemini call succeeded");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::FailureClass;
    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "SYSTEM".to_string(),
            user_turns: vec!["hello".to_string(), "I work in a factory".to_string()],
            message: "for 2 years".to_string(),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/models")
    }

    fn backend(base_url: String) -> GeminiBackend {
        GeminiBackend::new("g-test".into(), DEFAULT_MODEL.into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_flatten_prompt_layout() {
        assert_eq!(
            flatten_prompt(&prompt()),
            "SYSTEM\n\nUser: hello\nUser: I work in a factory\nUser: for 2 years"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hi. "},{"text":"What did you make?"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text(), "Hi. What did you make?");
    }

    #[test]
    fn test_missing_candidates_is_empty_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.into_text(), "");
    }

    #[tokio::test]
    async fn test_complete_hits_model_endpoint() {
        let router = Router::new().route(
            "/models/:call",
            post(|Path(call): Path<String>| async move {
                assert_eq!(call, "gemini-1.5-flash:generateContent");
                Json(json!({"candidates": [{"content": {"parts": [{"text": "Tell me more?"}]}}]}))
            }),
        );
        let text = backend(serve(router).await).complete(&prompt()).await.unwrap();
        assert_eq!(text, "Tell me more?");
    }

    #[tokio::test]
    async fn test_permission_denied_is_quota_or_auth() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"error": {"code": 403, "message": "denied", "status": "PERMISSION_DENIED"}})),
                )
            }),
        );
        let err = backend(serve(router).await)
            .complete(&prompt())
            .await
            .unwrap_err();
        assert_eq!(err.class(), FailureClass::QuotaOrAuth);
    }
}
