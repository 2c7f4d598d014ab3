//! Provider dispatch: routes one conversational turn to the backend chosen at
//! startup and degrades to canned replies when that backend cannot answer.
//!
//! The provider is resolved once into an immutable [`ProviderContext`]. A
//! quota or credential failure answers that single turn from the mock; the
//! context itself never changes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::{Config, ProviderName};
use crate::llm_client::gemini::GeminiBackend;
use crate::llm_client::openai::OpenAiBackend;
use crate::llm_client::{prompts, BackendError, ChatBackend, ChatPrompt, FailureClass};
use crate::models::conversation::{user_utterances, ConversationTurn};

pub mod followups;
pub mod mock;

pub use followups::extract_follow_up_questions;

/// The backend every turn is routed to.
#[derive(Clone)]
pub enum ProviderContext {
    Mock,
    Hosted(Arc<dyn ChatBackend>),
}

impl std::fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderContext::Mock => f.write_str("Mock"),
            ProviderContext::Hosted(backend) => f
                .debug_tuple("Hosted")
                .field(&backend.name())
                .field(&backend.model())
                .finish(),
        }
    }
}

impl ProviderContext {
    /// Resolves the provider from configuration. Missing credentials or a
    /// client that fails to build select the mock with a warning.
    pub fn from_config(config: &Config) -> Self {
        if config.use_mock_ai {
            info!("USE_MOCK_AI is set, answering from the mock");
            return ProviderContext::Mock;
        }

        let built: Result<Arc<dyn ChatBackend>, BackendError> = match config.provider {
            ProviderName::OpenAi => {
                let Some(key) = config.openai_api_key.clone() else {
                    warn!("OpenAI API key not found, using mock responses");
                    return ProviderContext::Mock;
                };
                OpenAiBackend::new(key, config.openai_model.clone(), config.llm_timeout)
                    .map(|b| Arc::new(b) as Arc<dyn ChatBackend>)
            }
            ProviderName::Gemini => {
                let Some(key) = config.gemini_api_key.clone() else {
                    warn!("Gemini API key not found, using mock responses");
                    return ProviderContext::Mock;
                };
                GeminiBackend::new(key, config.gemini_model.clone(), config.llm_timeout)
                    .map(|b| Arc::new(b) as Arc<dyn ChatBackend>)
            }
            ProviderName::Other => {
                warn!("Unrecognized AI_PROVIDER, using mock responses");
                return ProviderContext::Mock;
            }
        };

        match built {
            Ok(backend) => {
                info!(provider = backend.name(), model = backend.model(), "AI provider ready");
                ProviderContext::Hosted(backend)
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize AI client, using mock responses");
                ProviderContext::Mock
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderContext::Mock => "mock",
            ProviderContext::Hosted(backend) => backend.name(),
        }
    }
}

/// Which path produced a turn's reply. Logged, never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Mock,
    Success,
    /// Quota or credential failure answered from the mock.
    Fallback,
    /// Any other failure answered with the basic reply.
    ErrorFallback,
}

/// Reply text plus up to three quick-reply suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    pub follow_up_questions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    provider: ProviderContext,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(provider: ProviderContext, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &ProviderContext {
        &self.provider
    }

    /// Answers one turn. Never fails: every backend error degrades to a
    /// canned reply.
    pub async fn process_message(
        &self,
        message: &str,
        history: &[ConversationTurn],
        language: &str,
    ) -> (TurnReply, TurnOutcome) {
        let backend = match &self.provider {
            ProviderContext::Mock => {
                return (mock::mock_reply(message, history).to_reply(), TurnOutcome::Mock)
            }
            ProviderContext::Hosted(backend) => backend,
        };

        let prompt = ChatPrompt {
            system: prompts::system_prompt(language),
            user_turns: user_utterances(history)
                .into_iter()
                .map(String::from)
                .collect(),
            message: message.to_string(),
        };

        let result = match tokio::time::timeout(self.timeout, backend.complete(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(text) => {
                let follow_up_questions = extract_follow_up_questions(&text);
                let text = if text.trim().is_empty() {
                    mock::BASIC.text.to_string()
                } else {
                    text
                };
                (
                    TurnReply {
                        text,
                        follow_up_questions,
                    },
                    TurnOutcome::Success,
                )
            }
            Err(e) => match e.class() {
                FailureClass::QuotaOrAuth => {
                    warn!(
                        provider = backend.name(),
                        error = %e,
                        "Quota or auth failure, answering from the mock"
                    );
                    (
                        mock::mock_reply(message, history).to_reply(),
                        TurnOutcome::Fallback,
                    )
                }
                FailureClass::Other => {
                    error!(
                        provider = backend.name(),
                        error = %e,
                        "Backend call failed, answering with the basic reply"
                    );
                    (mock::BASIC.to_reply(), TurnOutcome::ErrorFallback)
                }
            },
        }
    }
}
