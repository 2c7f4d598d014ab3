use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{gemini, openai};

/// Hosted backend requested through `AI_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderName {
    OpenAi,
    Gemini,
    /// Anything unrecognized; served by the mock.
    Other,
}

impl ProviderName {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "openai" => ProviderName::OpenAi,
            "gemini" => ProviderName::Gemini,
            _ => ProviderName::Other,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Nothing is required: without credentials the service answers from the mock.
#[derive(Debug, Clone)]
pub struct Config {
    pub use_mock_ai: bool,
    pub provider: ProviderName,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first_of = |keys: &[&str]| keys.iter().find_map(|key| non_blank(*key));

        let llm_timeout_secs = non_blank("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            use_mock_ai: non_blank("USE_MOCK_AI")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            provider: ProviderName::parse(
                &non_blank("AI_PROVIDER").unwrap_or_else(|| "openai".to_string()),
            ),
            openai_api_key: first_of(&["OPENAI_API_KEY", "OPENAI_KEY", "OPENAI_APIKEY"]),
            openai_model: non_blank("OPENAI_MODEL")
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
            gemini_api_key: first_of(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]),
            gemini_model: non_blank("GEMINI_MODEL")
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            port: non_blank("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_blank("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert!(!config.use_mock_ai);
        assert_eq!(config.provider, ProviderName::OpenAi);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 5000);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_key_aliases_and_blank_values() {
        let config = config(&[
            ("OPENAI_API_KEY", "  "),
            ("OPENAI_KEY", "sk-alias"),
            ("GEMINI_API_KEY", "g-key"),
            ("AI_PROVIDER", "Gemini"),
            ("USE_MOCK_AI", "TRUE"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-alias"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.provider, ProviderName::Gemini);
        assert!(config.use_mock_ai);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(config(&[("PORT", "not-a-port")]).is_err());
        assert!(config(&[("LLM_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_unknown_provider() {
        assert_eq!(ProviderName::parse("claude"), ProviderName::Other);
    }
}
