//! Configuration for a single OpenAI profile (one model, one endpoint).

use crate::error_handler::{ConfigError, LlmError, must_env, opt_env, opt_env_u32, opt_env_u64};

/// Configuration for one OpenAI model invocation profile.
///
/// The backend uses two profiles built from the same credential: a chat
/// profile (completions) and an embedding profile. Both are immutable after
/// construction and cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Model identifier (e.g., `"gpt-4o"`, `"text-embedding-3-small"`).
    pub model: String,

    /// API base URL without a trailing path (e.g., `"https://api.openai.com"`).
    pub endpoint: String,

    /// Bearer credential for the API.
    pub api_key: String,

    /// Maximum number of tokens to generate (chat profile only).
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl OpenAiConfig {
    /// Chat profile from environment variables.
    ///
    /// Requires `OPENAI_API_KEY`. Optional: `OPENAI_ENDPOINT`,
    /// `OPENAI_CHAT_MODEL`, `LLM_MAX_TOKENS`, `LLM_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] when the key is absent or a numeric
    /// variable fails to parse.
    pub fn chat_from_env() -> Result<Self, LlmError> {
        let api_key = must_env("OPENAI_API_KEY")?;
        let endpoint = opt_env("OPENAI_ENDPOINT", "https://api.openai.com");
        let model = opt_env("OPENAI_CHAT_MODEL", "gpt-4o");

        let cfg = Self {
            model,
            endpoint,
            api_key,
            max_tokens: Some(opt_env_u32("LLM_MAX_TOKENS")?.unwrap_or(150)),
            temperature: Some(0.0),
            timeout_secs: opt_env_u64("LLM_TIMEOUT_SECS")?.or(Some(60)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Embedding profile from environment variables.
    ///
    /// Requires `OPENAI_API_KEY`. Optional: `OPENAI_ENDPOINT`,
    /// `OPENAI_EMBED_MODEL`, `LLM_TIMEOUT_SECS`.
    pub fn embedding_from_env() -> Result<Self, LlmError> {
        let api_key = must_env("OPENAI_API_KEY")?;
        let endpoint = opt_env("OPENAI_ENDPOINT", "https://api.openai.com");
        let model = opt_env("OPENAI_EMBED_MODEL", "text-embedding-3-small");

        let cfg = Self {
            model,
            endpoint,
            api_key,
            max_tokens: None,
            temperature: None,
            timeout_secs: opt_env_u64("LLM_TIMEOUT_SECS")?.or(Some(60)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Structural validation shared by both profiles.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        let ep = self.endpoint.trim();
        if ep.is_empty() || !(ep.starts_with("http://") || ep.starts_with("https://")) {
            return Err(ConfigError::InvalidFormat {
                var: "OPENAI_ENDPOINT",
                reason: "must start with http:// or https://",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> OpenAiConfig {
        OpenAiConfig {
            model: "gpt-4o".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: "sk-test".into(),
            max_tokens: Some(150),
            temperature: Some(0.0),
            timeout_secs: Some(60),
        }
    }

    #[test]
    fn validate_accepts_https_endpoint() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_scheme() {
        let mut cfg = base();
        cfg.endpoint = "api.openai.com".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_model() {
        let mut cfg = base();
        cfg.model = "  ".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyModel)));
    }
}
