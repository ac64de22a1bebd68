//! Enrichment service configuration.

use std::time::Duration;

use crate::error::{FieldFailure, Result};

/// Environment variable holding the bearer token.
pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint, model, credential and per-request timeout.
#[derive(Clone)]
pub struct EnrichConfig {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for EnrichConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EnrichConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the credential from `PERPLEXITY_API_KEY`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(FieldFailure::MissingCredential(API_KEY_VAR)),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Per-request timeout, at least one second.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_secs(1));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnrichConfig::new("secret");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.model(), "sonar");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_timeout_is_clamped() {
        let config = EnrichConfig::new("secret").with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", EnrichConfig::new("secret"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("sonar"));
    }
}
