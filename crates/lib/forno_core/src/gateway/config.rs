//! Gemini gateway configuration.

use std::env;
use std::time::Duration;

/// Default public endpoint of the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model id.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default bound on a single gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved configuration for the Gemini gateway.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with `MissingCredential`.
    pub api_key: Option<String>,
    /// Model id, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Scheme and host of the API, without the `/v1beta` path.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                                     |
    /// |-----------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`      | unset                                       |
    /// | `GEMINI_MODEL`        | `gemini-2.5-flash`                          |
    /// | `GEMINI_API_BASE`     | `https://generativelanguage.googleapis.com` |
    /// | `GEMINI_TIMEOUT_SECS` | `30`                                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: env::var("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            timeout: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_endpoint() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, "https://generativelanguage.googleapis.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_override_fields() {
        let config = GeminiConfig::default()
            .with_api_key("k")
            .with_model("gemini-2.0-flash")
            .with_api_base("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
