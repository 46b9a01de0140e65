//! Secure credential handling for generative providers.
//!
//! This module provides a single, type-safe way to hold the provider API key
//! and to decide whether it is worth using at all:
//!
//! - **No accidental logging**: Credentials cannot appear in Debug/Display output
//! - **Memory safety**: Credentials are zeroed on drop
//! - **Validity policy**: [`CredentialPolicy`] rejects empty, short,
//!   placeholder and wrongly-prefixed keys before any network call
//!
//! ## Usage
//!
//! ```ignore
//! use crate::providers::secrets::{ApiCredential, CredentialPolicy, GEMINI_API_KEY_ENV};
//!
//! // Load from config with env fallback; a missing key is an empty credential
//! let cred = ApiCredential::resolve(&options, "api_key", GEMINI_API_KEY_ENV, "Gemini API key");
//!
//! if CredentialPolicy::default().accepts(cred.expose()) {
//!     request.header("x-goog-api-key", cred.expose());
//! }
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use super::ProviderError;

/// Environment variable consulted when no key is configured.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Where a credential was loaded from.
///
/// This is useful for debugging configuration issues without
/// exposing the actual credential value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from configuration file/JSON
    Config,
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
    /// Nothing was configured; the credential is empty
    Missing,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Config => write!(f, "config"),
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
            CredentialSource::Missing => write!(f, "nowhere"),
        }
    }
}

/// A securely-stored API credential.
///
/// This wrapper provides:
/// - Safe Debug implementation that shows `[REDACTED]`
/// - Memory zeroing on drop via `secrecy` crate
/// - Explicit exposure via `.expose()` method
/// - Source tracking for debugging
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Create a new credential from a string value.
    ///
    /// The value is trimmed and immediately wrapped in SecretString.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        let value: String = value.into();
        Self {
            value: SecretString::from(value.trim().to_string()),
            source,
            name,
        }
    }

    /// An empty credential, rejected by every policy.
    pub fn missing(name: &'static str) -> Self {
        Self::new(String::new(), CredentialSource::Missing, name)
    }

    /// Load credential from an environment variable.
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, ProviderError> {
        std::env::var(env_var)
            .map(|v| Self::new(v, CredentialSource::Environment, name))
            .map_err(|_| {
                ProviderError::NotConfigured(format!(
                    "{} not set: configure '{}' environment variable",
                    name, env_var
                ))
            })
    }

    /// Load credential from JSON config, falling back to environment variable.
    ///
    /// 1. Check if `config_key` exists in the JSON config
    /// 2. If not, fall back to `env_var` environment variable
    /// 3. Return error if neither is set
    pub fn from_config_or_env(
        config: &JsonValue,
        config_key: &str,
        env_var: &str,
        name: &'static str,
    ) -> Result<Self, ProviderError> {
        if let Some(value) = config[config_key].as_str() {
            return Ok(Self::new(value, CredentialSource::Config, name));
        }

        if let Ok(value) = std::env::var(env_var) {
            return Ok(Self::new(value, CredentialSource::Environment, name));
        }

        Err(ProviderError::NotConfigured(format!(
            "{} required: set '{}' in config or {} environment variable",
            name, config_key, env_var
        )))
    }

    /// Like [`ApiCredential::from_config_or_env`], but a missing key yields
    /// an empty credential instead of an error.
    pub fn resolve(
        config: &JsonValue,
        config_key: &str,
        env_var: &str,
        name: &'static str,
    ) -> Self {
        Self::from_config_or_env(config, config_key, env_var, name)
            .unwrap_or_else(|_| Self::missing(name))
    }

    /// Check if a credential is available (without loading it).
    pub fn is_available(config: &JsonValue, config_key: &str, env_var: &str) -> bool {
        config[config_key].as_str().is_some() || std::env::var(env_var).is_ok()
    }

    /// Expose the credential value for use in API calls.
    ///
    /// # Security
    ///
    /// Only call this at the point where the credential is actually needed
    /// (e.g., setting an HTTP header). Never store the exposed value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Check if the credential is empty.
    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    /// Get the source of this credential.
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Get the human-readable name of this credential.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

/// The rule a credential must satisfy before any provider call is made.
///
/// All checks must hold: non-empty, at least `min_length` characters, not a
/// known placeholder (case-insensitive) and, when `required_prefix` is set,
/// starting with that prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    pub min_length: usize,
    pub placeholders: Vec<String>,
    pub required_prefix: Option<String>,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_length: 20,
            placeholders: [
                "your_api_key_here",
                "your_gemini_api_key_here",
                "your-api-key",
                "changeme",
                "placeholder",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            required_prefix: Some("AIza".to_string()),
        }
    }
}

impl CredentialPolicy {
    /// Pure validity check; no caching.
    pub fn accepts(&self, candidate: &str) -> bool {
        let value = candidate.trim();

        if value.is_empty() || value.chars().count() < self.min_length {
            return false;
        }

        if self
            .placeholders
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(value))
        {
            return false;
        }

        match &self.required_prefix {
            Some(prefix) => value.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_redacted_in_debug() {
        let secret = "AIzaSySuperSecretKey12345";
        let cred = ApiCredential::new(secret, CredentialSource::Programmatic, "Test API key");

        let debug = format!("{:?}", cred);
        assert!(!debug.contains(secret), "Secret exposed in Debug!");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_redacted_in_display() {
        let secret = "AIzaSySuperSecretKey12345";
        let cred = ApiCredential::new(secret, CredentialSource::Config, "Test API key");

        let display = format!("{}", cred);
        assert!(!display.contains(secret), "Secret exposed in Display!");
        assert!(display.contains("[REDACTED]"));
        assert!(display.contains("Test API key"));
        assert!(display.contains("config"));
    }

    #[test]
    fn test_credential_expose_trims() {
        let cred = ApiCredential::new("  AIzaKey  \n", CredentialSource::Programmatic, "Test");
        assert_eq!(cred.expose(), "AIzaKey");
    }

    #[test]
    fn test_from_config_or_env_prefers_config() {
        let config = serde_json::json!({
            "api_key": "config-key"
        });

        std::env::set_var("COOKWISE_TEST_KEY_PRIORITY", "env-key");
        let cred = ApiCredential::from_config_or_env(
            &config,
            "api_key",
            "COOKWISE_TEST_KEY_PRIORITY",
            "Test key",
        )
        .unwrap();

        assert_eq!(cred.expose(), "config-key");
        assert_eq!(cred.source(), CredentialSource::Config);

        std::env::remove_var("COOKWISE_TEST_KEY_PRIORITY");
    }

    #[test]
    fn test_from_config_or_env_falls_back_to_env() {
        std::env::set_var("COOKWISE_TEST_KEY_FALLBACK", "env-key");
        let cred = ApiCredential::from_config_or_env(
            &serde_json::json!({}),
            "api_key",
            "COOKWISE_TEST_KEY_FALLBACK",
            "Test key",
        )
        .unwrap();

        assert_eq!(cred.expose(), "env-key");
        assert_eq!(cred.source(), CredentialSource::Environment);

        std::env::remove_var("COOKWISE_TEST_KEY_FALLBACK");
    }

    #[test]
    fn test_from_config_or_env_error_when_missing() {
        let result = ApiCredential::from_config_or_env(
            &serde_json::json!({}),
            "api_key",
            "COOKWISE_NONEXISTENT_VAR",
            "Test key",
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Test key"));
        assert!(err.to_string().contains("COOKWISE_NONEXISTENT_VAR"));
    }

    #[test]
    fn test_resolve_missing_is_empty() {
        let cred = ApiCredential::resolve(
            &serde_json::json!({}),
            "api_key",
            "COOKWISE_NONEXISTENT_VAR",
            "Test key",
        );
        assert!(cred.is_empty());
        assert_eq!(cred.source(), CredentialSource::Missing);
    }

    #[test]
    fn test_is_available() {
        let config = serde_json::json!({ "api_key": "value" });

        assert!(ApiCredential::is_available(&config, "api_key", "COOKWISE_NONEXISTENT"));
        assert!(!ApiCredential::is_available(
            &serde_json::json!({}),
            "api_key",
            "COOKWISE_NONEXISTENT"
        ));
    }

    #[test]
    fn test_policy_examples() {
        let policy = CredentialPolicy::default();
        assert!(!policy.accepts(""));
        assert!(!policy.accepts("your_api_key_here"));
        assert!(!policy.accepts("YOUR_GEMINI_API_KEY_HERE"));
        assert!(policy.accepts("AIzaShortButLongEnoughPlaceholder123"));
    }

    #[test]
    fn test_policy_length_boundary() {
        let policy = CredentialPolicy::default();
        assert!(!policy.accepts("AIza123456789012345"));
        assert!(policy.accepts("AIza1234567890123456"));
    }

    #[test]
    fn test_policy_prefix() {
        let policy = CredentialPolicy::default();
        assert!(!policy.accepts("sk-ant-REDACTED"));

        let open = CredentialPolicy {
            required_prefix: None,
            ..CredentialPolicy::default()
        };
        assert!(open.accepts("sk-ant-REDACTED"));
        assert!(!open.accepts("changeme"));
    }

    #[test]
    fn test_policy_from_partial_yaml() {
        let policy: CredentialPolicy = serde_yaml::from_str("min_length: 8").unwrap();
        assert_eq!(policy.min_length, 8);
        assert_eq!(policy.required_prefix.as_deref(), Some("AIza"));
        assert!(!policy.placeholders.is_empty());
    }
}
