//! Runtime configuration, loadable from YAML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! provider:
//!   kind: gemini
//!   options:
//!     base_url: https://generativelanguage.googleapis.com/v1beta
//! model: gemini-2.0-flash
//! retry:
//!   max_attempts: 2
//!   base_delay: 1s
//!   attempt_timeout: 10s
//! fallback_seed: 42
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;
use thiserror::Error;

use crate::providers::{
    ApiCredential, CredentialPolicy, GenerationConfig, GenerationRequest, GEMINI_API_KEY_ENV,
};
use crate::resilience::RetryConfig;

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which provider to build and the options handed to its factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: String,
    pub options: JsonValue,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: "gemini".to_string(),
            options: serde_json::json!({}),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub provider: ProviderSettings,

    /// Model for text requests
    pub model: String,

    /// Model for requests that carry an image
    pub vision_model: String,

    pub temperature: f32,

    pub max_output_tokens: u32,

    pub retry: RetryConfig,

    pub credential_policy: CredentialPolicy,

    /// Seed for uniform-random fallback selection
    pub fallback_seed: Option<u64>,

    /// Prior chat turns included in prompts
    pub history_window: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            model: "gemini-2.0-flash".to_string(),
            vision_model: "gemini-2.0-flash".to_string(),
            temperature: 0.4,
            max_output_tokens: 2048,
            retry: RetryConfig::default(),
            credential_policy: CredentialPolicy::default(),
            fallback_seed: None,
            history_window: 6,
        }
    }
}

impl RuntimeConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let config: RuntimeConfig = if text.trim().is_empty() {
            RuntimeConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if self.retry.attempt_timeout.is_zero() {
            return Err(ConfigError::Invalid("retry.attempt_timeout must be positive".into()));
        }
        if self.history_window == 0 {
            return Err(ConfigError::Invalid("history_window must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if !self.provider.options.is_object() {
            return Err(ConfigError::Invalid("provider.options must be a mapping".into()));
        }
        Ok(())
    }

    /// Resolve the credential: `provider.options.api_key`, then `GEMINI_API_KEY`.
    ///
    /// A missing credential is empty, not an error.
    pub fn resolve_credential(&self) -> ApiCredential {
        ApiCredential::resolve(
            &self.provider.options,
            "api_key",
            GEMINI_API_KEY_ENV,
            "Gemini API key",
        )
    }

    /// Model parameters for `request`, picking the vision model when it
    /// carries an image.
    pub fn generation_config(&self, request: &GenerationRequest) -> GenerationConfig {
        let model = if request.is_vision() {
            &self.vision_model
        } else {
            &self.model
        };

        GenerationConfig {
            model: model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{CredentialSource, ImagePayload};
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.provider.kind, "gemini");
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.base_delay, Duration::from_secs(1));
        assert_eq!(config.retry.attempt_timeout, Duration::from_secs(10));
        assert_eq!(config.history_window, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RuntimeConfig::from_yaml_str("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = RuntimeConfig::from_yaml_str(
            r#"
provider:
  options:
    base_url: http://localhost:8080
retry:
  max_attempts: 3
  base_delay: 500ms
fallback_seed: 42
credential_policy:
  required_prefix: null
"#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, "gemini");
        assert_eq!(config.provider.options["base_url"], "http://localhost:8080");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(500));
        assert_eq!(config.retry.attempt_timeout, Duration::from_secs(10));
        assert_eq!(config.fallback_seed, Some(42));
        assert_eq!(config.credential_policy.required_prefix, None);
        assert_eq!(config.credential_policy.min_length, 20);
    }

    #[test]
    fn test_validation_errors() {
        let result = RuntimeConfig::from_yaml_str("retry:\n  max_attempts: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("max_attempts")));

        let result = RuntimeConfig::from_yaml_str("retry:\n  attempt_timeout: 0s\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = RuntimeConfig::from_yaml_str("history_window: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = RuntimeConfig::from_yaml_str("temperature: 5.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = RuntimeConfig::from_yaml_str("provider:\n  options: [1, 2]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            RuntimeConfig::from_yaml_str("retry: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RuntimeConfig::from_yaml_file("/nonexistent/cookwise.yaml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_credential_from_options() {
        let mut config = RuntimeConfig::default();
        config.provider.options = serde_json::json!({"api_key": "AIzaConfiguredKey1234567"});

        let credential = config.resolve_credential();
        assert_eq!(credential.expose(), "AIzaConfiguredKey1234567");
        assert_eq!(credential.source(), CredentialSource::Config);
    }

    #[test]
    fn test_generation_config_picks_model() {
        let config = RuntimeConfig {
            vision_model: "vision-model".to_string(),
            ..RuntimeConfig::default()
        };

        let text = config.generation_config(&GenerationRequest::text("hi"));
        assert_eq!(text.model, "gemini-2.0-flash");
        assert_eq!(text.max_output_tokens, 2048);

        let vision = config.generation_config(&GenerationRequest::with_image(
            "what is this",
            ImagePayload::new(vec![1], "image/png"),
        ));
        assert_eq!(vision.model, "vision-model");
    }

    #[test]
    fn test_example_file_parses() {
        let config =
            RuntimeConfig::from_yaml_str(include_str!("../../../config/cookwise.example.yaml"))
                .unwrap();
        assert_eq!(config.credential_policy, CredentialPolicy::default());
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.fallback_seed, None);
    }

    #[test]
    fn test_round_trips_through_yaml() {
        let config = RuntimeConfig {
            fallback_seed: Some(9),
            ..RuntimeConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("base_delay: 1s"));
        assert_eq!(RuntimeConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
