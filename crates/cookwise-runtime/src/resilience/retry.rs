//! Resilient invocation: bounded attempts, linear backoff, per-attempt timeout.
//!
//! One logical generation call becomes at most `max_attempts` provider calls.
//! Between attempt `k` and `k + 1` the invoker waits `k * base_delay`.
//! Authentication failures stop the loop at once and close the gate.

use backon::{BackoffBuilder, Retryable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::gate::ProviderGate;
use crate::providers::{GenerationConfig, GenerationRequest, GenerativeProvider, ProviderError};

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per logical call, including the first
    pub max_attempts: u32,

    /// Unit of the linear backoff
    #[serde(with = "duration_human")]
    pub base_delay: Duration,

    /// Upper bound on a single provider call
    #[serde(with = "duration_human")]
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

/// Durations written as `1s`, `500ms`, `2m 30s`.
pub(crate) mod duration_human {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// Delays `base`, `2 * base`, ... up to `max_attempts - 1` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoffBuilder {
    base_delay: Duration,
    max_attempts: u32,
}

impl LinearBackoffBuilder {
    pub fn new(base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_attempts,
        }
    }
}

impl BackoffBuilder for LinearBackoffBuilder {
    type Backoff = LinearBackoff;

    fn build(self) -> Self::Backoff {
        LinearBackoff {
            base_delay: self.base_delay,
            max_attempts: self.max_attempts,
            completed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base_delay: Duration,
    max_attempts: u32,
    completed: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.completed >= self.max_attempts {
            return None;
        }
        let delay = self.base_delay.saturating_mul(self.completed);
        self.completed += 1;
        Some(delay)
    }
}

/// Final result of one logical generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Non-empty model text
    Text(String),

    /// The provider rejected the credential
    AuthError,

    /// Every attempt failed transiently
    Empty,
}

/// Runs generation calls against a provider under the retry policy.
pub struct Invoker {
    provider: Arc<dyn GenerativeProvider>,
    gate: Arc<ProviderGate>,
    retry: RetryConfig,
}

impl Invoker {
    pub fn new(
        provider: Arc<dyn GenerativeProvider>,
        gate: Arc<ProviderGate>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            provider,
            gate,
            retry,
        }
    }

    pub fn backoff(&self) -> LinearBackoffBuilder {
        LinearBackoffBuilder::new(self.retry.base_delay, self.retry.max_attempts)
    }

    pub async fn invoke(
        &self,
        request: &GenerationRequest,
        config: &GenerationConfig,
    ) -> GenerationOutcome {
        let provider = &self.provider;
        let timeout = self.retry.attempt_timeout;

        let result = (move || async move { attempt(provider, request, config, timeout).await })
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(ProviderError::is_transient)
            .notify(|error: &ProviderError, delay: Duration| {
                tracing::warn!(
                    provider = provider.name(),
                    error = %error,
                    delay = ?delay,
                    "Generation attempt failed, retrying"
                );
            })
            .await;

        match result {
            Ok(text) => GenerationOutcome::Text(text),
            Err(error) if error.is_transient() => {
                tracing::warn!(
                    provider = self.provider.name(),
                    attempts = self.retry.max_attempts,
                    error = %error,
                    "Generation attempts exhausted"
                );
                GenerationOutcome::Empty
            }
            Err(error) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %error,
                    "Provider rejected credential"
                );
                self.gate.mark_unusable();
                GenerationOutcome::AuthError
            }
        }
    }
}

async fn attempt(
    provider: &Arc<dyn GenerativeProvider>,
    request: &GenerationRequest,
    config: &GenerationConfig,
    timeout: Duration,
) -> Result<String, ProviderError> {
    match tokio::time::timeout(timeout, provider.generate(request, config)).await {
        Ok(Ok(text)) if text.trim().is_empty() => Err(ProviderError::EmptyResponse),
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    }
}
