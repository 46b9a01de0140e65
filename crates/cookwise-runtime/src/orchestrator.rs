//! Orchestrator for a single assistant request.
//!
//! Every entry point runs the same pipeline:
//! - Ask the availability gate whether the provider may be called
//! - Invoke the provider under the retry policy
//! - Decode and validate the text into the expected record
//! - Substitute the entry point's fallback whenever any step fails
//!
//! The caller always gets a record back. [`Resolved`] additionally says
//! where it came from.

use std::sync::Arc;
use thiserror::Error;

use cookwise_core::{EntryPoint, StructuredResult, Validated};

use crate::config::{ConfigError, RuntimeConfig};
use crate::providers::{GenerationRequest, GenerativeProvider};
use crate::resilience::{FallbackSupplier, GenerationOutcome, Invoker, ProviderGate};

/// Errors from building the orchestrator.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Why a fallback was served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The gate was closed before any call
    ProviderUnavailable,

    /// The provider rejected the credential
    AuthRejected,

    /// Every attempt failed transiently
    Exhausted,

    /// The model answered, but not with a usable record
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    Live,
    Fallback(FallbackReason),
}

/// A record and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ResultSource,
}

impl<T> Resolved<T> {
    pub fn is_live(&self) -> bool {
        self.source == ResultSource::Live
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

pub struct Orchestrator {
    gate: Arc<ProviderGate>,
    invoker: Invoker,
    fallback: FallbackSupplier,
    config: RuntimeConfig,
    provider_name: String,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Produce a record for `entry`, live if possible.
    ///
    /// `fallback` builds the entry point's canned answer; it runs only when
    /// the live path fails.
    pub async fn resolve<T, F>(
        &self,
        entry: EntryPoint,
        request: GenerationRequest,
        fallback: F,
    ) -> Resolved<T>
    where
        T: StructuredResult,
        F: FnOnce(&FallbackSupplier) -> T + Send,
    {
        if !self.gate.is_available() {
            tracing::warn!(entry = ?entry, "Provider unavailable, using fallback");
            return self.fall_back(fallback, FallbackReason::ProviderUnavailable);
        }

        let config = self.config.generation_config(&request);
        match self.invoker.invoke(&request, &config).await {
            GenerationOutcome::Text(raw) => match T::interpret(&raw) {
                Validated::Valid(value) => {
                    tracing::debug!(entry = ?entry, provider = %self.provider_name, "Live result");
                    Resolved {
                        value,
                        source: ResultSource::Live,
                    }
                }
                Validated::Invalid(reason) => {
                    tracing::warn!(
                        entry = ?entry,
                        reason = %reason,
                        "Model output unusable, using fallback"
                    );
                    self.fall_back(fallback, FallbackReason::Rejected(reason))
                }
            },
            GenerationOutcome::AuthError => {
                tracing::warn!(entry = ?entry, "Credential rejected, using fallback");
                self.fall_back(fallback, FallbackReason::AuthRejected)
            }
            GenerationOutcome::Empty => {
                tracing::warn!(entry = ?entry, "Generation exhausted, using fallback");
                self.fall_back(fallback, FallbackReason::Exhausted)
            }
        }
    }

    fn fall_back<T, F>(&self, fallback: F, reason: FallbackReason) -> Resolved<T>
    where
        F: FnOnce(&FallbackSupplier) -> T,
    {
        Resolved {
            value: fallback(&self.fallback),
            source: ResultSource::Fallback(reason),
        }
    }

    pub fn gate(&self) -> &Arc<ProviderGate> {
        &self.gate
    }

    pub fn supplier(&self) -> &FallbackSupplier {
        &self.fallback
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider_name)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
    provider: Option<Arc<dyn GenerativeProvider>>,
    gate: Option<Arc<ProviderGate>>,
    fallback: Option<FallbackSupplier>,
    config: RuntimeConfig,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            gate: None,
            fallback: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the generative provider.
    pub fn provider(mut self, provider: Arc<dyn GenerativeProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Share an existing gate, e.g. [`ProviderGate::global`].
    ///
    /// Without one, a fresh gate is built from the configured credential.
    pub fn gate(mut self, gate: Arc<ProviderGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Override the fallback supplier. Defaults to one seeded from
    /// `fallback_seed`.
    pub fn fallback(mut self, supplier: FallbackSupplier) -> Self {
        self.fallback = Some(supplier);
        self
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Orchestrator, RuntimeError> {
        self.config.validate()?;

        let provider = self
            .provider
            .ok_or_else(|| RuntimeError::ProviderNotConfigured("No provider set".to_string()))?;

        let config = self.config;
        let gate = self.gate.unwrap_or_else(|| {
            Arc::new(ProviderGate::new(
                config.resolve_credential(),
                config.credential_policy.clone(),
            ))
        });
        let fallback = self
            .fallback
            .unwrap_or_else(|| FallbackSupplier::from_seed(config.fallback_seed));

        Ok(Orchestrator {
            provider_name: provider.name().to_string(),
            invoker: Invoker::new(provider, gate.clone(), config.retry.clone()),
            gate,
            fallback,
            config,
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProviderError, UnavailableProvider};
    use crate::testing::{closed_gate, orchestrator, usable_gate, ScriptedProvider};
    use cookwise_core::{FoodAnalysis, PantryItems};
    use serde_json::json;

    fn pantry_request() -> GenerationRequest {
        GenerationRequest::text("list pantry items")
    }

    async fn resolve_items(orchestrator: &Orchestrator) -> Resolved<PantryItems> {
        orchestrator
            .resolve(EntryPoint::PantryItems, pantry_request(), |s| s.pantry_items())
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_result() {
        let provider = Arc::new(ScriptedProvider::answering(
            "Here you go:\n```json\n{\"items\": [\"Paneer\", \"Spinach\"]}\n```",
        ));
        let resolved = resolve_items(&orchestrator(provider.clone(), usable_gate())).await;

        assert!(resolved.is_live());
        assert_eq!(resolved.value.items, vec!["Paneer", "Spinach"]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_gate_never_calls_provider() {
        let provider = Arc::new(ScriptedProvider::answering("{\"items\": [\"Rice\"]}"));
        let orchestrator = orchestrator(provider.clone(), closed_gate());

        for _ in 0..3 {
            let resolved = resolve_items(&orchestrator).await;
            assert_eq!(
                resolved.source,
                ResultSource::Fallback(FallbackReason::ProviderUnavailable)
            );
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_fall_back_after_all_attempts() {
        let provider = Arc::new(ScriptedProvider::failing(|| {
            ProviderError::HttpError("network unreachable".into())
        }));
        let orchestrator = orchestrator(provider.clone(), usable_gate());
        let resolved = resolve_items(&orchestrator).await;

        assert_eq!(resolved.source, ResultSource::Fallback(FallbackReason::Exhausted));
        assert_eq!(resolved.value, orchestrator.supplier().pantry_items());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_rejection_closes_gate_for_later_calls() {
        let provider = Arc::new(ScriptedProvider::failing(|| {
            ProviderError::AuthError("API key expired".into())
        }));
        let orchestrator = orchestrator(provider.clone(), usable_gate());

        let first = resolve_items(&orchestrator).await;
        assert_eq!(first.source, ResultSource::Fallback(FallbackReason::AuthRejected));
        assert_eq!(provider.calls(), 1);

        let second = resolve_items(&orchestrator).await;
        assert_eq!(
            second.source,
            ResultSource::Fallback(FallbackReason::ProviderUnavailable)
        );
        assert_eq!(provider.calls(), 1);
        assert_eq!(orchestrator.gate().inspections(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unusable_output_is_rejected() {
        let provider = Arc::new(ScriptedProvider::answering("Sorry, I cannot see any food."));
        let orchestrator = orchestrator(provider.clone(), usable_gate());

        let resolved: Resolved<FoodAnalysis> = orchestrator
            .resolve(EntryPoint::FoodAnalysis, pantry_request(), |s| s.food_analysis())
            .await;
        assert!(matches!(
            resolved.source,
            ResultSource::Fallback(FallbackReason::Rejected(_))
        ));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_shape_is_rejected() {
        let provider = Arc::new(ScriptedProvider::answering(
            &json!({"dishName": "Idli", "calories": 120}).to_string(),
        ));
        let orchestrator = orchestrator(provider, usable_gate());

        let resolved: Resolved<FoodAnalysis> = orchestrator
            .resolve(EntryPoint::FoodAnalysis, pantry_request(), |s| s.food_analysis())
            .await;
        match resolved.source {
            ResultSource::Fallback(FallbackReason::Rejected(reason)) => {
                assert!(reason.contains("confidence"))
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unavailable_provider_falls_back() {
        let orchestrator = Orchestrator::builder()
            .provider(Arc::new(UnavailableProvider::new("no transport")))
            .gate(usable_gate())
            .build()
            .unwrap();

        let resolved = resolve_items(&orchestrator).await;
        assert_eq!(resolved.source, ResultSource::Fallback(FallbackReason::AuthRejected));
        assert!(!orchestrator.gate().is_available());
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = Orchestrator::builder().build();
        assert!(matches!(result, Err(RuntimeError::ProviderNotConfigured(_))));
    }

    #[test]
    fn test_builder_validates_config() {
        let mut config = RuntimeConfig::default();
        config.retry.max_attempts = 0;

        let result = Orchestrator::builder()
            .provider(Arc::new(UnavailableProvider::default()))
            .config(config)
            .build();
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[test]
    fn test_builder_default_gate_uses_config_credential() {
        let mut config = RuntimeConfig::default();
        config.provider.options = json!({"api_key": "AIzaConfiguredKey1234567"});

        let orchestrator = Orchestrator::builder()
            .provider(Arc::new(UnavailableProvider::default()))
            .config(config)
            .build()
            .unwrap();
        assert!(orchestrator.gate().is_available());
        assert!(!format!("{:?}", orchestrator).contains("AIzaConfiguredKey1234567"));
    }
}
