//! # cookwise-runtime
//!
//! Live generation for the Cookwise assistants.
//!
//! This crate puts a generative model behind the four assistants (meal
//! planner, wellness coach, food scanner, pantry chef) and guarantees that
//! every entry point returns a well-formed record, live or not.
//!
//! ## Pipeline
//!
//! 1. The [`ProviderGate`] decides once whether the credential is usable
//! 2. The [`Invoker`] calls the provider with bounded retries, linear backoff
//!    and a per-attempt timeout
//! 3. `cookwise-core` decodes and validates the model text
//! 4. The [`FallbackSupplier`] answers whenever any step fails
//!
//! The deterministic pieces (decoding, schemas, fallback catalogs) live in
//! `cookwise-core` and never make network calls.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cookwise_runtime::{Assistants, Orchestrator, ProviderRegistry, RuntimeConfig};
//!
//! let config = RuntimeConfig::from_yaml_file("cookwise.yaml")?;
//! let provider = ProviderRegistry::with_defaults()
//!     .create_or_unavailable(&config.provider.kind, &config.provider.options);
//! let orchestrator = Orchestrator::builder()
//!     .provider(provider)
//!     .config(config)
//!     .build()?;
//!
//! let assistants = Assistants::new(Arc::new(orchestrator));
//! let tip = assistants.wellness_coach.quick_tip("hydration").await;
//! ```

pub mod assistants;
pub mod config;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod resilience;

#[cfg(test)]
mod testing;

pub use assistants::{
    Assistants, FoodScanner, HealthPreferences, MealPlanner, PantryChef, WellnessCoach,
};
pub use config::{ConfigError, ProviderSettings, RuntimeConfig};
pub use orchestrator::{
    FallbackReason, Orchestrator, OrchestratorBuilder, Resolved, ResultSource, RuntimeError,
};
pub use providers::{
    ApiCredential, CredentialPolicy, CredentialSource, GenerationConfig, GenerationRequest,
    GenerativeProvider, ImagePayload, ProviderError, ProviderFactory, ProviderRegistry,
    UnavailableProvider,
};
pub use resilience::{
    Availability, FallbackSupplier, GenerationOutcome, Invoker, ProviderGate, RetryConfig,
};

#[cfg(feature = "gemini")]
pub use providers::{GeminiProvider, GeminiProviderFactory};
