//! Resilience patterns for cookwise-runtime.
//!
//! This module provides:
//! - The availability gate that keeps calls away from a bad credential
//! - Retry with linear backoff and a per-attempt timeout
//! - The fallback supplier used when no live answer is available

mod fallback;
mod gate;
mod retry;

pub use fallback::FallbackSupplier;
pub use gate::{Availability, ProviderGate};
pub use retry::{GenerationOutcome, Invoker, LinearBackoff, LinearBackoffBuilder, RetryConfig};

pub(crate) use retry::duration_human;
