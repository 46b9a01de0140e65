//! Scripted provider and helpers shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::RuntimeConfig;
use crate::orchestrator::Orchestrator;
use crate::providers::{
    ApiCredential, CredentialPolicy, CredentialSource, GenerationConfig, GenerationRequest,
    GenerativeProvider, ProviderError,
};
use crate::resilience::{FallbackSupplier, ProviderGate};

pub(crate) const VALID_KEY: &str = "AIzaSyTestKey1234567890abcdef";

/// Replays a queue of results, then repeats `exhausted` (or fails).
pub(crate) struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    latency: Mutex<VecDeque<Duration>>,
    exhausted: Option<fn() -> ProviderError>,
    calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            latency: Mutex::new(VecDeque::new()),
            exhausted: None,
            calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a fresh error from `make`.
    pub fn failing(make: fn() -> ProviderError) -> Self {
        Self {
            exhausted: Some(make),
            ..Self::new(Vec::new())
        }
    }

    /// Answers every call with `text`.
    pub fn answering(text: &str) -> Self {
        Self::new((0..16).map(|_| Ok(text.to_string())).collect())
    }

    /// Per-call delays, consumed in order.
    pub fn with_latency(self, latency: Vec<Duration>) -> Self {
        *self.latency.lock() = latency.into();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        _config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().push(Instant::now());
        self.requests.lock().push(request.clone());

        let next = self.script.lock().pop_front();
        let delay = self.latency.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match (next, self.exhausted) {
            (Some(result), _) => result,
            (None, Some(make)) => Err(make()),
            (None, None) => Err(ProviderError::HttpError("script exhausted".into())),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub(crate) fn gate_for(key: &str) -> Arc<ProviderGate> {
    Arc::new(ProviderGate::new(
        ApiCredential::new(key, CredentialSource::Programmatic, "Test key"),
        CredentialPolicy::default(),
    ))
}

pub(crate) fn usable_gate() -> Arc<ProviderGate> {
    gate_for(VALID_KEY)
}

pub(crate) fn closed_gate() -> Arc<ProviderGate> {
    gate_for("your_api_key_here")
}

pub(crate) fn orchestrator(
    provider: Arc<ScriptedProvider>,
    gate: Arc<ProviderGate>,
) -> Arc<Orchestrator> {
    let config = RuntimeConfig {
        fallback_seed: Some(7),
        ..RuntimeConfig::default()
    };

    Arc::new(
        Orchestrator::builder()
            .config(config)
            .provider(provider)
            .gate(gate)
            .fallback(FallbackSupplier::seeded(7))
            .build()
            .unwrap(),
    )
}
