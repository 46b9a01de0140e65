//! Availability gate in front of the generative provider.
//!
//! The credential is inspected once, on first use, and the verdict is
//! cached. An authentication failure reported by the provider closes the
//! gate for the rest of the process; only [`ProviderGate::reset`] reopens it.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::providers::{ApiCredential, CredentialPolicy, CredentialSource, GEMINI_API_KEY_ENV};

static GLOBAL: OnceLock<Arc<ProviderGate>> = OnceLock::new();

/// Cached verdict on the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Not inspected yet
    Unknown,

    /// Credential passed the policy and has not been rejected
    Usable,

    /// Credential failed the policy or was rejected by the provider
    Unusable,
}

pub struct ProviderGate {
    credential: ApiCredential,
    policy: CredentialPolicy,
    state: RwLock<Availability>,
    inspections: AtomicU64,
}

impl ProviderGate {
    pub fn new(credential: ApiCredential, policy: CredentialPolicy) -> Self {
        Self {
            credential,
            policy,
            state: RwLock::new(Availability::Unknown),
            inspections: AtomicU64::new(0),
        }
    }

    /// Process-wide gate, built from `GEMINI_API_KEY` with the default policy
    /// unless [`ProviderGate::init_global`] ran first.
    pub fn global() -> Arc<ProviderGate> {
        GLOBAL
            .get_or_init(|| {
                let credential = ApiCredential::from_env(GEMINI_API_KEY_ENV, "Gemini API key")
                    .unwrap_or_else(|_| ApiCredential::missing("Gemini API key"));
                Arc::new(ProviderGate::new(credential, CredentialPolicy::default()))
            })
            .clone()
    }

    /// Install the process-wide gate. Returns the existing gate if one was
    /// already installed.
    pub fn init_global(credential: ApiCredential, policy: CredentialPolicy) -> Arc<ProviderGate> {
        GLOBAL
            .get_or_init(|| Arc::new(ProviderGate::new(credential, policy)))
            .clone()
    }

    /// Whether the provider may be called.
    pub fn is_available(&self) -> bool {
        match *self.state.read() {
            Availability::Usable => return true,
            Availability::Unusable => return false,
            Availability::Unknown => {}
        }

        let mut state = self.state.write();
        if *state == Availability::Unknown {
            self.inspections.fetch_add(1, Ordering::Relaxed);
            if self.policy.accepts(self.credential.expose()) {
                *state = Availability::Usable;
                tracing::info!(
                    source = %self.credential.source(),
                    "Provider gate open, credential accepted"
                );
            } else {
                *state = Availability::Unusable;
                tracing::warn!(
                    credential = %self.credential,
                    "Provider gate closed, credential rejected by policy"
                );
            }
        }
        *state == Availability::Usable
    }

    /// Close the gate after the provider rejected the credential.
    pub fn mark_unusable(&self) {
        let mut state = self.state.write();
        if *state != Availability::Unusable {
            *state = Availability::Unusable;
            tracing::warn!("Provider gate closed after authentication failure");
        }
    }

    /// Forget the cached verdict; the credential is inspected again on the
    /// next check.
    pub fn reset(&self) {
        *self.state.write() = Availability::Unknown;
    }

    pub fn state(&self) -> Availability {
        *self.state.read()
    }

    /// How many times the credential has been run through the policy.
    pub fn inspections(&self) -> u64 {
        self.inspections.load(Ordering::Relaxed)
    }

    /// Where the credential came from; never its value.
    pub fn credential_source(&self) -> CredentialSource {
        self.credential.source()
    }
}

impl std::fmt::Debug for ProviderGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGate")
            .field("credential", &self.credential)
            .field("state", &self.state())
            .finish()
    }
}
