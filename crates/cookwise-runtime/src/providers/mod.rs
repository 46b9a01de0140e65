//! Generative provider abstractions for cookwise-runtime.
//!
//! This module defines the trait every text/vision backend implements, the
//! request types passed to it, and the error taxonomy the resilience layer
//! uses to decide between retrying and giving up.
//!
//! ## Security
//!
//! All providers use the [`secrets`] module for credential handling.
//! See [`ApiCredential`] for the recommended patterns.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use thiserror::Error;

mod factory;
pub mod secrets;

#[cfg(feature = "gemini")]
mod gemini;

pub use factory::{ProviderFactory, ProviderRegistry};
pub use secrets::{ApiCredential, CredentialPolicy, CredentialSource, GEMINI_API_KEY_ENV};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiProvider, GeminiProviderFactory};

lazy_static! {
    /// Messages that mean the credential itself was refused.
    static ref AUTH_MARKERS: Regex = Regex::new(
        r"(?i)(api[ _-]?key|credential|expired|unauthenticated|unauthorized|permission[ _]denied)"
    ).unwrap();

    static ref DATA_URL: Regex = Regex::new(
        r"(?s)^data:(image/[A-Za-z0-9.+-]+);base64,(.*)$"
    ).unwrap();
}

/// Errors from generative providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// How a failed attempt is treated by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Worth another attempt
    Transient,

    /// The credential is bad; stop and close the gate
    Auth,
}

impl ProviderError {
    pub fn failure_class(&self) -> FailureClass {
        match self {
            ProviderError::AuthError(_) | ProviderError::NotConfigured(_) => FailureClass::Auth,
            ProviderError::ApiError { status, .. } if matches!(status, 401 | 403) => {
                FailureClass::Auth
            }
            ProviderError::ApiError { message, .. } | ProviderError::HttpError(message)
                if AUTH_MARKERS.is_match(message) =>
            {
                FailureClass::Auth
            }
            _ => FailureClass::Transient,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.failure_class() == FailureClass::Transient
    }
}

/// Binary image attached to a vision request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Build from a `data:image/...;base64,` URL.
    ///
    /// Anything that is not a decodable image data URL becomes an empty
    /// payload rather than an error.
    pub fn from_data_url(url: &str) -> Self {
        match DATA_URL.captures(url.trim()) {
            Some(caps) => {
                let mime = caps.get(1).map_or("image/jpeg", |m| m.as_str());
                let data = caps.get(2).map_or("", |m| m.as_str());
                Self::from_base64(data, mime)
            }
            None => Self::new(Vec::new(), "image/jpeg"),
        }
    }

    /// Build from bare base64 data.
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> Self {
        let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64.decode(cleaned).unwrap_or_default();
        Self::new(bytes, mime_type)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One logical generation call: a prompt plus an optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image: ImagePayload) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }

    pub fn is_vision(&self) -> bool {
        self.image.is_some()
    }
}

/// Model parameters for a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.4,
            max_output_tokens: 2048,
        }
    }
}

/// Provider abstraction allows swapping generative backends.
///
/// This is the only place remote calls are made. Retry, timeout and
/// credential bookkeeping live in [`crate::resilience`], not here.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate text for a prompt (and image, for vision requests).
    async fn generate(
        &self,
        request: &GenerationRequest,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;

    /// Check if provider is healthy.
    async fn health_check(&self) -> bool;

    /// Get provider name for logs.
    fn name(&self) -> &str;
}

/// Provider used when no real backend could be constructed.
#[derive(Debug, Clone, Default)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl GenerativeProvider for UnavailableProvider {
    async fn generate(
        &self,
        _request: &GenerationRequest,
        _config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(self.reason.clone()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
