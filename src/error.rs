//! Error types for the convertapi-detect library.
//!
//! Two distinct error categories reflect two distinct owners:
//!
//! * [`FormatError`] — **Local**: the resource name carries no usable
//!   extension and there was no upload to ask the service. Deterministic and
//!   always recoverable by passing the source format explicitly.
//!
//! * [`TransportError`] — **Remote**: the upload round-trip failed
//!   (bad credentials, network, server fault). Owned by the transport
//!   collaborator and surfaced unchanged.
//!
//! [`DetectError`] is what [`crate::FormatDetector::run`] returns; both
//! variants are transparent so the caller sees the original message.

use thiserror::Error;

/// The source format could not be inferred from the resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to detect format of '{resource}'\nPass the source format explicitly (e.g. --from pdf).")]
pub struct FormatError {
    /// Name of the resource that was inspected.
    pub resource: String,
}

impl FormatError {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

/// Failures of the upload round-trip.
///
/// Produced by [`crate::upload::Uploader`] implementations. The detector never
/// retries or rewrites these.
#[derive(Debug, Error)]
pub enum TransportError {
    // ── Request errors ────────────────────────────────────────────────────
    /// Could not reach the service.
    #[error("Connection to '{url}' failed: {reason}\nCheck your internet connection.")]
    Connection { url: String, reason: String },

    /// The upload exceeded the configured timeout.
    #[error("Upload timed out after {secs}s for '{url}'")]
    Timeout { url: String, secs: u64 },

    // ── Response errors ───────────────────────────────────────────────────
    /// HTTP 401/403: credentials missing or rejected.
    #[error("Authentication failed (HTTP {status}): {message}\nSet CONVERT_API_SECRET to a valid API token.")]
    Unauthorized { status: u16, message: String },

    /// Any other 4xx response.
    #[error("Upload rejected (HTTP {status}): {message}")]
    Client { status: u16, message: String },

    /// 5xx response.
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body is not a valid upload record.
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// Error returned by [`crate::FormatDetector::run`].
#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DetectError {
    /// True when supplying an explicit source format would resolve the error.
    pub fn is_format(&self) -> bool {
        matches!(self, DetectError::Format(_))
    }
}

/// Invalid [`crate::config::ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `base_uri` is not an absolute http(s) URL.
    #[error("Invalid base URI '{uri}': {reason}")]
    InvalidBaseUri { uri: String, reason: String },

    /// A setting is out of range (e.g. a zero timeout) or the HTTP client
    /// could not be built from it.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
