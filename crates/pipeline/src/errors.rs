//! Error types for the Scribe pipeline domain.
//!
//! [`ScribeError`] covers conditions that stop the program or a save from
//! completing. [`LlmError`] is the fault type of the
//! [`LanguageModel`](crate::LanguageModel) port; the pipeline never
//! propagates it past a stage boundary and treats every variant alike.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Model-call faults
// ---------------------------------------------------------------------------

/// A fault raised by a language-model backend.
///
/// Variants describe what went wrong for log readers. Stages stringify any of
/// them into their output; no variant is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("transport failure: {message}")]
    Transport {
        /// Description from the HTTP client.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("model service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service, or the raw body.
        message: String,
    },

    /// The service refused to answer the prompt.
    #[error("prompt was blocked: {reason}")]
    Blocked {
        /// Block reason reported by the service.
        reason: String,
    },

    /// The response contained no text.
    #[error("model returned no text")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Decoder error.
        message: String,
    },

    /// The backend could not be constructed from the supplied settings.
    #[error("model backend misconfigured: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Program-level errors
// ---------------------------------------------------------------------------

/// Errors that stop the program before a run, or a save after one.
#[derive(Debug, Error)]
pub enum ScribeError {
    /// The service credential is not set. No run is attempted.
    #[error("missing credential: set {variable} in the environment or a .env file")]
    MissingCredential {
        /// Name of the environment variable that must hold the credential.
        variable: String,
    },

    /// A configuration value is present but invalid.
    #[error("configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The article could not be written.
    #[error("failed to write article to {}", path.display())]
    Storage {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
