//! Backend error types.

use thiserror::Error;

/// Errors that can occur while serving or selecting a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Building a response failed unexpectedly. Delivered through the
    /// callback's error arm, never propagated to the caller.
    #[error("{0}")]
    Generation(String),

    /// A non-default backend could not be constructed or initialised.
    #[error("Backend initialisation failed: {0}")]
    BackendInit(String),

    /// Persisted preferences could not be read or written.
    #[error("Preference store access failed: {0}")]
    ConfigAccess(String),

    /// The backend was cleaned up before the request was issued.
    #[error("AI backend has been released")]
    Released,

    /// The request was cancelled before a result was delivered.
    #[error("Request cancelled")]
    Cancelled,

    /// Input rejected before reaching a backend.
    #[error("{0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for AiError {
    fn from(err: std::io::Error) -> Self {
        AiError::ConfigAccess(err.to_string())
    }
}
