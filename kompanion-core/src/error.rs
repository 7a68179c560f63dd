//! Error types for the Kitchen Kompanion core library.

use thiserror::Error;

/// Top-level error type for core operations.
///
/// Generation itself cannot fail: the procedures in [`crate::generate`] are
/// total over their input. Only loading configuration touches the outside world.
#[derive(Error, Debug)]
pub enum KompanionError {
    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, KompanionError>;
