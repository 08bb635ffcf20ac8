//! Error types for G-code emission.

use thiserror::Error;

/// Errors that can occur while emitting G-code.
#[derive(Error, Debug)]
pub enum GcodeError {
    /// The output sink reported a write failure.
    #[error("failed to write instruction stream: {0}")]
    Io(#[from] std::io::Error),

    /// Settings rejected before any output was produced.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for G-code operations.
pub type Result<T> = std::result::Result<T, GcodeError>;
