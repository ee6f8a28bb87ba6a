//! Error types for Coursegrid operations.
//!
//! The layout and filter engines are total over their inputs and never
//! fail. [`GridError`] covers what surrounds them: the schedule source,
//! file access and configuration.

use std::io;

use thiserror::Error;

/// The main error type for Coursegrid operations.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Schedule source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Create a new `Source` error.
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
