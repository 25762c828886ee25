//! Error types for the LZP codec
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LzpError>;

/// Main error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LzpError {
    /// Byte stream error
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// Model dump error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Errors raised at the byte source/sink boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The source failed while pulling the next byte.
    ///
    /// End-of-data is not an error; sources report it as `Ok(None)`.
    #[error("Source read failed: {0}")]
    Read(String),

    /// The sink rejected a write. Fatal for the current operation.
    #[error("Sink rejected write: {0}")]
    Write(String),
}

/// Errors while reading or writing a model dump
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A dump entry is not a decimal integer
    #[error("Malformed dump entry {index}: {reason}")]
    Malformed { index: usize, reason: String },

    /// A dump entry does not fit in a table slot
    #[error("Dump entry {index} out of range: {value} is not a byte")]
    ValueOutOfRange { index: usize, value: i64 },

    /// The dump ended before every table slot was filled
    #[error("Truncated dump: expected {expected} entries, got {got}")]
    Truncated { expected: usize, got: usize },

    /// Predictor name not recognized
    #[error("Unknown predictor: {0}")]
    UnknownPredictor(String),

    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err.to_string())
    }
}
