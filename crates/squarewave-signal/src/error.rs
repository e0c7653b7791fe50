//! Error types for signal generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while generating, reading or writing signals.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Requested sample count is not positive.
    #[error("invalid sample size: {size} (must be at least 1)")]
    InvalidSampleSize {
        /// The rejected sample count.
        size: usize,
    },

    /// Invalid configuration value.
    #[error("invalid config '{name}': {message}")]
    InvalidConfig {
        /// Config field name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Invalid noise parameters.
    #[error("invalid noise parameters: {message}")]
    InvalidNoise {
        /// Error message.
        message: String,
    },

    /// Noised and filtered sequences differ in length.
    #[error("length mismatch: noised signal has {noised} samples, filtered signal has {filtered}")]
    LengthMismatch {
        /// Length of the noised sequence.
        noised: usize,
        /// Length of the filtered sequence.
        filtered: usize,
    },

    /// File could not be read or written.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stream write failed (stdout, in-memory writers).
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::SignalConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SignalError {
    /// Creates an invalid config error.
    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid noise error.
    pub fn invalid_noise(message: impl Into<String>) -> Self {
        Self::InvalidNoise {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable error code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            SignalError::InvalidSampleSize { .. } => "SIGNAL_001",
            SignalError::InvalidConfig { .. } => "SIGNAL_002",
            SignalError::InvalidNoise { .. } => "SIGNAL_003",
            SignalError::LengthMismatch { .. } => "SIGNAL_004",
            SignalError::Io { .. } => "SIGNAL_005",
            SignalError::Stream(_) => "SIGNAL_006",
            SignalError::ConfigParse(_) => "SIGNAL_007",
        }
    }
}
