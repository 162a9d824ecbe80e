//! Error taxonomy for attack evaluation
//!
//! Every failure is a malformed input, an unusable hold duration, or a broken
//! model invariant. Callers are expected to discard the scenario that produced
//! the error; nothing here is retried.

use serde::{Deserialize, Serialize};

/// Unified error type for jamsim operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum JamSimError {
    /// Malformed scenario or model parameters
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the invalid input
        message: String,
    },

    /// Hold duration cannot be converted into endorsable capacity
    #[error("Insufficient hold duration: {hold} (must be in 1..={max})")]
    InsufficientHoldDuration {
        /// Hold duration that was supplied
        hold: u64,
        /// Protocol maximum hold duration
        max: u64,
    },

    /// A model invariant was broken; indicates a logic defect
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Error message describing the violated invariant
        message: String,
    },
}

impl JamSimError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a hold duration error
    pub fn hold_duration(hold: u64, max: u64) -> Self {
        Self::InsufficientHoldDuration { hold, max }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by a malformed input rather than
    /// a defect in the model itself.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::InvariantViolation { .. })
    }
}

/// Standard Result type for jamsim operations
pub type Result<T> = std::result::Result<T, JamSimError>;

impl From<toml::de::Error> for JamSimError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {err}"))
    }
}
