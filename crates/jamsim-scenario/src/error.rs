//! Scenario layer errors

use jamsim_core::JamSimError;
use std::path::PathBuf;

/// Errors raised while loading or preparing scenarios.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("Failed to read scenario file {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Scenario file is not valid TOML for the scenario schema
    #[error("Failed to parse scenario file {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A scenario falls outside the acceptance filter
    #[error("Scenario '{name}' rejected: {reason}")]
    Rejected {
        /// Scenario name
        name: String,
        /// Which filter it failed
        reason: String,
    },

    /// Engine rejected the model parameters
    #[error(transparent)]
    Engine(#[from] JamSimError),
}

/// Result type for scenario operations
pub type Result<T> = std::result::Result<T, ScenarioError>;
