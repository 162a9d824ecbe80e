//! TOML scenario files
//!
//! ```toml
//! [params]
//! max_hold_duration = 2016
//!
//! [[scenarios]]
//! name = "reference"
//! first_node_traffic = 120000
//! attacker_payment = 30000
//! hold_duration = 300
//! traffic_flows = [100, 10, 25, 50]
//! honest_peers = [24000, 120000, 240000]
//! cutoff_index = 1
//! ```
//!
//! `params` is optional and falls back to the parameters the caller loads
//! the file with; `filter` defaults to the protocol limits of the effective
//! params. Every scenario must pass the filter; a file with an out of range
//! scenario is rejected as a whole.

use crate::error::{Result, ScenarioError};
use crate::scenario::{AcceptanceFilter, Scenario};
use jamsim_core::ModelParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A scenario with a name to report it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedScenario {
    /// Scenario name
    pub name: String,
    /// Scenario inputs
    #[serde(flatten)]
    pub scenario: Scenario,
}

/// Parsed scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    /// Model parameters the scenarios are evaluated under. Always set once
    /// loaded.
    #[serde(default)]
    pub params: Option<ModelParams>,
    /// Acceptance filter; defaults to the protocol limits of `params`.
    #[serde(default)]
    pub filter: Option<AcceptanceFilter>,
    /// Scenarios in file order.
    #[serde(default)]
    pub scenarios: Vec<NamedScenario>,
}

impl ScenarioFile {
    /// Parse and validate a scenario file body. A file without `[params]`
    /// takes `fallback`.
    pub fn from_toml_str(content: &str, path: &Path, fallback: &ModelParams) -> Result<Self> {
        let mut file: Self = toml::from_str(content).map_err(|e| ScenarioError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.params.get_or_insert(*fallback);

        let params = file.params();
        params.validate()?;
        let filter = file.filter();
        filter.validate()?;

        for named in &file.scenarios {
            named
                .scenario
                .check(&filter)
                .map_err(|reason| ScenarioError::Rejected {
                    name: named.name.clone(),
                    reason,
                })?;
        }

        Ok(file)
    }

    /// Load a scenario file from disk.
    pub fn load(path: &Path, fallback: &ModelParams) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&content, path, fallback)?;
        info!(
            path = %path.display(),
            scenarios = file.scenarios.len(),
            "Loaded scenario file"
        );
        Ok(file)
    }

    /// Effective model parameters.
    pub fn params(&self) -> ModelParams {
        self.params.unwrap_or_default()
    }

    /// Effective acceptance filter.
    pub fn filter(&self) -> AcceptanceFilter {
        self.filter
            .unwrap_or_else(|| AcceptanceFilter::for_params(&self.params()))
    }
}
