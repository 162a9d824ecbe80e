//! `jamsim params`

use anyhow::{Context, Result};
use jamsim_core::ModelParams;

/// Render the effective parameters as TOML.
pub fn run(params: &ModelParams) -> Result<String> {
    params
        .to_toml_string()
        .context("Failed to render model params")
}
