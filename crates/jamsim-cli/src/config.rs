//! Model parameter loading

use anyhow::{Context, Result};
use jamsim_core::ModelParams;
use std::path::Path;
use tracing::{debug, info};

/// Load model parameters from `path`, falling back to the reference model
/// when the file does not exist.
pub fn load_params(path: &Path) -> Result<ModelParams> {
    if !path.exists() {
        debug!(path = %path.display(), "No params file, using defaults");
        return Ok(ModelParams::default());
    }

    let params = ModelParams::load_from_file(path)
        .with_context(|| format!("Failed to load params from {}", path.display()))?;
    info!(path = %path.display(), "Loaded model params");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let params = load_params(&dir.path().join("jamsim.toml")).unwrap();
        assert_eq!(params, ModelParams::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jamsim.toml");
        std::fs::write(&path, "max_hold_duration = 144\n").unwrap();

        let params = load_params(&path).unwrap();
        assert_eq!(params.max_hold_duration, 144);
        assert_eq!(params.capacity_numerator, ModelParams::default().capacity_numerator);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jamsim.toml");
        std::fs::write(&path, "max_hold_duration = \"forever\"\n").unwrap();

        let err = load_params(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load params"));
    }
}
