//! Model parameters
//!
//! Accounting windows, capacity constants and the surge floor are protocol
//! parameters rather than laws, so they are carried as a single value that
//! every entry point receives. Defaults match the reference proposal:
//! a 2 week revenue window, a 24 week reputation window, and a slot capacity
//! ratio of 90 / (10 * 60).

use crate::converter::Converter;
use crate::errors::{JamSimError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Protocol parameters for the attack model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Length of the window that outgoing revenue is tracked over, in weeks.
    pub revenue_period_weeks: u64,
    /// Length of the window that incoming reputation is tracked over, in weeks.
    pub reputation_period_weeks: u64,
    /// Numerator `K` of the cost/capacity conversion.
    pub capacity_numerator: u64,
    /// Denominator `C` of the cost/capacity conversion, per unit of hold.
    pub capacity_denominator: u64,
    /// Largest hold duration the protocol allows.
    pub max_hold_duration: u64,
    /// Smallest HTLC (msat) worth protecting, used as the surge attack floor.
    /// Roughly $1 at the price level the defaults were calibrated against.
    pub minimum_interesting_htlc: u64,
    /// Hold duration the surge floor is priced at.
    pub reference_hold_duration: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            revenue_period_weeks: 2,
            reputation_period_weeks: 24,
            capacity_numerator: 90,
            capacity_denominator: 10 * 60,
            max_hold_duration: 2016,
            minimum_interesting_htlc: 1_700_000,
            reference_hold_duration: 100,
        }
    }
}

impl ModelParams {
    /// Check that the parameters describe a usable model.
    pub fn validate(&self) -> Result<()> {
        if self.revenue_period_weeks == 0 || self.reputation_period_weeks == 0 {
            return Err(JamSimError::config(format!(
                "accounting windows must be non-zero: revenue={} reputation={}",
                self.revenue_period_weeks, self.reputation_period_weeks
            )));
        }
        if self.revenue_period_weeks > self.reputation_period_weeks {
            return Err(JamSimError::config(format!(
                "revenue window {} exceeds reputation window {}",
                self.revenue_period_weeks, self.reputation_period_weeks
            )));
        }
        if self.capacity_numerator == 0 || self.capacity_denominator == 0 {
            return Err(JamSimError::config(format!(
                "capacity constants must be non-zero: K={} C={}",
                self.capacity_numerator, self.capacity_denominator
            )));
        }
        if self.max_hold_duration == 0 {
            return Err(JamSimError::config("max hold duration must be non-zero"));
        }
        if self.reference_hold_duration == 0
            || self.reference_hold_duration > self.max_hold_duration
        {
            return Err(JamSimError::config(format!(
                "reference hold duration {} must be in 1..={}",
                self.reference_hold_duration, self.max_hold_duration
            )));
        }
        Ok(())
    }

    /// Reproject a reputation-window volume onto the revenue window.
    ///
    /// Traffic is assumed to flow at a constant rate, so the conversion is a
    /// plain ratio of window lengths.
    pub fn revenue_from_reputation(&self, reputation: u64) -> u64 {
        let scaled = u128::from(reputation) * u128::from(self.revenue_period_weeks)
            / u128::from(self.reputation_period_weeks);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Cost/capacity converter built from these constants.
    pub fn converter(&self) -> Converter {
        Converter::new(
            self.capacity_numerator,
            self.capacity_denominator,
            self.max_hold_duration,
        )
    }

    /// Parse and validate parameters from TOML. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JamSimError::config(format!(
                "Failed to read params file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the parameters as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| JamSimError::config(format!("Failed to serialize params: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults_are_valid() {
        let params = ModelParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.revenue_from_reputation(120_000), 10_000);
    }

    #[test]
    fn test_rejects_zero_windows_and_constants() {
        let params = ModelParams {
            reputation_period_weeks: 0,
            ..ModelParams::default()
        };
        assert_matches!(params.validate(), Err(JamSimError::Config { .. }));

        let params = ModelParams {
            capacity_denominator: 0,
            ..ModelParams::default()
        };
        assert_matches!(params.validate(), Err(JamSimError::Config { .. }));

        let params = ModelParams {
            revenue_period_weeks: 30,
            ..ModelParams::default()
        };
        assert_matches!(params.validate(), Err(JamSimError::Config { .. }));
    }

    #[test]
    fn test_reference_hold_must_fit_protocol_max() {
        let params = ModelParams {
            reference_hold_duration: 5000,
            ..ModelParams::default()
        };
        assert_matches!(params.validate(), Err(JamSimError::Config { .. }));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let params = ModelParams::from_toml_str("revenue_period_weeks = 4\n").unwrap();
        assert_eq!(params.revenue_period_weeks, 4);
        assert_eq!(params.reputation_period_weeks, 24);
        assert_eq!(params.revenue_from_reputation(120_000), 20_000);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert_matches!(
            ModelParams::from_toml_str("revenue_period_weeks = \"two\""),
            Err(JamSimError::Config { .. })
        );
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let params = ModelParams {
            max_hold_duration: 4032,
            ..ModelParams::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        std::fs::write(&path, params.to_toml_string().unwrap()).unwrap();

        assert_eq!(ModelParams::load_from_file(&path).unwrap(), params);
    }
}
