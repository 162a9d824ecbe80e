//! `jamsim surge`

use anyhow::{Context, Result};
use clap::Args;
use jamsim_core::{surge_attack, ModelParams};
use tracing::info;

/// Arguments for a single surge evaluation
#[derive(Args, Debug)]
pub struct SurgeArgs {
    /// Reputation-window volume of each honest peer
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub peers: Vec<u64>,

    /// Rank of the most valuable peer the attacker cuts off
    #[arg(long)]
    pub cutoff: usize,
}

/// Model the surge and decide whether the node loses revenue.
pub fn run(args: &SurgeArgs, params: &ModelParams) -> Result<String> {
    let outcome =
        surge_attack(&args.peers, args.cutoff, params).context("Failed to model surge attack")?;
    let success = outcome
        .success(params)
        .context("Failed to evaluate surge attack")?;

    info!(
        peers = args.peers.len(),
        cutoff = args.cutoff,
        success,
        "Evaluated surge attack"
    );

    Ok(format!("success: {success}\n{outcome}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use jamsim_core::JamSimError;

    #[test]
    fn test_below_floor_is_not_success() {
        let args = SurgeArgs {
            peers: vec![240_000, 24_000, 120_000],
            cutoff: 1,
        };
        let output = run(&args, &ModelParams::default()).unwrap();
        assert!(output.starts_with("success: false"));
    }

    #[test]
    fn test_cutoff_past_peers() {
        let args = SurgeArgs {
            peers: vec![1_000, 2_000],
            cutoff: 2,
        };
        let err = run(&args, &ModelParams::default()).unwrap_err();
        assert_matches!(
            err.downcast_ref::<JamSimError>(),
            Some(JamSimError::Config { .. })
        );
    }
}
