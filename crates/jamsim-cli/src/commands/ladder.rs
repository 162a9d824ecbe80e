//! `jamsim ladder`

use anyhow::{Context, Result};
use clap::Args;
use jamsim_core::{Ladder, ModelParams};
use tracing::info;

/// Arguments for a single laddering evaluation
#[derive(Args, Debug)]
pub struct LadderArgs {
    /// Traffic forwarded by the first node over the reputation window
    #[arg(long)]
    pub first_node_traffic: u64,

    /// Amount the attacker pays the first hop
    #[arg(short, long)]
    pub payment: u64,

    /// Hold duration of the jamming HTLC, in blocks
    #[arg(long)]
    pub hold: u64,

    /// Percentage of each hop's traffic the previous hop contributes
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub flows: Vec<u8>,
}

/// Build the route and evaluate the attack.
pub fn run(args: &LadderArgs, params: &ModelParams) -> Result<String> {
    let ladder = Ladder::from_percentages(args.first_node_traffic, &args.flows, params)
        .context("Failed to build ladder")?;
    let evaluation = ladder
        .run(args.payment, args.hold, params)
        .context("Failed to evaluate laddering attack")?;

    info!(
        channels = ladder.len(),
        endorsed = evaluation.total_endorsed,
        effective = evaluation.effective(),
        "Evaluated laddering attack"
    );

    Ok(format!("{ladder}\n{evaluation}"))
}
