//! `jamsim sweep`

use anyhow::{bail, Context, Result};
use clap::Args;
use jamsim_core::ModelParams;
use jamsim_scenario::{AcceptanceFilter, ScenarioGenerator, Sweep, SweepSummary};
use std::fmt::Write;

/// Arguments for a randomized sweep
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Generator seed
    #[arg(short, long, default_value = "0")]
    pub seed: u64,

    /// Number of scenarios to evaluate
    #[arg(short = 'n', long, default_value = "1000")]
    pub count: u64,

    /// Worker threads
    #[arg(short, long, default_value = "1")]
    pub workers: usize,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the sweep. Fails if any scenario broke a model invariant.
pub fn run(args: &SweepArgs, params: &ModelParams) -> Result<String> {
    let generator = ScenarioGenerator::new(args.seed, AcceptanceFilter::for_params(params))
        .context("Failed to create scenario generator")?;
    let summary = Sweep::new(*params, generator)
        .and_then(|sweep| sweep.with_workers(args.workers))
        .context("Failed to configure sweep")?
        .run(args.count);

    if !summary.invariant_violations.is_empty() {
        bail!(
            "{} scenario(s) violated a model invariant:\n{}",
            summary.invariant_violations.len(),
            render(&summary)?
        );
    }

    if args.json {
        return serde_json::to_string_pretty(&summary).context("Failed to serialize summary");
    }
    render(&summary)
}

fn render(summary: &SweepSummary) -> Result<String> {
    let mut out = summary.to_string();
    let findings = summary
        .effective_ladders
        .iter()
        .map(|finding| ("ladder", finding))
        .chain(summary.successful_surges.iter().map(|finding| ("surge", finding)))
        .chain(
            summary
                .invariant_violations
                .iter()
                .map(|finding| ("invariant", finding)),
        );

    for (kind, finding) in findings {
        write!(
            out,
            "\n\n[{kind} #{}] {}\n{}",
            finding.index, finding.scenario, finding.detail
        )?;
    }
    Ok(out)
}
