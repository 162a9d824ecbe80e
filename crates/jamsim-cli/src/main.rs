//! jamsim CLI
//!
//! Evaluates laddering and surge attacks against reputation-based HTLC
//! endorsement, one scenario at a time or as seeded sweeps.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    ladder::{self, LadderArgs},
    params,
    run::{self, RunArgs},
    surge::{self, SurgeArgs},
    sweep::{self, SweepArgs},
};

#[derive(Parser)]
#[command(name = "jamsim")]
#[command(about = "jamsim - Reputation attack evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model parameters file
    #[arg(short, long, global = true, default_value = "jamsim.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a laddering attack on a single route
    Ladder(LadderArgs),
    /// Evaluate a surge attack on a single node
    Surge(SurgeArgs),
    /// Evaluate randomly generated scenarios
    Sweep(SweepArgs),
    /// Evaluate the scenarios in a TOML file
    Run(RunArgs),
    /// Print the effective model parameters
    Params,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let params = config::load_params(&cli.config)?;

    let output = match cli.command {
        Commands::Ladder(args) => ladder::run(&args, &params)?,
        Commands::Surge(args) => surge::run(&args, &params)?,
        Commands::Sweep(args) => sweep::run(&args, &params)?,
        Commands::Run(args) => run::run(&args, &params)?,
        Commands::Params => params::run(&params)?,
    };

    println!("{output}");
    Ok(())
}
