//! `jamsim run`

use anyhow::{Context, Result};
use clap::Args;
use jamsim_core::ModelParams;
use jamsim_scenario::{evaluate, ScenarioFile};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

/// Arguments for evaluating a scenario file
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario file
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Evaluate every scenario in the file. Parameters in the file take
/// precedence over the CLI config.
pub fn run(args: &RunArgs, params: &ModelParams) -> Result<String> {
    let file = ScenarioFile::load(&args.file, params)
        .with_context(|| format!("Failed to load scenarios from {}", args.file.display()))?;
    let params = file.params();

    let mut out = String::new();
    let mut effective = 0usize;
    for named in &file.scenarios {
        let report = evaluate(&named.scenario, &params);
        if report.ladder_effective() || report.surge_successful() {
            effective += 1;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        write!(out, "[{}] {}\n{}", named.name, named.scenario, report)?;
    }

    info!(
        scenarios = file.scenarios.len(),
        effective, "Evaluated scenario file"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"
[[scenarios]]
name = "reference"
first_node_traffic = 120000
attacker_payment = 30000
hold_duration = 300
traffic_flows = [100, 10, 25, 50]
honest_peers = [24000, 120000, 240000]
cutoff_index = 1
"#;

    #[test]
    fn test_evaluates_each_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scenarios.toml");
        std::fs::write(&file, FILE).unwrap();

        let output = run(&RunArgs { file }, &ModelParams::default()).unwrap();
        assert!(output.starts_with("[reference]"));
        assert!(output.contains("endorsed: 10"));
        assert!(output.contains("surge success: false"));
    }

    #[test]
    fn test_cli_params_apply_without_file_params() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scenarios.toml");
        std::fs::write(
            &file,
            FILE.replace("name = \"reference\"", "name = \"long\"")
                .replace("hold_duration = 300", "hold_duration = 3000"),
        )
        .unwrap();

        let params = ModelParams {
            max_hold_duration: 4032,
            ..ModelParams::default()
        };
        let output = run(&RunArgs { file: file.clone() }, &params).unwrap();
        assert!(output.starts_with("[long]"));
        assert!(output.contains("hold: 3000"));

        assert!(run(&RunArgs { file }, &ModelParams::default()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            file: dir.path().join("missing.toml"),
        };
        assert!(run(&args, &ModelParams::default()).is_err());
    }
}
