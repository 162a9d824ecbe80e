//! Randomized sweeps
//!
//! A sweep evaluates a run of generated scenarios and keeps every scenario
//! where an attack came out ahead. Work is split across scoped worker threads
//! by index; since scenarios are keyed by `(seed, index)` and findings are
//! ordered by index, the summary is the same for any worker count.

use crate::evaluate::{evaluate, ScenarioReport};
use crate::generator::ScenarioGenerator;
use crate::scenario::Scenario;
use jamsim_core::{JamSimError, ModelParams, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// A scenario where an attack came out ahead, or the model broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Index of the scenario within the sweep.
    pub index: u64,
    /// Scenario inputs, enough to reproduce the finding.
    pub scenario: Scenario,
    /// Rendered outcome.
    pub detail: String,
}

/// Aggregate result of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Seed the sweep ran with.
    pub seed: u64,
    /// Scenarios evaluated.
    pub scenarios: u64,
    /// Scenarios the laddering pipeline rejected.
    pub ladder_rejected: u64,
    /// Scenarios the surge pipeline rejected.
    pub surge_rejected: u64,
    /// Laddering attacks that sabotaged the target.
    pub effective_ladders: Vec<Finding>,
    /// Surge attacks that cost the node revenue.
    pub successful_surges: Vec<Finding>,
    /// Scenarios that broke a model invariant.
    pub invariant_violations: Vec<Finding>,
}

impl SweepSummary {
    fn record(&mut self, index: u64, scenario: &Scenario, report: &ScenarioReport) {
        self.scenarios += 1;

        match &report.ladder {
            Ok(ladder) if ladder.evaluation.effective() => {
                warn!(
                    index,
                    scenario = %scenario,
                    "Successful laddering attack"
                );
                self.effective_ladders.push(Finding {
                    index,
                    scenario: scenario.clone(),
                    detail: format!("{}\n{}", ladder.ladder, ladder.evaluation),
                });
            }
            Ok(_) => {}
            Err(err) => {
                debug!(index, error = %err, "Ladder pipeline rejected scenario");
                self.ladder_rejected += 1;
            }
        }

        match &report.surge {
            Ok(surge) if surge.success => {
                warn!(
                    index,
                    scenario = %scenario,
                    "Successful surge attack"
                );
                self.successful_surges.push(Finding {
                    index,
                    scenario: scenario.clone(),
                    detail: surge.outcome.to_string(),
                });
            }
            Ok(_) => {}
            Err(err) => {
                debug!(index, error = %err, "Surge pipeline rejected scenario");
                self.surge_rejected += 1;
            }
        }

        if report.invariant_violated() {
            warn!(index, scenario = %scenario, "Model invariant violated");
            self.invariant_violations.push(Finding {
                index,
                scenario: scenario.clone(),
                detail: report.to_string(),
            });
        }
    }

    fn merge(&mut self, other: SweepSummary) {
        self.scenarios += other.scenarios;
        self.ladder_rejected += other.ladder_rejected;
        self.surge_rejected += other.surge_rejected;
        self.effective_ladders.extend(other.effective_ladders);
        self.successful_surges.extend(other.successful_surges);
        self.invariant_violations.extend(other.invariant_violations);
    }

    fn sort(&mut self) {
        self.effective_ladders.sort_by_key(|finding| finding.index);
        self.successful_surges.sort_by_key(|finding| finding.index);
        self.invariant_violations.sort_by_key(|finding| finding.index);
    }

    /// Nothing came out ahead and nothing broke.
    pub fn is_clean(&self) -> bool {
        self.effective_ladders.is_empty()
            && self.successful_surges.is_empty()
            && self.invariant_violations.is_empty()
    }
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed: {} scenarios: {} ladder rejected: {} surge rejected: {} \
             effective ladders: {} successful surges: {} invariant violations: {}",
            self.seed,
            self.scenarios,
            self.ladder_rejected,
            self.surge_rejected,
            self.effective_ladders.len(),
            self.successful_surges.len(),
            self.invariant_violations.len()
        )
    }
}

/// Sweep configuration.
#[derive(Debug, Clone)]
pub struct Sweep {
    params: ModelParams,
    generator: ScenarioGenerator,
    workers: usize,
}

impl Sweep {
    /// Create a single-worker sweep.
    pub fn new(params: ModelParams, generator: ScenarioGenerator) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            generator,
            workers: 1,
        })
    }

    /// Spread the sweep across `workers` threads.
    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(JamSimError::config("sweep needs at least one worker"));
        }
        self.workers = workers;
        Ok(self)
    }

    /// Evaluate scenarios `0..count`.
    pub fn run(&self, count: u64) -> SweepSummary {
        info!(
            seed = self.generator.seed(),
            count,
            workers = self.workers,
            "Starting sweep"
        );

        let workers = self.workers as u64;
        let mut summary = if workers == 1 {
            self.run_stride(0, 1, count)
        } else {
            std::thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|worker| scope.spawn(move || self.run_stride(worker, workers, count)))
                    .collect();

                let mut merged = SweepSummary::default();
                for handle in handles {
                    match handle.join() {
                        Ok(partial) => merged.merge(partial),
                        Err(panic) => std::panic::resume_unwind(panic),
                    }
                }
                merged
            })
        };

        summary.seed = self.generator.seed();
        summary.sort();
        info!(summary = %summary, "Sweep complete");
        summary
    }

    fn run_stride(&self, start: u64, step: u64, count: u64) -> SweepSummary {
        let mut summary = SweepSummary::default();
        let mut index = start;
        while index < count {
            let scenario = self.generator.scenario_at(index);
            let report = evaluate(&scenario, &self.params);
            summary.record(index, &scenario, &report);
            index += step;
        }
        summary
    }
}
