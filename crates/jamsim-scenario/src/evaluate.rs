//! Scenario evaluation
//!
//! Runs both pipelines over one scenario. Each pipeline keeps its own result
//! so an engine rejection on one side does not hide the verdict of the other.

use crate::scenario::Scenario;
use jamsim_core::{
    surge_attack, JamSimError, Ladder, LadderEvaluation, ModelParams, SurgeAttackOutcome,
};
use serde::Serialize;
use std::fmt;

/// Laddering pipeline result: the built route and the attack evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderReport {
    /// Route the attacker climbs.
    pub ladder: Ladder,
    /// Endorsement and outcome for the scenario's payment.
    pub evaluation: LadderEvaluation,
}

/// Surge pipeline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurgeReport {
    /// Revenue model under attack.
    pub outcome: SurgeAttackOutcome,
    /// Whether the node earned less than in peace time.
    pub success: bool,
}

/// Both pipelines' results for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Laddering attack result.
    pub ladder: Result<LadderReport, JamSimError>,
    /// Surge attack result.
    pub surge: Result<SurgeReport, JamSimError>,
}

impl ScenarioReport {
    /// Laddering attack sabotaged the target.
    pub fn ladder_effective(&self) -> bool {
        matches!(&self.ladder, Ok(report) if report.evaluation.effective())
    }

    /// Surge attack cost the node revenue.
    pub fn surge_successful(&self) -> bool {
        matches!(&self.surge, Ok(report) if report.success)
    }

    /// Either pipeline hit a broken model invariant.
    pub fn invariant_violated(&self) -> bool {
        let violated = |err: &JamSimError| !err.is_input_error();
        self.ladder.as_ref().err().is_some_and(violated)
            || self.surge.as_ref().err().is_some_and(violated)
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ladder {
            Ok(report) => writeln!(f, "{}\n{}", report.ladder, report.evaluation)?,
            Err(err) => writeln!(f, "ladder: {err}")?,
        }
        match &self.surge {
            Ok(report) => write!(f, "surge success: {}\n{}", report.success, report.outcome),
            Err(err) => write!(f, "surge: {err}"),
        }
    }
}

/// Run the laddering pipeline for `scenario`.
pub fn evaluate_ladder(
    scenario: &Scenario,
    params: &ModelParams,
) -> jamsim_core::Result<LadderReport> {
    let ladder = Ladder::build(scenario.first_node_traffic, &scenario.traffic_flows, params)?;
    let evaluation = ladder.run(scenario.attacker_payment, scenario.hold_duration, params)?;
    Ok(LadderReport { ladder, evaluation })
}

/// Run the surge pipeline for `scenario`.
pub fn evaluate_surge(
    scenario: &Scenario,
    params: &ModelParams,
) -> jamsim_core::Result<SurgeReport> {
    let outcome = surge_attack(&scenario.honest_peers, scenario.cutoff_index, params)?;
    let success = outcome.success(params)?;
    Ok(SurgeReport { outcome, success })
}

/// Run both pipelines for `scenario`.
pub fn evaluate(scenario: &Scenario, params: &ModelParams) -> ScenarioReport {
    ScenarioReport {
        ladder: evaluate_ladder(scenario, params),
        surge: evaluate_surge(scenario, params),
    }
}
