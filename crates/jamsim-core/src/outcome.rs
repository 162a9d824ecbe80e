//! Laddering attack outcome
//!
//! An attack is only interesting when it is both cheaper than acquiring the
//! same standing with the target directly and actually pushes the target
//! below its peer's threshold.

use crate::errors::Result;
use crate::ladder::Ladder;
use crate::params::ModelParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Result of slow jamming the target with the endorsed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Reputation the target had to start with.
    pub target_reputation: u64,
    /// Threshold below which the target loses reputation with its peer.
    pub target_threshold: u64,
    /// Reputation the target lost to the slow jam.
    pub reputation_change: u64,
    /// Cost of acquiring this reputation directly with the target instead of
    /// laddering.
    pub target_cost: u64,
}

impl AttackOutcome {
    /// Laddering cost the attacker less than going to the target directly.
    pub fn ladder_cheaper(&self, attacker_payment: u64) -> bool {
        self.target_cost > attacker_payment
    }

    /// The slow jam penalty pushed the target below its threshold.
    pub fn lost_reputation(&self) -> bool {
        u128::from(self.target_reputation)
            < u128::from(self.target_threshold) + u128::from(self.reputation_change)
    }

    /// Cheap and damaging: the attack sabotaged the target.
    pub fn effective(&self, attacker_payment: u64) -> bool {
        self.ladder_cheaper(attacker_payment) && self.lost_reputation()
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target has reputation: {} vs threshold: {} reputation changed by {} \
             which would have cost {} to acquire with the target directly",
            self.target_reputation,
            self.target_threshold,
            self.reputation_change,
            self.target_cost
        )
    }
}

/// Full laddering run for a single attacker payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderEvaluation {
    /// Amount the attacker paid the first hop.
    pub attacker_payment: u64,
    /// Hold duration of the jamming HTLC.
    pub hold: u64,
    /// Amount endorsed on the target's outgoing link.
    pub total_endorsed: u64,
    /// Outcome for the target.
    pub outcome: AttackOutcome,
}

impl LadderEvaluation {
    /// Whether the attack sabotaged the target for the payment made.
    pub fn effective(&self) -> bool {
        self.outcome.effective(self.attacker_payment)
    }
}

impl fmt::Display for LadderEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payment: {} hold: {} endorsed: {} effective: {}\n{}",
            self.attacker_payment,
            self.hold,
            self.total_endorsed,
            self.effective(),
            self.outcome
        )
    }
}

impl Ladder {
    /// Outcome of slow jamming the target with `total_endorsed` for `hold`.
    pub fn attack_outcome(
        &self,
        total_endorsed: u64,
        hold: u64,
        params: &ModelParams,
    ) -> Result<AttackOutcome> {
        params.validate()?;
        let slow_jam_cost = params.converter().cost(total_endorsed, hold)?;

        let target = self.target();
        let final_threshold = self.final_hop().outgoing_revenue;

        let mut outcome = AttackOutcome {
            target_reputation: target.incoming_reputation,
            target_threshold: final_threshold,
            reputation_change: 0,
            target_cost: target.outgoing_revenue.saturating_add(slow_jam_cost),
        };

        // A target without good standing to begin with has nothing to lose.
        if target.incoming_reputation < final_threshold {
            debug!(
                reputation = target.incoming_reputation,
                threshold = final_threshold,
                "Target never had good reputation"
            );
            return Ok(outcome);
        }

        outcome.reputation_change = slow_jam_cost;
        Ok(outcome)
    }

    /// Propagate the attacker's payment and evaluate the resulting outcome.
    pub fn run(
        &self,
        attacker_payment: u64,
        hold: u64,
        params: &ModelParams,
    ) -> Result<LadderEvaluation> {
        let total_endorsed = self.total_endorsed_on_target(attacker_payment, hold, params)?;
        let outcome = self.attack_outcome(total_endorsed, hold, params)?;

        let evaluation = LadderEvaluation {
            attacker_payment,
            hold,
            total_endorsed,
            outcome,
        };
        debug!(
            attacker_payment,
            hold,
            total_endorsed,
            effective = evaluation.effective(),
            "Evaluated laddering attack"
        );
        Ok(evaluation)
    }
}
