//! Surge attack model
//!
//! The attacker inflates the value of one of the target's outgoing links so
//! that its revenue threshold rises above the reputation of the target's
//! honest peers, then general jams for a full revenue window. Peers below the
//! cutoff lose access to protected slots and stop earning the node fees;
//! peers above it keep their standing.

use crate::errors::{JamSimError, Result};
use crate::params::ModelParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Revenue of the targeted node in peace time and under a surge attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurgeAttackOutcome {
    /// Reputation of the most valuable peer the attacker cuts off.
    pub cutoff_reputation: u64,
    /// Revenue over one revenue window without the attack.
    pub peace_revenue: u64,
    /// Revenue from peers that keep good standing during the attack.
    pub attack_revenue: u64,
}

impl SurgeAttackOutcome {
    /// What the attacker pays to lift the threshold to the cutoff peer.
    pub fn attacker_pays(&self) -> u64 {
        self.cutoff_reputation.saturating_sub(self.peace_revenue)
    }

    /// Percentage of peace time revenue the node lost, `0` if it lost none.
    pub fn revenue_loss_percent(&self) -> u64 {
        if self.peace_revenue == 0 {
            return 0;
        }
        let earned = u128::from(self.attacker_pays()) + u128::from(self.attack_revenue);
        let lost = u128::from(self.peace_revenue).saturating_sub(earned);
        u64::try_from(lost * 100 / u128::from(self.peace_revenue)).unwrap_or(100)
    }

    /// Whether the node earns less under attack than in peace time.
    ///
    /// Peers whose reputation never cleared the peace time threshold by at
    /// least the cost of a minimally interesting HTLC had no standing to
    /// strip, so the attack does not count.
    pub fn success(&self, params: &ModelParams) -> Result<bool> {
        params.validate()?;
        let floor = params
            .converter()
            .cost(params.minimum_interesting_htlc, params.reference_hold_duration)?;

        if u128::from(self.cutoff_reputation) < u128::from(self.peace_revenue) + u128::from(floor)
        {
            return Ok(false);
        }

        let attacker_pays = self.cutoff_reputation - self.peace_revenue;

        // Cutting peers off can only remove revenue.
        if self.attack_revenue > self.peace_revenue {
            return Err(JamSimError::invariant(format!(
                "attack revenue: {} should be <= peace: {}",
                self.attack_revenue, self.peace_revenue
            )));
        }

        Ok(u128::from(attacker_pays) + u128::from(self.attack_revenue)
            < u128::from(self.peace_revenue))
    }
}

impl fmt::Display for SurgeAttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paid = self.attacker_pays();
        write!(
            f,
            "Node lost: {} % of revenue - attacker paid: {} to meet threshold: {}, \
             node still earned: {} ({} honest + {} attacker)",
            self.revenue_loss_percent(),
            paid,
            self.peace_revenue,
            self.attack_revenue.saturating_add(paid),
            self.attack_revenue,
            paid
        )
    }
}

/// Model a surge attack that cuts off every honest peer up to and including
/// rank `cutoff_index` (ascending by value, so `0` is the least valuable).
///
/// Peer amounts are reputation-window volumes. The caller's slice is left in
/// its original order.
pub fn surge_attack(
    honest_peers: &[u64],
    cutoff_index: usize,
    params: &ModelParams,
) -> Result<SurgeAttackOutcome> {
    params.validate()?;

    if cutoff_index >= honest_peers.len() {
        return Err(JamSimError::config(format!(
            "cutoff: {cutoff_index} >= peer count: {}",
            honest_peers.len()
        )));
    }
    if let Some(rank) = honest_peers.iter().position(|amount| *amount == 0) {
        return Err(JamSimError::config(format!(
            "peer {rank} has no revenue"
        )));
    }

    let mut peers = honest_peers.to_vec();
    peers.sort_unstable();

    let mut peace_revenue: u64 = 0;
    let mut attack_revenue: u64 = 0;
    let mut cutoff_reputation: u64 = 0;

    for (rank, reputation) in peers.iter().copied().enumerate() {
        let contribution = params.revenue_from_reputation(reputation);
        peace_revenue = peace_revenue
            .checked_add(contribution)
            .ok_or_else(|| JamSimError::config("peace revenue overflows"))?;

        // Everything up to the cutoff must be priced out; everything above
        // keeps earning fees while the attack runs.
        if rank <= cutoff_index {
            cutoff_reputation = reputation;
        } else {
            attack_revenue = attack_revenue
                .checked_add(contribution)
                .ok_or_else(|| JamSimError::config("attack revenue overflows"))?;
        }
    }

    debug!(
        peers = peers.len(),
        cutoff_index,
        cutoff_reputation,
        peace_revenue,
        attack_revenue,
        "Modeled surge attack"
    );

    Ok(SurgeAttackOutcome {
        cutoff_reputation,
        peace_revenue,
        attack_revenue,
    })
}
