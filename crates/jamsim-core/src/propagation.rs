//! Endorsement propagation
//!
//! Walks a ladder from the attacker's first hop towards the target to find the
//! largest HTLC the attacker can get endorsed on the target's outgoing link.
//! The attacker's payment only buys reputation with the first hop; from there
//! on each hop vouches with the reputation it has already accrued upstream.

use crate::errors::Result;
use crate::ladder::Ladder;
use crate::params::ModelParams;
use tracing::debug;

impl Ladder {
    /// Total amount the attacker can get endorsed on the target given the
    /// amount it paid and the hold duration of the jamming HTLC.
    ///
    /// Returns `0` when any hop's candidate reputation falls short of that
    /// hop's revenue threshold, or when the surplus rounds down to no capacity.
    pub fn total_endorsed_on_target(
        &self,
        attacker_payment: u64,
        hold: u64,
        params: &ModelParams,
    ) -> Result<u64> {
        params.validate()?;
        let converter = params.converter();
        converter.check_hold(hold)?;

        let mut candidate_reputation = attacker_payment;
        let mut total_endorsed: Option<u64> = None;

        for (hop, channel) in self.channels()[..self.len() - 1].iter().enumerate() {
            if candidate_reputation < channel.outgoing_revenue {
                debug!(
                    hop,
                    reputation = candidate_reputation,
                    threshold = channel.outgoing_revenue,
                    "Reputation below threshold, nothing endorsed"
                );
                return Ok(0);
            }

            // Only reputation built above the threshold backs in-flight HTLCs.
            let surplus = candidate_reputation - channel.outgoing_revenue;
            let hop_endorsed = converter.capacity(surplus, hold)?;
            if hop_endorsed == 0 {
                debug!(hop, surplus, hold, "Surplus too small to endorse anything");
                return Ok(0);
            }

            // Endorsed capacity can only shrink along the route.
            let endorsed = total_endorsed.map_or(hop_endorsed, |total| total.min(hop_endorsed));
            total_endorsed = Some(endorsed);

            debug!(
                hop,
                surplus,
                hop_endorsed,
                endorsed,
                "Propagated endorsement"
            );

            candidate_reputation = channel.incoming_reputation;
        }

        Ok(total_endorsed.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::JamSimError;
    use crate::ladder::Ladder;
    use crate::params::ModelParams;
    use assert_matches::assert_matches;

    fn reference_ladder() -> Ladder {
        Ladder::from_percentages(120_000, &[100, 10, 25, 50], &ModelParams::default()).unwrap()
    }

    #[test]
    fn test_reference_endorsement() {
        let ladder = reference_ladder();
        assert_eq!(
            ladder
                .total_endorsed_on_target(30_000, 300, &ModelParams::default())
                .unwrap(),
            10
        );
    }

    #[test]
    fn test_payment_below_first_threshold_endorses_nothing() {
        let ladder = reference_ladder();
        assert_eq!(
            ladder
                .total_endorsed_on_target(9_999, 300, &ModelParams::default())
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_surplus_rounding_to_zero_endorses_nothing() {
        let ladder = reference_ladder();
        // 1_000 surplus * 90 / (2016 * 600) rounds to zero.
        assert_eq!(
            ladder
                .total_endorsed_on_target(11_000, 2016, &ModelParams::default())
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_upstream_reputation_below_threshold() {
        // The first hop's accrued reputation is far below the next hop's
        // threshold, so no payment size gets past it.
        let ladder = Ladder::from_percentages(1_000, &[100, 1, 1], &ModelParams::default())
            .unwrap();
        assert_eq!(
            ladder
                .total_endorsed_on_target(u64::MAX, 1, &ModelParams::default())
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_zero_hold_is_an_error() {
        let ladder = reference_ladder();
        assert_matches!(
            ladder.total_endorsed_on_target(30_000, 0, &ModelParams::default()),
            Err(JamSimError::InsufficientHoldDuration { hold: 0, .. })
        );
    }

    #[test]
    fn test_longer_hold_endorses_less() {
        let ladder = reference_ladder();
        let params = ModelParams::default();
        let short = ladder
            .total_endorsed_on_target(50_000, 10, &params)
            .unwrap();
        let long = ladder
            .total_endorsed_on_target(50_000, 100, &params)
            .unwrap();
        assert!(short > long);
    }
}
