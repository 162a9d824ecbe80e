//! Ladder construction
//!
//! A ladder models a route `A - B - C - ... - D` where each hop's traffic is
//! dominated by a larger node further along. The attacker connects to `A` and
//! climbs the accrued reputation of each hop to reach the target, which is
//! always the penultimate channel: in `A - B - C - D` the attack goes after
//! `C`'s reputation with `D`.

use crate::errors::{JamSimError, Result};
use crate::params::ModelParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Fewest channels that still form a ladder.
pub const MIN_LADDER_CHANNELS: usize = 3;

/// Share of a hop's outgoing traffic that arrives from its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrafficFlow(u8);

impl TrafficFlow {
    /// Create a traffic flow from a percentage in `1..=100`.
    pub fn new(percent: u8) -> Result<Self> {
        if percent == 0 || percent > 100 {
            return Err(JamSimError::config(format!(
                "traffic portion must be in 1..=100: {percent}"
            )));
        }
        Ok(Self(percent))
    }

    /// Percentage value.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Convert a list of percentages, failing on the first invalid entry.
    pub fn from_percentages(percentages: &[u8]) -> Result<Vec<Self>> {
        percentages.iter().copied().map(Self::new).collect()
    }
}

impl TryFrom<u8> for TrafficFlow {
    type Error = JamSimError;

    fn try_from(percent: u8) -> Result<Self> {
        Self::new(percent)
    }
}

impl From<TrafficFlow> for u8 {
    fn from(flow: TrafficFlow) -> Self {
        flow.0
    }
}

/// One hop: the reputation it has accrued with its upstream peer and the
/// revenue threshold it imposes on its downstream peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Reputation accrued over the reputation window.
    pub incoming_reputation: u64,
    /// Revenue threshold over the revenue window.
    pub outgoing_revenue: u64,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reputation={} revenue={}",
            self.incoming_reputation, self.outgoing_revenue
        )
    }
}

/// Ordered chain of at least three channels with non-decreasing revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ladder {
    channels: Vec<Channel>,
}

impl Ladder {
    /// Build a ladder from the first node's traffic and per-hop traffic flows.
    ///
    /// `first_node_traffic` is the volume forwarded by the node the attacker
    /// connects to, over the reputation window. Each flow inflates the running
    /// total to the full volume of the next outgoing link, of which the
    /// previous hop only contributed `flow` percent.
    pub fn build(
        first_node_traffic: u64,
        traffic_flows: &[TrafficFlow],
        params: &ModelParams,
    ) -> Result<Self> {
        params.validate()?;

        if traffic_flows.len() < MIN_LADDER_CHANNELS {
            return Err(JamSimError::config(format!(
                "must have at least three channels: {}",
                traffic_flows.len()
            )));
        }
        if first_node_traffic == 0 {
            return Err(JamSimError::config("first node traffic must be non-zero"));
        }

        let mut incoming_traffic = first_node_traffic;
        let mut channels: Vec<Channel> = Vec::with_capacity(traffic_flows.len());

        for (hop, flow) in traffic_flows.iter().enumerate() {
            incoming_traffic = incoming_traffic
                .checked_mul(100)
                .map(|total| total / u64::from(flow.percent()))
                .ok_or_else(|| {
                    JamSimError::config(format!(
                        "traffic overflows at hop {hop}: {incoming_traffic} at {}%",
                        flow.percent()
                    ))
                })?;

            let channel = Channel {
                incoming_reputation: incoming_traffic,
                outgoing_revenue: params.revenue_from_reputation(incoming_traffic),
            };

            // Connecting to a larger node to attack a smaller one is never a
            // saving, so such routes are not ladders.
            if let Some(previous) = channels.last() {
                if channel.outgoing_revenue < previous.outgoing_revenue {
                    return Err(JamSimError::config(format!(
                        "revenue decreases at hop {hop}: {} < {}",
                        channel.outgoing_revenue, previous.outgoing_revenue
                    )));
                }
            }

            debug!(
                hop,
                portion = flow.percent(),
                reputation = channel.incoming_reputation,
                revenue = channel.outgoing_revenue,
                "Built ladder channel"
            );
            channels.push(channel);
        }

        Ok(Self { channels })
    }

    /// Build from raw percentages.
    pub fn from_percentages(
        first_node_traffic: u64,
        percentages: &[u8],
        params: &ModelParams,
    ) -> Result<Self> {
        let flows = TrafficFlow::from_percentages(percentages)?;
        Self::build(first_node_traffic, &flows, params)
    }

    /// Channels in route order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Iterate channels in route order.
    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false; a ladder has at least three channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channel whose reputation is under attack.
    pub fn target(&self) -> &Channel {
        &self.channels[self.channels.len() - 2]
    }

    /// Last channel, whose revenue is the target's threshold.
    pub fn final_hop(&self) -> &Channel {
        &self.channels[self.channels.len() - 1]
    }
}

impl<'a> IntoIterator for &'a Ladder {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channels: {}", self.channels.len())?;
        for channel in &self.channels {
            write!(f, "\n  - {channel}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params() -> ModelParams {
        ModelParams::default()
    }

    #[test]
    fn test_traffic_flow_bounds() {
        assert!(TrafficFlow::new(1).is_ok());
        assert!(TrafficFlow::new(100).is_ok());
        assert_matches!(TrafficFlow::new(0), Err(JamSimError::Config { .. }));
        assert_matches!(TrafficFlow::new(101), Err(JamSimError::Config { .. }));
    }

    #[test]
    fn test_reference_ladder() {
        let ladder = Ladder::from_percentages(120_000, &[100, 10, 25, 50], &params()).unwrap();
        assert_eq!(ladder.len(), 4);

        let revenue: Vec<u64> = ladder.iter().map(|c| c.outgoing_revenue).collect();
        let reputation: Vec<u64> = ladder.iter().map(|c| c.incoming_reputation).collect();
        assert_eq!(revenue, vec![10_000, 100_000, 400_000, 800_000]);
        assert_eq!(reputation, vec![120_000, 1_200_000, 4_800_000, 9_600_000]);

        assert_eq!(ladder.target().incoming_reputation, 4_800_000);
        assert_eq!(ladder.final_hop().outgoing_revenue, 800_000);
    }

    #[test]
    fn test_too_few_channels() {
        assert_matches!(
            Ladder::from_percentages(120_000, &[100, 50], &params()),
            Err(JamSimError::Config { .. })
        );
    }

    #[test]
    fn test_zero_portion_rejected_before_division() {
        assert_matches!(
            Ladder::from_percentages(120_000, &[100, 0, 50], &params()),
            Err(JamSimError::Config { .. })
        );
    }

    #[test]
    fn test_zero_first_node_traffic_rejected() {
        assert_matches!(
            Ladder::from_percentages(0, &[100, 50, 50], &params()),
            Err(JamSimError::Config { .. })
        );
    }

    #[test]
    fn test_traffic_overflow_rejected() {
        assert_matches!(
            Ladder::from_percentages(u64::MAX / 10, &[100, 50, 50], &params()),
            Err(JamSimError::Config { .. })
        );
    }

    #[test]
    fn test_display() {
        let ladder = Ladder::from_percentages(120_000, &[100, 100, 100], &params()).unwrap();
        assert_eq!(
            ladder.to_string(),
            "channels: 3\n  - reputation=120000 revenue=10000\n  \
             - reputation=120000 revenue=10000\n  - reputation=120000 revenue=10000"
        );
    }
}
