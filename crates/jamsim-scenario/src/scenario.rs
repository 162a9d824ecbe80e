//! Scenario records and acceptance filters
//!
//! A scenario carries the inputs for both attack pipelines. Raw inputs (for
//! example straight from a fuzzer) are decoded with [`Scenario::from_raw`],
//! which drops anything outside the ranges the model is meaningful for rather
//! than reporting it as an engine failure.

use jamsim_core::{JamSimError, ModelParams, TrafficFlow, MIN_LADDER_CHANNELS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest amount that can exist on the network, in msat.
pub const MAX_AMOUNT_MSAT: u64 = 21_000_000 * 100_000_000 * 1_000;

/// Longest route worth modeling; matches the network diameter.
pub const MAX_ROUTE_LENGTH: usize = 10;

/// One evaluation input for the laddering and surge pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Traffic forwarded by the first node over the reputation window.
    pub first_node_traffic: u64,
    /// Amount the attacker pays the first node.
    pub attacker_payment: u64,
    /// Hold duration of the jamming HTLC.
    pub hold_duration: u64,
    /// Per-hop share of traffic from the predecessor.
    pub traffic_flows: Vec<TrafficFlow>,
    /// Reputation-window volume of each honest peer of the surge target.
    pub honest_peers: Vec<u64>,
    /// Rank of the most valuable peer the surge attacker prices out.
    pub cutoff_index: usize,
}

impl Scenario {
    /// Decode a raw fuzz-style record.
    ///
    /// `network_description` supplies one traffic portion per hop; only the
    /// first `network_length` bytes are used. Returns `None` when the record
    /// does not describe a usable scenario.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        first_node_traffic: u64,
        attacker_payment: u64,
        hold_duration: u64,
        network_length: u8,
        network_description: &[u8],
        honest_peers: &[u64],
        cutoff_index: usize,
        filter: &AcceptanceFilter,
    ) -> Option<Self> {
        let length = usize::from(network_length);
        if network_description.len() < length {
            return None;
        }

        let traffic_flows = TrafficFlow::from_percentages(&network_description[..length]).ok()?;
        let scenario = Self {
            first_node_traffic,
            attacker_payment,
            hold_duration,
            traffic_flows,
            honest_peers: honest_peers.to_vec(),
            cutoff_index,
        };

        scenario.check(filter).ok().map(|()| scenario)
    }

    /// Check the scenario against `filter`, naming the first range it fails.
    pub fn check(&self, filter: &AcceptanceFilter) -> Result<(), String> {
        let hops = self.traffic_flows.len();
        if hops < filter.min_route_length || hops > filter.max_route_length {
            return Err(format!(
                "route length {hops} outside {}..={}",
                filter.min_route_length, filter.max_route_length
            ));
        }
        if self.hold_duration == 0 || self.hold_duration > filter.max_hold_duration {
            return Err(format!(
                "hold duration {} outside 1..={}",
                self.hold_duration, filter.max_hold_duration
            ));
        }
        if self.honest_peers.is_empty() {
            return Err("no honest peers".to_string());
        }
        if let Some(amount) = self
            .honest_peers
            .iter()
            .find(|amount| **amount == 0 || **amount > filter.max_peer_amount)
        {
            return Err(format!(
                "peer amount {amount} outside 1..={}",
                filter.max_peer_amount
            ));
        }
        Ok(())
    }

    /// Whether the scenario passes `filter`.
    pub fn accepted(&self, filter: &AcceptanceFilter) -> bool {
        self.check(filter).is_ok()
    }

    /// Traffic portions as plain percentages.
    pub fn percentages(&self) -> Vec<u8> {
        self.traffic_flows.iter().map(|flow| flow.percent()).collect()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "first node: {} payment: {} hold: {} flows: {:?} peers: {:?} cutoff: {}",
            self.first_node_traffic,
            self.attacker_payment,
            self.hold_duration,
            self.percentages(),
            self.honest_peers,
            self.cutoff_index
        )
    }
}

/// Ranges a scenario must fall in to be worth evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceFilter {
    /// Fewest hops in a route.
    pub min_route_length: usize,
    /// Most hops in a route.
    pub max_route_length: usize,
    /// Longest hold duration.
    pub max_hold_duration: u64,
    /// Largest peer amount.
    pub max_peer_amount: u64,
}

impl Default for AcceptanceFilter {
    fn default() -> Self {
        Self::for_params(&ModelParams::default())
    }
}

impl AcceptanceFilter {
    /// Filter matching the protocol limits in `params`.
    pub fn for_params(params: &ModelParams) -> Self {
        Self {
            min_route_length: MIN_LADDER_CHANNELS,
            max_route_length: MAX_ROUTE_LENGTH,
            max_hold_duration: params.max_hold_duration,
            max_peer_amount: MAX_AMOUNT_MSAT,
        }
    }

    /// Check that the ranges are non-empty and admit ladders.
    pub fn validate(&self) -> jamsim_core::Result<()> {
        if self.min_route_length < MIN_LADDER_CHANNELS
            || self.min_route_length > self.max_route_length
        {
            return Err(JamSimError::config(format!(
                "route length range {}..={} must start at {MIN_LADDER_CHANNELS} or above",
                self.min_route_length, self.max_route_length
            )));
        }
        if self.max_hold_duration == 0 || self.max_peer_amount == 0 {
            return Err(JamSimError::config(
                "hold duration and peer amount ranges must be non-empty",
            ));
        }
        Ok(())
    }
}
