//! Seeded scenario generation
//!
//! Each scenario is drawn from its own ChaCha stream, keyed by the sweep seed
//! and the scenario index. Any scenario can therefore be regenerated from
//! `(seed, index)` alone, independent of how a sweep was split across workers.

use crate::scenario::{AcceptanceFilter, Scenario};
use jamsim_core::{JamSimError, Result, TrafficFlow};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Upper bounds for generated values not covered by the acceptance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorBounds {
    /// Largest first node traffic.
    pub max_first_node_traffic: u64,
    /// Largest attacker payment.
    pub max_attacker_payment: u64,
    /// Most honest peers on the surge target.
    pub max_peers: usize,
}

impl Default for GeneratorBounds {
    fn default() -> Self {
        Self {
            max_first_node_traffic: 10_000_000_000_000,
            max_attacker_payment: 1_000_000_000_000,
            max_peers: 20,
        }
    }
}

/// Deterministic source of accepted scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    seed: u64,
    filter: AcceptanceFilter,
    bounds: GeneratorBounds,
}

impl ScenarioGenerator {
    /// Create a generator for `seed` within `filter`.
    pub fn new(seed: u64, filter: AcceptanceFilter) -> Result<Self> {
        filter.validate()?;
        Ok(Self {
            seed,
            filter,
            bounds: GeneratorBounds::default(),
        })
    }

    /// Override the generator bounds.
    pub fn with_bounds(mut self, bounds: GeneratorBounds) -> Result<Self> {
        if bounds.max_first_node_traffic == 0 || bounds.max_peers == 0 {
            return Err(JamSimError::config(
                "generator bounds must allow traffic and at least one peer",
            ));
        }
        self.bounds = bounds;
        Ok(self)
    }

    /// Sweep seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Filter every generated scenario satisfies.
    pub fn filter(&self) -> &AcceptanceFilter {
        &self.filter
    }

    /// Scenario number `index` of this seed.
    pub fn scenario_at(&self, index: u64) -> Scenario {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(index);

        let hops = rng.gen_range(self.filter.min_route_length..=self.filter.max_route_length);
        let traffic_flows: Vec<TrafficFlow> = (0..hops)
            .filter_map(|_| TrafficFlow::new(rng.gen_range(1..=100)).ok())
            .collect();

        let first_node_traffic = rng.gen_range(1..=self.bounds.max_first_node_traffic);
        let attacker_payment = rng.gen_range(0..=self.bounds.max_attacker_payment);
        let hold_duration = rng.gen_range(1..=self.filter.max_hold_duration);

        let peer_count = rng.gen_range(1..=self.bounds.max_peers);
        let honest_peers: Vec<u64> = (0..peer_count)
            .map(|_| rng.gen_range(1..=self.filter.max_peer_amount))
            .collect();
        let cutoff_index = rng.gen_range(0..honest_peers.len());

        Scenario {
            first_node_traffic,
            attacker_payment,
            hold_duration,
            traffic_flows,
            honest_peers,
            cutoff_index,
        }
    }

    /// Scenarios `0..` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Scenario)> + '_ {
        (0..).map(move |index| (index, self.scenario_at(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_scenarios() {
        let a = ScenarioGenerator::new(7, AcceptanceFilter::default()).unwrap();
        let b = ScenarioGenerator::new(7, AcceptanceFilter::default()).unwrap();
        for index in 0..32 {
            assert_eq!(a.scenario_at(index), b.scenario_at(index));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = ScenarioGenerator::new(1, AcceptanceFilter::default()).unwrap();
        let b = ScenarioGenerator::new(2, AcceptanceFilter::default()).unwrap();
        let differing = (0..16)
            .filter(|index| a.scenario_at(*index) != b.scenario_at(*index))
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn test_generated_scenarios_pass_filter() {
        let filter = AcceptanceFilter::default();
        let generator = ScenarioGenerator::new(42, filter).unwrap();
        for (_, scenario) in generator.iter().take(256) {
            assert_eq!(scenario.check(&filter), Ok(()));
            assert!(scenario.cutoff_index < scenario.honest_peers.len());
        }
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let filter = AcceptanceFilter {
            max_hold_duration: 0,
            ..AcceptanceFilter::default()
        };
        assert!(ScenarioGenerator::new(1, filter).is_err());

        let generator = ScenarioGenerator::new(1, AcceptanceFilter::default()).unwrap();
        let bounds = GeneratorBounds {
            max_peers: 0,
            ..GeneratorBounds::default()
        };
        assert!(generator.with_bounds(bounds).is_err());
    }

    #[test]
    fn test_bounds_respected() {
        let bounds = GeneratorBounds {
            max_first_node_traffic: 1_000,
            max_attacker_payment: 10,
            max_peers: 2,
        };
        let generator = ScenarioGenerator::new(9, AcceptanceFilter::default())
            .unwrap()
            .with_bounds(bounds)
            .unwrap();
        for (_, scenario) in generator.iter().take(64) {
            assert!(scenario.first_node_traffic <= 1_000);
            assert!(scenario.attacker_payment <= 10);
            assert!(scenario.honest_peers.len() <= 2);
        }
    }

    #[test]
    fn test_iter_matches_scenario_at() {
        let generator = ScenarioGenerator::new(3, AcceptanceFilter::default()).unwrap();
        for (index, scenario) in generator.iter().take(8) {
            assert_eq!(scenario, generator.scenario_at(index));
        }
    }
}
