//! Regression scenarios for the laddering attack
//!
//! Values were worked out by hand for the reference route
//! `A -(100%)- B -(10%)- C -(25%)- D -(50%)- E`.

use assert_matches::assert_matches;
use jamsim_core::{JamSimError, Ladder, ModelParams, TrafficFlow};

fn reference_flows() -> Vec<TrafficFlow> {
    TrafficFlow::from_percentages(&[100, 10, 25, 50]).unwrap()
}

#[test]
fn ladder_attack_setup() {
    let params = ModelParams::default();
    let ladder = Ladder::build(120_000, &reference_flows(), &params).unwrap();
    assert_eq!(ladder.len(), 4);

    let channels = ladder.channels();
    assert_eq!(channels[0].outgoing_revenue, 10_000);
    assert_eq!(channels[0].incoming_reputation, 120_000);

    assert_eq!(channels[1].outgoing_revenue, 100_000);
    assert_eq!(channels[1].incoming_reputation, 1_200_000);

    assert_eq!(channels[2].outgoing_revenue, 400_000);
    assert_eq!(channels[2].incoming_reputation, 4_800_000);

    assert_eq!(channels[3].outgoing_revenue, 800_000);
    assert_eq!(channels[3].incoming_reputation, 9_600_000);

    let (attack_amount, hold) = (30_000, 300);

    let endorsed = ladder
        .total_endorsed_on_target(attack_amount, hold, &params)
        .unwrap();
    assert_eq!(endorsed, 10);

    let outcome = ladder.attack_outcome(endorsed, hold, &params).unwrap();
    assert!(!outcome.effective(attack_amount));
}

#[test]
fn ladder_is_deterministic() {
    let params = ModelParams::default();
    let first = Ladder::build(120_000, &reference_flows(), &params).unwrap();
    let second = Ladder::build(120_000, &reference_flows(), &params).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.run(30_000, 300, &params).unwrap(),
        second.run(30_000, 300, &params).unwrap()
    );
}

#[test]
fn ladder_rejects_short_routes_and_bad_portions() {
    let params = ModelParams::default();
    assert_matches!(
        Ladder::from_percentages(120_000, &[100, 10], &params),
        Err(JamSimError::Config { .. })
    );
    assert_matches!(
        Ladder::from_percentages(120_000, &[100, 10, 0, 50], &params),
        Err(JamSimError::Config { .. })
    );
    assert_matches!(
        Ladder::from_percentages(120_000, &[100, 10, 101, 50], &params),
        Err(JamSimError::Config { .. })
    );
}

#[test]
fn ladder_follows_configured_windows() {
    let params = ModelParams {
        revenue_period_weeks: 4,
        ..ModelParams::default()
    };
    let ladder = Ladder::build(120_000, &reference_flows(), &params).unwrap();
    let revenue: Vec<u64> = ladder.iter().map(|c| c.outgoing_revenue).collect();
    assert_eq!(revenue, vec![20_000, 200_000, 800_000, 1_600_000]);
}

#[test]
fn ladder_rejects_invalid_params() {
    let params = ModelParams {
        capacity_numerator: 0,
        ..ModelParams::default()
    };
    assert_matches!(
        Ladder::build(120_000, &reference_flows(), &params),
        Err(JamSimError::Config { .. })
    );
}
