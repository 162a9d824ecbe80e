//! jamsim core - attack evaluation engine
//!
//! Closed-form evaluation of two attacks against reputation-based jamming
//! mitigation for payment-routing nodes:
//!
//! - **Laddering**: climb the accrued reputation of a chain of forwarding nodes
//!   to sabotage a target's standing with its peer more cheaply than building
//!   that standing directly.
//! - **Surge**: inflate a link's apparent traffic to raise its reputation
//!   threshold above honest peers, then jam them out of protected slots.
//!
//! # Pipeline
//!
//! ```text
//! Ladder::build -> Ladder::total_endorsed_on_target -> Ladder::attack_outcome
//!                        \______________ Converter ______________/
//! surge_attack -> SurgeAttackOutcome::success
//! ```
//!
//! Everything is a pure function of its inputs and [`ModelParams`]; there is
//! no shared state, so scenarios can be evaluated on as many threads as the
//! caller likes.

#![forbid(unsafe_code)]

/// Cost/capacity conversion
pub mod converter;

/// Error taxonomy
pub mod errors;

/// Ladder construction
pub mod ladder;

/// Laddering attack outcome
pub mod outcome;

/// Model parameters
pub mod params;

/// Endorsement propagation along a ladder
pub mod propagation;

/// Surge attack model
pub mod surge;

pub use converter::Converter;
pub use errors::{JamSimError, Result};
pub use ladder::{Channel, Ladder, TrafficFlow, MIN_LADDER_CHANNELS};
pub use outcome::{AttackOutcome, LadderEvaluation};
pub use params::ModelParams;
pub use surge::{surge_attack, SurgeAttackOutcome};
