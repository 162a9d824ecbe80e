//! jamsim scenarios
//!
//! Feeds validated inputs into the attack engine and collects its verdicts:
//!
//! - [`Scenario::from_raw`] decodes fuzz-style raw records
//! - [`AcceptanceFilter`] keeps scenarios inside the ranges the model is
//!   meaningful for
//! - [`ScenarioGenerator`] draws reproducible scenarios from a seed
//! - [`Sweep`] evaluates many scenarios and reports every effective attack
//! - [`ScenarioFile`] loads hand-written scenarios from TOML

#![forbid(unsafe_code)]

pub mod error;
pub mod evaluate;
pub mod generator;
pub mod loader;
pub mod scenario;
pub mod sweep;

pub use error::{Result, ScenarioError};
pub use evaluate::{
    evaluate, evaluate_ladder, evaluate_surge, LadderReport, ScenarioReport, SurgeReport,
};
pub use generator::{GeneratorBounds, ScenarioGenerator};
pub use loader::{NamedScenario, ScenarioFile};
pub use scenario::{AcceptanceFilter, Scenario, MAX_AMOUNT_MSAT, MAX_ROUTE_LENGTH};
pub use sweep::{Finding, Sweep, SweepSummary};
