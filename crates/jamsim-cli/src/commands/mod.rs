//! Subcommand handlers
//!
//! Each handler renders its result to a string; `main` prints it.

pub mod ladder;
pub mod params;
pub mod run;
pub mod surge;
pub mod sweep;
