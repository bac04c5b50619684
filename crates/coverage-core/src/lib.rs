//! Greedy set-cover engine for district event coverage.
//!
//! Given the events of a district and, for each candidate team, the events
//! it attends, this crate finds small collections of teams whose combined
//! attendance covers every event at least once. A mandatory "home" team is
//! always part of the answer, and inclusion/exclusion constraints decide
//! which other teams may be chosen.
//!
//! # Pipeline
//!
//! ```text
//! teams + constraints --> build_universe --> EligibleUniverse
//! EligibleUniverse + events --> solve_many --> Vec<Solution> --> verify
//! ```
//!
//! # Modules
//!
//! - [`error`] -- [`ConfigurationError`], the only failure the engine raises.
//! - [`universe`] -- Eligibility filtering into an [`EligibleUniverse`].
//! - [`solver`] -- The greedy walk and alternative-solution generation.
//! - [`verify`] -- Coverage verification of produced solutions.
//!
//! Incomplete coverage is not an error: a walk that runs out of useful
//! teams returns a partial [`Solution`](coverage_types::Solution) whose
//! `uncovered` set names the residual events.
//!
//! Everything here is synchronous and stateless. Each call is a pure
//! function of its arguments, so independent analyses can run
//! concurrently without coordination.

pub mod error;
pub mod solver;
pub mod universe;
pub mod verify;

pub use error::ConfigurationError;
pub use solver::{solve, solve_many};
pub use universe::{EligibleUniverse, build_universe};
pub use verify::{Verification, verify};
