//! Shared type definitions for district event coverage analysis.
//!
//! This crate is the single source of truth for the records that flow
//! between the roster collaborators, the coverage solver, and the report
//! layer. Everything here is plain serializable data with no behaviour
//! beyond small accessors.
//!
//! # Modules
//!
//! - [`ids`] -- Strongly-typed team numbers and event keys
//! - [`structs`] -- Events, teams, constraints, and solutions

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{EventKey, TeamNumber};
pub use structs::{
    Constraints, DEFAULT_MAX_TEAM_NUMBER, Event, Solution, SolutionStep, Team, TeamLocation,
};
