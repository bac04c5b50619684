//! Coverage verification for produced solutions.
//!
//! A solution is complete when the union of its steps' newly covered
//! events contains every event of the universe. Verification needs only the
//! solution itself and the event list, so callers can re-check a solution
//! after a serialization round trip without rebuilding the team universe.

use std::collections::BTreeSet;

use coverage_types::{EventKey, Solution};

/// The result of verifying a solution against an event universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Every event is covered.
    Complete,
    /// Some events are covered by no selected team.
    Incomplete {
        /// The residual events, in key order.
        uncovered: BTreeSet<EventKey>,
    },
}

impl Verification {
    /// Whether coverage is complete.
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The residual events; empty when complete.
    pub fn uncovered(&self) -> BTreeSet<EventKey> {
        match self {
            Self::Complete => BTreeSet::new(),
            Self::Incomplete { uncovered } => uncovered.clone(),
        }
    }
}

/// Check `solution` against the full event universe `events`.
///
/// Only events listed in `events` count. A step that claims events outside
/// the universe neither helps nor hurts.
pub fn verify(solution: &Solution, events: &[EventKey]) -> Verification {
    let covered: BTreeSet<&EventKey> = solution
        .steps
        .iter()
        .flat_map(|step| step.newly_covered.iter())
        .collect();

    let uncovered: BTreeSet<EventKey> = events
        .iter()
        .filter(|event| !covered.contains(event))
        .cloned()
        .collect();

    if uncovered.is_empty() {
        Verification::Complete
    } else {
        Verification::Incomplete { uncovered }
    }
}
