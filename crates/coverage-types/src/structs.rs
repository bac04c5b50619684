//! Core records for coverage analysis.
//!
//! Events and teams are read-only snapshots assembled once per run by the
//! roster collaborators. Constraints are supplied once at invocation.
//! Solutions are produced fresh by the solver and never persisted by it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{EventKey, TeamNumber};

/// Default inclusive upper bound on eligible team numbers.
pub const DEFAULT_MAX_TEAM_NUMBER: u32 = 12_000;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single competition event in the analyzed district and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique key (e.g. `2025miket`).
    pub key: EventKey,
    /// Human-readable event name.
    pub name: String,
}

impl Event {
    /// Create an event record.
    pub fn new(key: impl Into<EventKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// Home location metadata for a team. Advisory only; never consulted by
/// the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLocation {
    /// School or organisation name.
    #[serde(default)]
    pub school_name: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State or province.
    #[serde(default)]
    pub state_prov: Option<String>,
    /// Team website.
    #[serde(default)]
    pub website: Option<String>,
}

/// A registered team together with the events it attends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The team's number.
    pub number: TeamNumber,
    /// Team nickname.
    pub name: String,
    /// Advisory home location metadata.
    #[serde(default)]
    pub location: TeamLocation,
    /// Event keys this team attends within the analyzed district/year.
    #[serde(default)]
    pub attendance: BTreeSet<EventKey>,
}

impl Team {
    /// Create a team with no location metadata and an empty attendance set.
    pub fn new(number: impl Into<TeamNumber>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            location: TeamLocation::default(),
            attendance: BTreeSet::new(),
        }
    }

    /// Builder-style helper that replaces the attendance set.
    #[must_use]
    pub fn attending<I, K>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<EventKey>,
    {
        self.attendance = events.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Eligibility constraints supplied at invocation.
///
/// The mandatory team is never subject to the exclusion list or the
/// number bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// The team that must appear in every solution.
    pub mandatory_team: TeamNumber,
    /// Inclusive upper bound on eligible team numbers.
    #[serde(default = "default_max_team_number")]
    pub max_team_number: u32,
    /// Teams that are never eligible.
    #[serde(default)]
    pub excluded: BTreeSet<TeamNumber>,
    /// Teams that are eligible regardless of `max_team_number`.
    #[serde(default)]
    pub included: BTreeSet<TeamNumber>,
}

impl Constraints {
    /// Constraints for `mandatory_team` with the default bound and empty
    /// include/exclude lists.
    pub const fn for_team(mandatory_team: TeamNumber) -> Self {
        Self {
            mandatory_team,
            max_team_number: DEFAULT_MAX_TEAM_NUMBER,
            excluded: BTreeSet::new(),
            included: BTreeSet::new(),
        }
    }

    /// Whether `team` passes the eligibility rule.
    pub fn admits(&self, team: TeamNumber) -> bool {
        team == self.mandatory_team
            || (!self.excluded.contains(&team)
                && (team.get() <= self.max_team_number || self.included.contains(&team)))
    }
}

const fn default_max_team_number() -> u32 {
    DEFAULT_MAX_TEAM_NUMBER
}

// ---------------------------------------------------------------------------
// Solution
// ---------------------------------------------------------------------------

/// One selection in a greedy walk: the team and the events it newly
/// covered at the moment it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    /// The selected team.
    pub team: TeamNumber,
    /// Events that were uncovered before this selection and covered after.
    pub newly_covered: BTreeSet<EventKey>,
}

/// An ordered covering selection, complete or partial.
///
/// The first step is always the mandatory team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Selections in the order they were made.
    pub steps: Vec<SolutionStep>,
    /// Union of every step's newly covered events.
    pub covered: BTreeSet<EventKey>,
    /// Events of the universe no selected team covers. Empty when complete.
    pub uncovered: BTreeSet<EventKey>,
    /// Whether every event in the universe is covered.
    pub complete: bool,
}

impl Solution {
    /// Number of teams in the solution, mandatory team included.
    pub fn team_count(&self) -> usize {
        self.steps.len()
    }

    /// Team numbers in selection order.
    pub fn teams(&self) -> impl Iterator<Item = TeamNumber> + '_ {
        self.steps.iter().map(|step| step.team)
    }

    /// Team numbers as a set, used to tell solutions apart.
    pub fn team_set(&self) -> BTreeSet<TeamNumber> {
        self.teams().collect()
    }

    /// Whether `team` is part of this solution.
    pub fn contains(&self, team: TeamNumber) -> bool {
        self.steps.iter().any(|step| step.team == team)
    }

    /// The first selection made after the mandatory team, if any.
    pub fn first_pick(&self) -> Option<&SolutionStep> {
        self.steps.get(1)
    }
}
