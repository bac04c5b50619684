//! Eligibility filtering.
//!
//! [`build_universe`] turns the full team roster into the solver's working
//! representation: a map from team number to attendance set containing
//! exactly the eligible teams. A team is eligible when it is the mandatory
//! team, or when it is not excluded and its number is within the bound or
//! explicitly included. Teams with no attendance contribute nothing and are
//! dropped, except the mandatory team which is always kept.

use std::collections::{BTreeMap, BTreeSet};

use coverage_types::{Constraints, EventKey, Team, TeamNumber};
use tracing::debug;

use crate::error::ConfigurationError;

/// The eligible teams and the events each one attends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleUniverse {
    teams: BTreeMap<TeamNumber, BTreeSet<EventKey>>,
}

impl EligibleUniverse {
    /// Create an empty universe.
    pub const fn new() -> Self {
        Self {
            teams: BTreeMap::new(),
        }
    }

    /// Add `team`, merging with any attendance already recorded for it.
    pub fn insert(&mut self, team: TeamNumber, attendance: impl IntoIterator<Item = EventKey>) {
        self.teams.entry(team).or_default().extend(attendance);
    }

    /// Attendance set of `team`, if it is eligible.
    pub fn get(&self, team: TeamNumber) -> Option<&BTreeSet<EventKey>> {
        self.teams.get(&team)
    }

    /// Whether `team` is eligible.
    pub fn contains(&self, team: TeamNumber) -> bool {
        self.teams.contains_key(&team)
    }

    /// Number of eligible teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no team is eligible.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Eligible teams with their attendance, in ascending team order.
    pub fn iter(&self) -> impl Iterator<Item = (TeamNumber, &BTreeSet<EventKey>)> {
        self.teams.iter().map(|(team, events)| (*team, events))
    }
}

impl FromIterator<(TeamNumber, BTreeSet<EventKey>)> for EligibleUniverse {
    fn from_iter<I: IntoIterator<Item = (TeamNumber, BTreeSet<EventKey>)>>(iter: I) -> Self {
        let mut universe = Self::new();
        for (team, attendance) in iter {
            universe.insert(team, attendance);
        }
        universe
    }
}

/// Filter `teams` down to the eligible universe under `constraints`.
///
/// The mandatory team is kept even when it fails the number bound, sits in
/// the exclusion list, or attends nothing.
///
/// # Errors
///
/// Returns [`ConfigurationError::MandatoryTeamMissing`] if no record for the
/// mandatory team exists in `teams`.
pub fn build_universe(
    teams: &[Team],
    constraints: &Constraints,
) -> Result<EligibleUniverse, ConfigurationError> {
    let mandatory = constraints.mandatory_team;
    if !teams.iter().any(|team| team.number == mandatory) {
        return Err(ConfigurationError::MandatoryTeamMissing(mandatory));
    }

    let mut universe = EligibleUniverse::new();
    for team in teams {
        let is_mandatory = team.number == mandatory;
        if !constraints.admits(team.number) {
            continue;
        }
        if team.attendance.is_empty() && !is_mandatory {
            continue;
        }
        universe.insert(team.number, team.attendance.iter().cloned());
    }

    debug!(
        roster = teams.len(),
        eligible = universe.len(),
        mandatory = %mandatory,
        max_team_number = constraints.max_team_number,
        "eligible universe built"
    );

    Ok(universe)
}
