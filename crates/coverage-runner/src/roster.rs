//! Roster assembly from per-event team lists.
//!
//! Both data sources deliver the same shape: a list of events, and for each
//! event the teams entered in it. [`Roster`] folds those lists into one
//! [`Team`] record per team number with its attendance set filled in.

use std::collections::{BTreeMap, BTreeSet};

use coverage_types::{Event, EventKey, Team, TeamLocation, TeamNumber};
use serde::{Deserialize, Serialize};

/// Placeholder used when a team record carries no nickname.
const UNKNOWN_NAME: &str = "Unknown";

/// Whether `key` names a district championship event.
///
/// Championship keys end in `cmp`, optionally followed by a single digit
/// from 1 to 9 for multi-division championships.
pub fn is_district_championship(key: &str) -> bool {
    key.strip_suffix(|c: char| matches!(c, '1'..='9'))
        .unwrap_or(key)
        .ends_with("cmp")
}

/// One team object as served by `/event/{key}/teams/simple` and as stored
/// in local event files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Team number.
    pub team_number: u32,
    /// Team nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// School or organisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_prov: Option<String>,
    /// Website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl TeamRecord {
    /// Convert into a [`Team`] with an empty attendance set.
    pub fn into_team(self) -> Team {
        Team {
            number: TeamNumber(self.team_number),
            name: self.nickname.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            location: TeamLocation {
                school_name: self.school_name,
                city: self.city,
                state_prov: self.state_prov,
                website: self.website,
            },
            attendance: BTreeSet::new(),
        }
    }

    /// Build the stored form of `team`, dropping its attendance.
    pub fn from_team(team: &Team) -> Self {
        Self {
            team_number: team.number.get(),
            nickname: Some(team.name.clone()),
            school_name: team.location.school_name.clone(),
            city: team.location.city.clone(),
            state_prov: team.location.state_prov.clone(),
            website: team.location.website.clone(),
        }
    }
}

/// Events of one district and year with every entered team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    events: Vec<Event>,
    teams: BTreeMap<TeamNumber, Team>,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            teams: BTreeMap::new(),
        }
    }

    /// Record `event` and mark every entrant as attending it.
    ///
    /// The first record seen for a team supplies its name and location.
    pub fn add_event(&mut self, event: Event, entrants: impl IntoIterator<Item = TeamRecord>) {
        for record in entrants {
            let number = TeamNumber(record.team_number);
            self.teams
                .entry(number)
                .or_insert_with(|| record.into_team())
                .attendance
                .insert(event.key.clone());
        }
        if !self.events.iter().any(|known| known.key == event.key) {
            self.events.push(event);
        }
    }

    /// Events in the order they were added.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The event universe in insertion order.
    pub fn event_keys(&self) -> Vec<EventKey> {
        self.events.iter().map(|event| event.key.clone()).collect()
    }

    /// Every team, ascending by number.
    pub fn teams(&self) -> Vec<Team> {
        self.teams.values().cloned().collect()
    }

    /// Look up a single team.
    pub fn team(&self, number: TeamNumber) -> Option<&Team> {
        self.teams.get(&number)
    }

    /// Teams entered in `key`, ascending by number.
    pub fn entrants(&self, key: &EventKey) -> impl Iterator<Item = &Team> {
        self.teams
            .values()
            .filter(move |team| team.attendance.contains(key))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(number: u32, nickname: &str) -> TeamRecord {
        TeamRecord {
            team_number: number,
            nickname: Some(nickname.to_owned()),
            school_name: None,
            city: None,
            state_prov: None,
            website: None,
        }
    }

    #[test]
    fn championship_keys_detected() {
        assert!(is_district_championship("2025micmp"));
        assert!(is_district_championship("2025micmp1"));
        assert!(is_district_championship("2025micmp4"));
        assert!(!is_district_championship("2025miket"));
        assert!(!is_district_championship("2025micmp0"));
        assert!(!is_district_championship("2025cmptx2x"));
    }

    #[test]
    fn attendance_accumulates_across_events() {
        let mut roster = Roster::new();
        roster.add_event(
            Event::new("2025miket", "Kettering"),
            vec![record(3314, "Mechanical Mustangs"), record(33, "Killer Bees")],
        );
        roster.add_event(
            Event::new("2025mimil", "Milford"),
            vec![record(3314, "renamed"), record(67, "HOT")],
        );

        let team = roster.team(TeamNumber(3314)).unwrap();
        assert_eq!(team.name, "Mechanical Mustangs");
        assert_eq!(team.attendance.len(), 2);
        assert_eq!(roster.teams().len(), 3);
        assert_eq!(
            roster.event_keys(),
            vec![EventKey::from("2025miket"), EventKey::from("2025mimil")]
        );
    }

    #[test]
    fn entrants_lists_teams_of_one_event() {
        let mut roster = Roster::new();
        roster.add_event(
            Event::new("a", "A"),
            vec![record(2, "two"), record(1, "one")],
        );
        roster.add_event(Event::new("b", "B"), vec![record(3, "three")]);

        let numbers: Vec<u32> = roster
            .entrants(&EventKey::from("a"))
            .map(|team| team.number.get())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn missing_nickname_becomes_unknown() {
        let json = r#"{"team_number": 1089}"#;
        let record: TeamRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.into_team().name, "Unknown");
    }
}
