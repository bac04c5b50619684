//! Trim exported scouting data down to one event's registered teams.
//!
//! Scouting apps export match rows as JSON arrays whose fifth column is the
//! scouted team number. Three layouts are accepted:
//!
//! - a bare array of rows, optionally led by an `["id", ...]` header row;
//! - `{"entries": [{"data": [...row...]}, ...]}`;
//! - `{"data": [...rows...]}`.
//!
//! Every other field of the document is passed through untouched.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::error::RunnerError;

/// Column holding the scouted team number.
const TEAM_COLUMN: usize = 4;

/// What a filtering pass kept and removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Rows kept, header rows included.
    pub kept: usize,
    /// Rows dropped because their team is not registered.
    pub removed: usize,
    /// Rows dropped because they are too short to carry a team.
    pub skipped: usize,
    /// Team values of the removed rows.
    pub removed_teams: BTreeSet<String>,
}

impl fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kept {} entries", self.kept)?;
        if self.removed == 0 {
            writeln!(f, "No entries needed filtering; every team is registered")?;
        } else {
            let teams: Vec<&str> = self
                .removed_teams
                .iter()
                .map(String::as_str)
                .filter(|team| !team.is_empty())
                .collect();
            writeln!(
                f,
                "Removed {} entries for teams not at the event: {}",
                self.removed,
                teams.join(", ")
            )?;
        }
        if self.skipped > 0 {
            writeln!(f, "Skipped {} entries with too few columns", self.skipped)?;
        }
        Ok(())
    }
}

/// Team value of a row cell, rendered the way the roster keys are.
fn team_value(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_header(row: &[Value]) -> bool {
    row.first().and_then(Value::as_str) == Some("id")
}

/// Decide whether `row` stays. Header rows always do.
fn keep_row(row: &[Value], teams: &BTreeSet<String>, outcome: &mut FilterOutcome) -> bool {
    if is_header(row) {
        outcome.kept = outcome.kept.saturating_add(1);
        return true;
    }
    let Some(cell) = row.get(TEAM_COLUMN) else {
        warn!(columns = row.len(), "skipping entry with insufficient data");
        outcome.skipped = outcome.skipped.saturating_add(1);
        return false;
    };

    let team = team_value(cell);
    if teams.contains(&team) {
        outcome.kept = outcome.kept.saturating_add(1);
        true
    } else {
        outcome.removed = outcome.removed.saturating_add(1);
        outcome.removed_teams.insert(team);
        false
    }
}

fn filter_rows(
    rows: Vec<Value>,
    teams: &BTreeSet<String>,
    outcome: &mut FilterOutcome,
) -> Vec<Value> {
    rows.into_iter()
        .filter(|row| {
            let cells = row.as_array().map_or(&[][..], Vec::as_slice);
            keep_row(cells, teams, outcome)
        })
        .collect()
}

/// Filter `data` to rows whose team is in `teams`.
///
/// `teams` holds team numbers as decimal strings.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if `data` is not one of the accepted
/// layouts.
pub fn filter_scouting_data(
    data: Value,
    teams: &BTreeSet<String>,
) -> Result<(Value, FilterOutcome), RunnerError> {
    let mut outcome = FilterOutcome::default();

    let filtered = match data {
        Value::Array(rows) => Value::Array(filter_rows(rows, teams, &mut outcome)),
        Value::Object(mut document) => {
            if let Some(Value::Array(entries)) = document.remove("entries") {
                let kept: Vec<Value> = entries
                    .into_iter()
                    .filter(|entry| {
                        let cells = entry
                            .get("data")
                            .and_then(Value::as_array)
                            .map_or(&[][..], Vec::as_slice);
                        keep_row(cells, teams, &mut outcome)
                    })
                    .collect();
                document.insert("entries".to_owned(), Value::Array(kept));
            } else if let Some(Value::Array(rows)) = document.remove("data") {
                let kept = filter_rows(rows, teams, &mut outcome);
                document.insert("data".to_owned(), Value::Array(kept));
            } else {
                return Err(RunnerError::Config(
                    "scouting data object needs an \"entries\" or \"data\" array".to_owned(),
                ));
            }
            Value::Object(document)
        }
        _ => {
            return Err(RunnerError::Config(
                "scouting data must be an array or an object".to_owned(),
            ));
        }
    };

    Ok((filtered, outcome))
}
