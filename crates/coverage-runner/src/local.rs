//! Local event data in the `event_data/` directory format.
//!
//! Each `*.json` file is one event. The file stem is the event key (and
//! display name) and the content is an array of team objects in the same
//! shape the API serves. Entries that are not objects or lack a
//! `team_number` are skipped, and so are district championship files.
//! Files are read in sorted name order so the event universe order is
//! stable between runs.

use std::path::{Path, PathBuf};

use coverage_types::Event;
use tracing::{info, warn};

use crate::error::RunnerError;
use crate::roster::{Roster, TeamRecord, is_district_championship};

/// Load every event file in `dir` into a roster.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if `dir` does not exist, and
/// [`RunnerError::Io`] or [`RunnerError::Json`] if a file cannot be read or
/// is not JSON.
pub fn load_dir(dir: &Path) -> Result<Roster, RunnerError> {
    if !dir.is_dir() {
        return Err(RunnerError::Config(format!(
            "event data directory {} not found",
            dir.display()
        )));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    files.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
    files.sort();

    let mut roster = Roster::new();
    for path in files {
        let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!(path = %path.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        if is_district_championship(key) {
            info!(key, "skipping championship event");
            continue;
        }
        let contents = std::fs::read_to_string(&path)?;
        let teams = parse_event_file(&contents)?;
        info!(event = key, teams = teams.len(), "loaded event file");
        roster.add_event(Event::new(key, key), teams);
    }

    Ok(roster)
}

/// Decode one event file, keeping only well-formed team objects.
fn parse_event_file(contents: &str) -> Result<Vec<TeamRecord>, RunnerError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let Some(entries) = value.as_array() else {
        warn!("event file is not a JSON array, treating as empty");
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter(|entry| entry.get("team_number").is_some())
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect())
}

/// Write `roster` to `dir` in the format [`load_dir`] reads.
///
/// Creates `dir` if needed and overwrites same-named event files.
pub fn save_dir(dir: &Path, roster: &Roster) -> Result<(), RunnerError> {
    std::fs::create_dir_all(dir)?;
    for event in roster.events() {
        let records: Vec<TeamRecord> = roster
            .entrants(&event.key)
            .map(TeamRecord::from_team)
            .collect();
        let path = dir.join(format!("{}.json", event.key));
        std::fs::write(&path, serde_json::to_string_pretty(&records)?)?;
    }
    info!(
        dir = %dir.display(),
        events = roster.events().len(),
        "saved event data"
    );
    Ok(())
}
