//! Season event listing for the `events` subcommand.
//!
//! Shows every event of a year by week, so a user can find the district
//! and event keys the other commands take.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::RunnerError;
use crate::tba::TbaEvent;

const RULE: &str = "======================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------------";

/// Default file for `--save` when no `--output` is given.
pub fn default_output(year: u16) -> PathBuf {
    PathBuf::from(format!("events_{year}.json"))
}

/// Sort by week with offseason events last, then by name.
pub fn sort_by_week(events: &mut [TbaEvent]) {
    events.sort_by(|a, b| {
        (a.week.is_none(), a.week, &a.name).cmp(&(b.week.is_none(), b.week, &b.name))
    });
}

/// Write `events` as a pretty JSON array.
pub fn save(path: &Path, events: &[TbaEvent]) -> Result<(), RunnerError> {
    std::fs::write(path, serde_json::to_string_pretty(events)?)?;
    info!(path = %path.display(), events = events.len(), "saved event listing");
    Ok(())
}

/// Console table of one season's events.
pub struct EventListing<'a> {
    /// Season shown in the header.
    pub year: u16,
    /// Events in display order.
    pub events: &'a [TbaEvent],
}

impl fmt::Display for EventListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.events.is_empty() {
            return writeln!(f, "No events found for year {}", self.year);
        }

        writeln!(f, "{RULE}")?;
        writeln!(f, "Events for {}", self.year)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:<6} {:<15} Name", "Week", "Key")?;
        writeln!(f, "{THIN_RULE}")?;
        for event in self.events {
            let week = event
                .week
                .map_or_else(|| "N/A".to_owned(), |week| week.to_string());
            writeln!(f, "{week:<6} {:<15} {}", event.key, event.name)?;
        }
        writeln!(f, "{THIN_RULE}")?;
        writeln!(f, "Total events: {}", self.events.len())
    }
}
