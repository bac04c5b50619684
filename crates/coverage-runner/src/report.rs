//! Console report for a finished analysis.
//!
//! [`Report`] borrows everything it needs and renders through
//! [`core::fmt::Display`], so `main` just prints it and tests can inspect
//! the rendered string.

use std::collections::BTreeSet;
use std::fmt;

use coverage_core::{Verification, verify};
use coverage_types::{Constraints, EventKey, Solution, TeamNumber};

use crate::roster::Roster;

/// How many filtered-out team numbers to list before summarizing.
const LISTED_FILTERED_TEAMS: usize = 10;

const RULE: &str =
    "================================================================================";
const SOLUTION_RULE: &str = "============================================================";

/// Breakdown of how the constraints reshaped the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Teams above the number bound and not on the include list.
    pub excluded_by_number: BTreeSet<TeamNumber>,
    /// Teams within the bound that the exclusion list removed.
    pub excluded_by_list: BTreeSet<TeamNumber>,
    /// Teams above the bound admitted by the include list.
    pub included_by_override: BTreeSet<TeamNumber>,
}

impl FilterSummary {
    /// Classify `teams` against `constraints`. The mandatory team is never
    /// counted as filtered.
    pub fn new(teams: impl IntoIterator<Item = TeamNumber>, constraints: &Constraints) -> Self {
        let mut summary = Self::default();
        for team in teams {
            if team == constraints.mandatory_team {
                continue;
            }
            let above_bound = team.get() > constraints.max_team_number;
            let included = constraints.included.contains(&team);
            if above_bound && !included {
                summary.excluded_by_number.insert(team);
            }
            if above_bound && included {
                summary.included_by_override.insert(team);
            }
            if !above_bound && constraints.excluded.contains(&team) {
                summary.excluded_by_list.insert(team);
            }
        }
        summary
    }
}

/// Where the roster came from, for the report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLabel {
    /// Fetched from the API.
    Api {
        /// Competition year.
        year: u16,
        /// District abbreviation.
        district: String,
    },
    /// Read from a local directory.
    Local {
        /// Directory shown to the user.
        dir: String,
    },
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { year, district } => write!(
                f,
                "The Blue Alliance API ({year} {} District)",
                district.to_uppercase()
            ),
            Self::Local { dir } => write!(f, "Local JSON files ({dir}/)"),
        }
    }
}

/// Everything the rendered report shows.
pub struct Report<'a> {
    /// Data source label.
    pub source: SourceLabel,
    /// The full roster.
    pub roster: &'a Roster,
    /// Constraints the analysis ran under.
    pub constraints: &'a Constraints,
    /// Number of teams left after filtering.
    pub eligible: usize,
    /// Solutions in rank order.
    pub solutions: &'a [Solution],
}

impl Report<'_> {
    fn write_header(&self, f: &mut fmt::Formatter<'_>, events: usize) -> fmt::Result {
        let c = self.constraints;
        writeln!(f, "{RULE}")?;
        writeln!(f, "FRC DISTRICT SCOUTING COVERAGE ANALYSIS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Data Source: {}", self.source)?;
        writeln!(f, "Required Team: {}", c.mandatory_team)?;
        writeln!(f, "Max Team Number: {}", c.max_team_number)?;
        if !c.excluded.is_empty() {
            writeln!(f, "Excluded Teams: {}", join(&c.excluded))?;
        }
        if !c.included.is_empty() {
            writeln!(f, "Included Teams (beyond max): {}", join(&c.included))?;
        }
        writeln!(f, "Events to analyze: {events}")
    }

    fn write_filters(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = FilterSummary::new(
            self.roster.teams().iter().map(|team| team.number),
            self.constraints,
        );

        if !summary.excluded_by_number.is_empty() {
            let total = summary.excluded_by_number.len();
            writeln!(
                f,
                "Excluded {total} teams with numbers > {}",
                self.constraints.max_team_number
            )?;
            let listed = join(summary.excluded_by_number.iter().take(LISTED_FILTERED_TEAMS));
            if total > LISTED_FILTERED_TEAMS {
                writeln!(
                    f,
                    "   Teams excluded by number: {listed}... (and {} more)",
                    total.saturating_sub(LISTED_FILTERED_TEAMS)
                )?;
            } else {
                writeln!(f, "   Teams excluded by number: {listed}")?;
            }
        }
        if !summary.included_by_override.is_empty() {
            writeln!(
                f,
                "Included {} teams despite exceeding max number: {}",
                summary.included_by_override.len(),
                join(&summary.included_by_override)
            )?;
        }
        if !summary.excluded_by_list.is_empty() {
            writeln!(
                f,
                "Excluded {} teams by explicit exclusion list: {}",
                summary.excluded_by_list.len(),
                join(&summary.excluded_by_list)
            )?;
        }
        writeln!(f, "Total teams after filtering: {}", self.eligible)
    }

    fn write_solution(
        &self,
        f: &mut fmt::Formatter<'_>,
        number: usize,
        solution: &Solution,
        events: &[EventKey],
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{SOLUTION_RULE}")?;
        writeln!(
            f,
            "SOLUTION {number}: {} teams needed",
            solution.team_count()
        )?;
        writeln!(f, "{SOLUTION_RULE}")?;

        for (position, team_number) in (1_usize..).zip(solution.teams()) {
            let Some(team) = self.roster.team(team_number) else {
                writeln!(f, "\n{position}. TEAM {team_number} - Unknown")?;
                continue;
            };
            let location = &team.location;
            writeln!(f, "\n{position}. TEAM {team_number} - {}", team.name)?;
            writeln!(f, "   School: {}", or_unknown(location.school_name.as_deref()))?;
            writeln!(
                f,
                "   Location: {}, {}",
                or_unknown(location.city.as_deref()),
                or_unknown(location.state_prov.as_deref())
            )?;
            if let Some(website) = location.website.as_deref().filter(|w| !w.is_empty()) {
                writeln!(f, "   Website: {website}")?;
            }
            writeln!(
                f,
                "   Events Covered: {} ({} events)",
                join(&team.attendance),
                team.attendance.len()
            )?;
            if team_number == self.constraints.mandatory_team {
                writeln!(f, "   * YOUR TEAM - Primary scouting responsibility")?;
            }
        }

        writeln!(f)?;
        match verify(solution, events) {
            Verification::Complete => writeln!(
                f,
                "Full coverage verified: {}/{} events covered",
                solution.covered.len(),
                events.len()
            ),
            Verification::Incomplete { uncovered } => {
                writeln!(f, "Incomplete coverage: missing {}", join(&uncovered))
            }
        }
    }

    fn write_recommendations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "RECOMMENDATIONS")?;
        writeln!(f, "{RULE}")?;

        let Some(best) = self.solutions.first() else {
            return writeln!(f, "No valid solutions found!");
        };
        let min_teams = best.team_count();
        let optimal = self
            .solutions
            .iter()
            .filter(|s| s.team_count() == min_teams)
            .count();
        let mandatory = self.constraints.mandatory_team;
        let attends = self
            .roster
            .team(mandatory)
            .map(|team| join(&team.attendance))
            .unwrap_or_default();

        writeln!(f, "- Minimum teams needed: {min_teams}")?;
        writeln!(f, "- Number of optimal solutions: {optimal}")?;
        writeln!(f, "- Your team ({mandatory}) participates in: {attends}")?;
        if !best.complete {
            writeln!(
                f,
                "- No eligible combination covers every event; relax --max-team or --exclude-teams"
            )?;
        }
        if optimal > 1 {
            writeln!(f, "\nYou have {optimal} equally good options.")?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.roster.event_keys();
        self.write_header(f, events.len())?;
        self.write_filters(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "Found {} different coverage solutions:",
            self.solutions.len()
        )?;
        for (number, solution) in (1_usize..).zip(self.solutions) {
            self.write_solution(f, number, solution, &events)?;
        }
        self.write_recommendations(f)
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

const fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(value) => value,
        None => "Unknown",
    }
}
