//! Command-line interface and resolution of a run's parameters.
//!
//! [`Cli`] is the raw clap surface. Without a subcommand it runs the
//! coverage analysis, and [`AnalysisPlan::resolve`] layers its flags on top
//! of [`RunnerConfig`] and decides where the roster comes from. The
//! [`Command`] subcommands are smaller TBA utilities.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use coverage_types::{Constraints, TeamNumber};
use tracing::warn;

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Find the fewest teams whose combined event attendance covers every
/// event in an FRC district.
#[derive(Debug, Parser)]
#[command(name = "district-coverage")]
#[command(about = "Find the fewest FRC teams that together attend every district event", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Utility to run instead of the coverage analysis
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Your team number; always part of every solution
    #[arg(required = true)]
    pub team_number: Option<u32>,

    /// The Blue Alliance API key (falls back to the environment or config file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Competition year (e.g. 2025)
    #[arg(long)]
    pub year: Option<u16>,

    /// District abbreviation (e.g. fim, ne, chs)
    #[arg(long)]
    pub district: Option<String>,

    /// Directory of local event JSON files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Highest eligible team number
    #[arg(long)]
    pub max_team: Option<u32>,

    /// Maximum number of alternative solutions to report
    #[arg(long)]
    pub max_solutions: Option<usize>,

    /// Team numbers to exclude from consideration
    #[arg(long, num_args = 0..)]
    pub exclude_teams: Vec<u32>,

    /// Team numbers to include even above the max team number
    #[arg(long, num_args = 0..)]
    pub include_teams: Vec<u32>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save fetched event data to this directory
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

/// Utilities that run instead of the coverage analysis.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every event of a season with its key and week
    Events(EventsArgs),
    /// Drop scouting entries for teams not registered at an event
    FilterScouting(FilterScoutingArgs),
}

/// Arguments of `events`.
#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Competition year (e.g. 2026)
    pub year: u16,

    /// The Blue Alliance API key (falls back to the environment or config file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Save the listing as JSON
    #[arg(long)]
    pub save: bool,

    /// Output file for --save (default: events_YEAR.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments of `filter-scouting`.
#[derive(Debug, Args)]
pub struct FilterScoutingArgs {
    /// Event whose registered teams are kept (e.g. 2024chcmp)
    #[arg(long)]
    pub event_key: String,

    /// Scouting data JSON file
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the filtered data
    #[arg(long, required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Report what would be removed without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// The Blue Alliance API key (falls back to the environment or config file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// The API key from the command line, else from `config`.
pub fn require_api_key(
    flag: Option<String>,
    config: &RunnerConfig,
) -> Result<String, RunnerError> {
    flag.or_else(|| config.tba.api_key.clone())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            RunnerError::Config(
                "a TBA API key is required; pass --api-key or set TBA_API_KEY".to_owned(),
            )
        })
}

/// Where the roster is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetch from The Blue Alliance.
    Api {
        /// Authentication key.
        api_key: String,
        /// Competition year.
        year: u16,
        /// District abbreviation, lowercased.
        district: String,
    },
    /// Read a local event directory.
    Local {
        /// Directory holding one JSON file per event.
        dir: PathBuf,
    },
}

/// Fully resolved parameters for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPlan {
    /// Roster source.
    pub source: DataSource,
    /// Eligibility rules and the mandatory team.
    pub constraints: Constraints,
    /// Number of alternatives to request.
    pub max_solutions: usize,
    /// Where to save the loaded roster, if anywhere.
    pub save_dir: Option<PathBuf>,
}

impl AnalysisPlan {
    /// Combine command-line flags with `config`.
    ///
    /// API mode is selected when any of `--api-key`, `--year`, or
    /// `--district` is given; all three must then resolve.
    pub fn resolve(cli: Cli, config: &RunnerConfig) -> Result<Self, RunnerError> {
        let Some(team_number) = cli.team_number else {
            return Err(RunnerError::Config("a team number is required".to_owned()));
        };
        let mandatory = TeamNumber(team_number);
        let api_requested = cli.api_key.is_some() || cli.year.is_some() || cli.district.is_some();

        let source = if api_requested {
            let api_key = cli
                .api_key
                .or_else(|| config.tba.api_key.clone())
                .filter(|key| !key.is_empty());
            match (api_key, cli.year, cli.district) {
                (Some(api_key), Some(year), Some(district)) => DataSource::Api {
                    api_key,
                    year,
                    district: district.to_lowercase(),
                },
                (api_key, year, district) => {
                    let missing: Vec<&str> = [
                        ("--api-key", api_key.is_none()),
                        ("--year", year.is_none()),
                        ("--district", district.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(flag, absent)| absent.then_some(flag))
                    .collect();
                    return Err(RunnerError::Config(format!(
                        "API mode needs --api-key, --year and --district; missing {}",
                        missing.join(", ")
                    )));
                }
            }
        } else {
            DataSource::Local {
                dir: cli
                    .data_dir
                    .unwrap_or_else(|| PathBuf::from(&config.analysis.data_dir)),
            }
        };

        let mut excluded: BTreeSet<TeamNumber> =
            cli.exclude_teams.into_iter().map(TeamNumber).collect();
        if excluded.remove(&mandatory) {
            warn!(team = %mandatory, "mandatory team is in the exclusion list, ignoring exclusion");
        }

        let constraints = Constraints {
            mandatory_team: mandatory,
            max_team_number: cli.max_team.unwrap_or(config.analysis.max_team_number),
            excluded,
            included: cli.include_teams.into_iter().map(TeamNumber).collect(),
        };

        Ok(Self {
            source,
            constraints,
            max_solutions: cli.max_solutions.unwrap_or(config.analysis.max_solutions),
            save_dir: cli.save_dir,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("district-coverage").chain(args.iter().copied()))
            .unwrap()
    }

    fn config() -> RunnerConfig {
        RunnerConfig::default()
    }

    #[test]
    fn local_mode_uses_config_defaults() {
        let plan = AnalysisPlan::resolve(parse(&["3314"]), &config()).unwrap();

        assert_eq!(
            plan.source,
            DataSource::Local {
                dir: PathBuf::from("event_data")
            }
        );
        assert_eq!(plan.constraints.mandatory_team, TeamNumber(3314));
        assert_eq!(plan.constraints.max_team_number, 12_000);
        assert_eq!(plan.max_solutions, 5);
        assert_eq!(plan.save_dir, None);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "3314",
            "--data-dir",
            "fixtures",
            "--max-team",
            "6000",
            "--max-solutions",
            "2",
            "--exclude-teams",
            "33",
            "67",
            "--include-teams",
            "9999",
        ]);
        let plan = AnalysisPlan::resolve(cli, &config()).unwrap();

        assert_eq!(
            plan.source,
            DataSource::Local {
                dir: PathBuf::from("fixtures")
            }
        );
        assert_eq!(plan.constraints.max_team_number, 6000);
        assert_eq!(plan.max_solutions, 2);
        assert_eq!(
            plan.constraints.excluded,
            BTreeSet::from([TeamNumber(33), TeamNumber(67)])
        );
        assert_eq!(plan.constraints.included, BTreeSet::from([TeamNumber(9999)]));
    }

    #[test]
    fn api_mode_with_all_flags() {
        let cli = parse(&["3314", "--api-key", "k", "--year", "2025", "--district", "FIM"]);
        let plan = AnalysisPlan::resolve(cli, &config()).unwrap();

        assert_eq!(
            plan.source,
            DataSource::Api {
                api_key: "k".to_owned(),
                year: 2025,
                district: "fim".to_owned(),
            }
        );
    }

    #[test]
    fn api_key_falls_back_to_config() {
        let mut config = config();
        config.tba.api_key = Some("from-config".to_owned());
        let cli = parse(&["3314", "--year", "2025", "--district", "ne"]);

        let plan = AnalysisPlan::resolve(cli, &config).unwrap();

        assert!(matches!(
            plan.source,
            DataSource::Api { ref api_key, .. } if api_key == "from-config"
        ));
    }

    #[test]
    fn partial_api_flags_are_rejected() {
        let cli = parse(&["3314", "--api-key", "k", "--year", "2025"]);
        let err = AnalysisPlan::resolve(cli, &config()).unwrap_err();

        assert!(matches!(err, RunnerError::Config(ref msg) if msg.contains("--district")));
    }

    #[test]
    fn mandatory_team_exclusion_is_ignored() {
        let cli = parse(&["3314", "--exclude-teams", "3314", "33"]);
        let plan = AnalysisPlan::resolve(cli, &config()).unwrap();

        assert_eq!(plan.constraints.excluded, BTreeSet::from([TeamNumber(33)]));
    }

    #[test]
    fn bare_list_flags_are_accepted() {
        let cli = parse(&["3314", "--exclude-teams", "--include-teams"]);
        let plan = AnalysisPlan::resolve(cli, &config()).unwrap();

        assert!(plan.constraints.excluded.is_empty());
        assert!(plan.constraints.included.is_empty());
    }

    #[test]
    fn team_number_required_without_subcommand() {
        let result = Cli::try_parse_from(["district-coverage", "--max-team", "6000"]);
        assert!(result.is_err());
    }

    #[test]
    fn events_subcommand_parses() {
        let cli = parse(&["events", "2026", "--save", "--output", "season.json"]);

        assert_eq!(cli.team_number, None);
        assert!(matches!(
            cli.command,
            Some(Command::Events(ref args))
                if args.year == 2026
                    && args.save
                    && args.output == Some(PathBuf::from("season.json"))
        ));
    }

    #[test]
    fn filter_scouting_needs_output_unless_dry_run() {
        let base = ["filter-scouting", "--event-key", "2024chcmp", "--input", "in.json"];
        let missing = Cli::try_parse_from(std::iter::once("district-coverage").chain(base));
        assert!(missing.is_err());

        let cli = parse(&[
            "filter-scouting",
            "--event-key",
            "2024chcmp",
            "--input",
            "in.json",
            "--dry-run",
        ]);
        assert!(matches!(
            cli.command,
            Some(Command::FilterScouting(ref args))
                if args.dry_run && args.output.is_none() && args.event_key == "2024chcmp"
        ));
    }

    #[test]
    fn api_key_required_for_utilities() {
        let mut config = config();
        assert!(matches!(
            require_api_key(None, &config),
            Err(RunnerError::Config(_))
        ));
        assert_eq!(require_api_key(Some("k".to_owned()), &config).unwrap(), "k");

        config.tba.api_key = Some("from-config".to_owned());
        assert_eq!(require_api_key(None, &config).unwrap(), "from-config");
    }
}
