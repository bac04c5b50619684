//! District scouting coverage entry point.
//!
//! Loads a district roster from The Blue Alliance or a local directory of
//! event files, then asks the coverage engine for the fewest teams that
//! together attend every event, always including the user's own team.
//!
//! # Architecture
//!
//! ```text
//! CLI + YAML --> AnalysisPlan --> TBA / event_data --> Roster
//!     --> build_universe --> solve_many --> Report (stdout)
//! ```
//!
//! Two TBA utilities ride along as subcommands: `events` lists a season's
//! events and `filter-scouting` trims scouting exports to an event roster.
//!
//! Logs go to stderr so the report on stdout can be piped cleanly.

mod cli;
mod config;
mod error;
mod listing;
mod local;
mod report;
mod roster;
mod scouting;
mod tba;

use std::collections::BTreeSet;

use clap::Parser;
use coverage_core::{build_universe, solve_many};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    AnalysisPlan, Cli, Command, DataSource, EventsArgs, FilterScoutingArgs, require_api_key,
};
use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::listing::EventListing;
use crate::report::{Report, SourceLabel};
use crate::tba::TbaClient;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the roster cannot be
/// loaded, or the engine rejects its inputs.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    match cli.command.take() {
        Some(Command::Events(args)) => list_events(args).await?,
        Some(Command::FilterScouting(args)) => filter_scouting(args).await?,
        None => analyze(cli).await?,
    }
    Ok(())
}

/// Run the coverage analysis and print its report.
async fn analyze(cli: Cli) -> Result<(), RunnerError> {
    let config = RunnerConfig::load(cli.config.as_deref())?;
    let plan = AnalysisPlan::resolve(cli, &config)?;

    info!(
        team = %plan.constraints.mandatory_team,
        max_team = plan.constraints.max_team_number,
        max_solutions = plan.max_solutions,
        "district-coverage starting"
    );

    let (roster, source) = match &plan.source {
        DataSource::Api {
            api_key,
            year,
            district,
        } => {
            let client = TbaClient::new(&config.tba, api_key.clone());
            let roster = client.fetch_district(*year, district).await?;
            let label = SourceLabel::Api {
                year: *year,
                district: district.clone(),
            };
            (roster, label)
        }
        DataSource::Local { dir } => {
            let roster = local::load_dir(dir)?;
            let label = SourceLabel::Local {
                dir: dir.display().to_string(),
            };
            (roster, label)
        }
    };

    if let Some(save_dir) = &plan.save_dir {
        local::save_dir(save_dir, &roster)?;
    }

    if roster.events().is_empty() {
        return Err(RunnerError::Config(
            "no events found for this data source".to_owned(),
        ));
    }

    let events = roster.event_keys();
    let universe = build_universe(&roster.teams(), &plan.constraints)?;
    let solutions = solve_many(
        &universe,
        &events,
        plan.constraints.mandatory_team,
        plan.max_solutions,
    )?;

    let report = Report {
        source,
        roster: &roster,
        constraints: &plan.constraints,
        eligible: universe.len(),
        solutions: &solutions,
    };
    println!("{report}");

    Ok(())
}

/// Print a season's events and optionally save them.
async fn list_events(args: EventsArgs) -> Result<(), RunnerError> {
    let config = RunnerConfig::load(args.config.as_deref())?;
    let client = TbaClient::new(&config.tba, require_api_key(args.api_key, &config)?);

    let mut events = client.year_events(args.year).await?;
    listing::sort_by_week(&mut events);
    print!(
        "{}",
        EventListing {
            year: args.year,
            events: &events,
        }
    );

    if args.save && !events.is_empty() {
        let path = args
            .output
            .unwrap_or_else(|| listing::default_output(args.year));
        listing::save(&path, &events)?;
        println!("Saved {} events to {}", events.len(), path.display());
    }
    Ok(())
}

/// Keep only scouting entries for teams registered at the event.
async fn filter_scouting(args: FilterScoutingArgs) -> Result<(), RunnerError> {
    let config = RunnerConfig::load(args.config.as_deref())?;
    let client = TbaClient::new(&config.tba, require_api_key(args.api_key, &config)?);

    let data: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&args.input)?)?;
    let registered: BTreeSet<String> = client
        .event_teams(&args.event_key)
        .await?
        .into_iter()
        .map(|team| team.team_number.to_string())
        .collect();
    info!(
        event = args.event_key,
        teams = registered.len(),
        "fetched event roster"
    );

    let (filtered, outcome) = scouting::filter_scouting_data(data, &registered)?;
    print!("{outcome}");

    match args.output {
        Some(path) if !args.dry_run => {
            std::fs::write(&path, serde_json::to_string_pretty(&filtered)?)?;
            println!("Saved filtered scouting data to {}", path.display());
        }
        _ => println!("Dry run: no output written"),
    }
    Ok(())
}
