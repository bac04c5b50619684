//! Greedy set-cover search and alternative-solution generation.
//!
//! # Greedy walk
//!
//! A walk starts with the mandatory team and its attendance as the covered
//! set. It then repeatedly picks, among the eligible teams not yet
//! selected, the one with the largest marginal gain (number of still
//! uncovered events it attends). It stops when everything is covered
//! (complete) or when no remaining team covers anything new (partial).
//!
//! Ties on marginal gain are broken by the positions of each candidate's
//! newly covered events in event-universe order: the candidate whose
//! sorted position list is lexicographically smallest wins. A remaining
//! tie goes to the lower team number. No randomness is involved, so equal
//! inputs always produce equal walks.
//!
//! # Alternatives
//!
//! [`solve_many`] runs the unconstrained walk first. The teams that could
//! be chosen at its first decision point (right after the mandatory team)
//! are ranked with the same rule the walk uses, so the baseline's first
//! pick leads the ranking. Each further attempt takes the next team in
//! that ranking as its first pick and reruns the walk with every earlier
//! first pick banned. If the bans cost coverage because a banned team was
//! the only one attending some event, the attempt is rerun from the same
//! first pick with no bans. The mandatory team is never banned. Attempts
//! stop once `count` distinct solutions exist or the ranking runs out.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use coverage_types::{EventKey, Solution, SolutionStep, TeamNumber};
use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::universe::EligibleUniverse;
use crate::verify::{Verification, verify};

// ---------------------------------------------------------------------------
// Event ordering
// ---------------------------------------------------------------------------

/// Position of every event key in the universe, first occurrence wins.
struct EventOrder<'a> {
    positions: BTreeMap<&'a EventKey, usize>,
}

impl<'a> EventOrder<'a> {
    fn new(events: &'a [EventKey]) -> Self {
        let mut positions = BTreeMap::new();
        for (index, event) in events.iter().enumerate() {
            positions.entry(event).or_insert(index);
        }
        Self { positions }
    }

    fn all(&self) -> BTreeSet<EventKey> {
        self.positions.keys().map(|event| (*event).clone()).collect()
    }

    fn position(&self, event: &EventKey) -> Option<usize> {
        self.positions.get(event).copied()
    }
}

// ---------------------------------------------------------------------------
// Candidate ranking
// ---------------------------------------------------------------------------

/// A team that would cover at least one uncovered event if chosen now.
struct Candidate {
    team: TeamNumber,
    /// Universe positions of the events it would newly cover, ascending.
    gain: Vec<usize>,
}

impl Candidate {
    fn evaluate(
        team: TeamNumber,
        attendance: &BTreeSet<EventKey>,
        uncovered: &BTreeSet<EventKey>,
        order: &EventOrder<'_>,
    ) -> Option<Self> {
        let mut gain: Vec<usize> = attendance
            .iter()
            .filter(|event| uncovered.contains(*event))
            .filter_map(|event| order.position(event))
            .collect();
        if gain.is_empty() {
            return None;
        }
        gain.sort_unstable();
        Some(Self { team, gain })
    }

    /// `Less` means `self` is the better pick.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .gain
            .len()
            .cmp(&self.gain.len())
            .then_with(|| self.gain.cmp(&other.gain))
            .then_with(|| self.team.cmp(&other.team))
    }
}

// ---------------------------------------------------------------------------
// Greedy walk
// ---------------------------------------------------------------------------

/// Move the events of `attendance` that are still uncovered out of
/// `uncovered` and return them.
fn take_newly_covered(
    attendance: &BTreeSet<EventKey>,
    uncovered: &mut BTreeSet<EventKey>,
) -> BTreeSet<EventKey> {
    attendance
        .iter()
        .filter_map(|event| uncovered.take(event))
        .collect()
}

/// Run one greedy walk with `banned` teams ineligible.
///
/// When `first` is given it is taken as the first pick after the mandatory
/// team instead of the best candidate. The caller has already checked that
/// `mandatory` is in `universe`.
fn walk(
    universe: &EligibleUniverse,
    events: &[EventKey],
    order: &EventOrder<'_>,
    mandatory: TeamNumber,
    first: Option<TeamNumber>,
    banned: &BTreeSet<TeamNumber>,
) -> Solution {
    let mut uncovered = order.all();
    let mut selected = BTreeSet::from([mandatory]);

    let mut steps = vec![SolutionStep {
        team: mandatory,
        newly_covered: universe
            .get(mandatory)
            .map(|attendance| take_newly_covered(attendance, &mut uncovered))
            .unwrap_or_default(),
    }];

    if let Some((team, attendance)) = first
        .filter(|team| *team != mandatory)
        .and_then(|team| universe.get(team).map(|attendance| (team, attendance)))
    {
        let newly_covered = take_newly_covered(attendance, &mut uncovered);
        debug!(team = %team, gain = newly_covered.len(), "forced first pick");
        selected.insert(team);
        steps.push(SolutionStep {
            team,
            newly_covered,
        });
    }

    while !uncovered.is_empty() {
        let best = universe
            .iter()
            .filter(|(team, _)| !selected.contains(team) && !banned.contains(team))
            .filter_map(|(team, attendance)| {
                Candidate::evaluate(team, attendance, &uncovered, order)
            })
            .min_by(Candidate::rank);

        let Some(best) = best else {
            debug!(
                remaining = uncovered.len(),
                "no eligible team covers the remaining events"
            );
            break;
        };

        let newly_covered = universe
            .get(best.team)
            .map(|attendance| take_newly_covered(attendance, &mut uncovered))
            .unwrap_or_default();
        debug!(
            team = %best.team,
            gain = newly_covered.len(),
            remaining = uncovered.len(),
            "selected team"
        );
        selected.insert(best.team);
        steps.push(SolutionStep {
            team: best.team,
            newly_covered,
        });
    }

    finish(steps, events)
}

/// Assemble a [`Solution`] from its steps and mark it via [`verify`].
fn finish(steps: Vec<SolutionStep>, events: &[EventKey]) -> Solution {
    let covered: BTreeSet<EventKey> = steps
        .iter()
        .flat_map(|step| step.newly_covered.iter().cloned())
        .collect();

    let mut solution = Solution {
        steps,
        covered,
        uncovered: BTreeSet::new(),
        complete: false,
    };

    match verify(&solution, events) {
        Verification::Complete => solution.complete = true,
        Verification::Incomplete { uncovered } => solution.uncovered = uncovered,
    }
    solution
}

/// Reject universes that violate the builder's guarantees.
fn check_universe(
    universe: &EligibleUniverse,
    mandatory: TeamNumber,
) -> Result<(), ConfigurationError> {
    if universe.is_empty() {
        return Err(ConfigurationError::EmptyUniverse);
    }
    if !universe.contains(mandatory) {
        return Err(ConfigurationError::MandatoryTeamNotEligible(mandatory));
    }
    Ok(())
}

/// Find a single covering selection, starting from `mandatory`.
///
/// An empty event list is not an error: the result is the mandatory team
/// alone, complete with nothing uncovered.
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyUniverse`] if `universe` has no teams,
/// or [`ConfigurationError::MandatoryTeamNotEligible`] if `mandatory` is not
/// among them.
pub fn solve(
    universe: &EligibleUniverse,
    events: &[EventKey],
    mandatory: TeamNumber,
) -> Result<Solution, ConfigurationError> {
    check_universe(universe, mandatory)?;
    let order = EventOrder::new(events);
    Ok(walk(universe, events, &order, mandatory, None, &BTreeSet::new()))
}

// ---------------------------------------------------------------------------
// Alternatives
// ---------------------------------------------------------------------------

/// Teams that would cover something at the first decision point, best
/// first.
fn first_choices(
    universe: &EligibleUniverse,
    order: &EventOrder<'_>,
    mandatory: TeamNumber,
) -> Vec<TeamNumber> {
    let mut uncovered = order.all();
    if let Some(attendance) = universe.get(mandatory) {
        uncovered.retain(|event| !attendance.contains(event));
    }

    let mut candidates: Vec<Candidate> = universe
        .iter()
        .filter(|(team, _)| *team != mandatory)
        .filter_map(|(team, attendance)| {
            Candidate::evaluate(team, attendance, &uncovered, order)
        })
        .collect();
    candidates.sort_by(Candidate::rank);
    candidates.into_iter().map(|candidate| candidate.team).collect()
}

/// Newly covered count of the first pick; zero when there is none.
fn first_gain(solution: &Solution) -> usize {
    solution
        .first_pick()
        .map_or(0, |step| step.newly_covered.len())
}

/// Fewest teams first, then the larger first pick, then team numbers.
fn compare_solutions(a: &Solution, b: &Solution) -> Ordering {
    a.team_count()
        .cmp(&b.team_count())
        .then_with(|| first_gain(b).cmp(&first_gain(a)))
        .then_with(|| a.team_set().cmp(&b.team_set()))
}

/// Find up to `count` distinct covering selections.
///
/// The first is the plain greedy walk. The rest diverge at the first
/// decision point, as described in the module docs, and always reach the
/// baseline's coverage. An attempt whose team set was already found is
/// discarded. Fewer than `count` solutions come back when the
/// distinguishable first choices run out.
///
/// The result is ordered by ascending team count; equal counts put the
/// solution with the larger first pick first, then compare sorted team
/// numbers.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoAlternativesRequested`] if `count` is
/// zero, or any error [`solve`] returns.
pub fn solve_many(
    universe: &EligibleUniverse,
    events: &[EventKey],
    mandatory: TeamNumber,
    count: usize,
) -> Result<Vec<Solution>, ConfigurationError> {
    if count == 0 {
        return Err(ConfigurationError::NoAlternativesRequested);
    }
    check_universe(universe, mandatory)?;

    let order = EventOrder::new(events);
    let baseline = walk(universe, events, &order, mandatory, None, &BTreeSet::new());
    let target_coverage = baseline.covered.len();

    let mut seen = BTreeSet::from([baseline.team_set()]);
    let mut solutions = vec![baseline];

    // The baseline's own first pick leads the ranking.
    let mut choices = first_choices(universe, &order, mandatory).into_iter();
    let mut banned: BTreeSet<TeamNumber> = choices.next().into_iter().collect();

    for choice in choices {
        if solutions.len() >= count {
            break;
        }

        let mut attempt = walk(universe, events, &order, mandatory, Some(choice), &banned);
        if attempt.covered.len() < target_coverage {
            debug!(
                first = %choice,
                covered = attempt.covered.len(),
                target = target_coverage,
                "bans lose coverage, rerunning without them"
            );
            attempt = walk(universe, events, &order, mandatory, Some(choice), &BTreeSet::new());
        }
        banned.insert(choice);

        if !seen.insert(attempt.team_set()) {
            debug!(first = %choice, "discarding duplicate alternative");
            continue;
        }
        solutions.push(attempt);
    }

    solutions.sort_by(compare_solutions);

    info!(
        requested = count,
        found = solutions.len(),
        min_teams = solutions.first().map_or(0, Solution::team_count),
        complete = solutions.first().is_some_and(|s| s.complete),
        "coverage search finished"
    );

    Ok(solutions)
}
