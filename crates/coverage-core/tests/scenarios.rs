//! End-to-end coverage scenarios.
//!
//! Each test builds a roster of [`Team`] records, filters it through
//! [`build_universe`], and checks the solver's output against the coverage
//! guarantees: completeness, mandatory inclusion, no zero-gain picks,
//! ordering, and determinism.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use coverage_core::{EligibleUniverse, build_universe, solve, solve_many, verify};
use coverage_types::{Constraints, EventKey, Solution, Team, TeamNumber};

fn keys(names: &[&str]) -> Vec<EventKey> {
    names.iter().map(|name| EventKey::from(*name)).collect()
}

fn team(number: u32, events: &[&str]) -> Team {
    Team::new(number, format!("Team {number}")).attending(events.iter().copied())
}

fn numbers(solution: &Solution) -> Vec<u32> {
    solution.teams().map(TeamNumber::get).collect()
}

/// A small district where several alternatives exist.
fn district() -> (Vec<Team>, Vec<EventKey>) {
    let roster = vec![
        team(3314, &["e1", "e2"]),
        team(10, &["e3", "e4", "e5"]),
        team(20, &["e3", "e4"]),
        team(30, &["e5", "e6"]),
        team(40, &["e6"]),
        team(50, &["e4", "e5", "e6"]),
        team(60, &["e3"]),
        team(70, &[]),
    ];
    (roster, keys(&["e1", "e2", "e3", "e4", "e5", "e6"]))
}

/// Every non-mandatory step must have covered something new, and the
/// union of the members' attendance must match the completeness flag.
fn assert_well_formed(solution: &Solution, roster: &[Team], events: &[EventKey]) {
    for step in solution.steps.iter().skip(1) {
        assert!(
            !step.newly_covered.is_empty(),
            "team {} was added with zero gain",
            step.team
        );
    }

    let attended: BTreeSet<&EventKey> = roster
        .iter()
        .filter(|t| solution.contains(t.number))
        .flat_map(|t| t.attendance.iter())
        .collect();
    let all_covered = events.iter().all(|event| attended.contains(event));
    assert_eq!(solution.complete, all_covered);
    assert_eq!(verify(solution, events).is_complete(), solution.complete);
}

#[test]
fn scenario_a_highest_gain_wins() {
    let roster = vec![team(1, &["E1"]), team(2, &["E2", "E3"]), team(3, &["E1", "E2"])];
    let events = keys(&["E1", "E2", "E3"]);
    let universe = build_universe(&roster, &Constraints::for_team(TeamNumber(1))).unwrap();

    let solution = solve(&universe, &events, TeamNumber(1)).unwrap();

    assert_eq!(numbers(&solution), vec![1, 2]);
    assert!(solution.complete);
    assert!(solution.uncovered.is_empty());
    assert_well_formed(&solution, &roster, &events);
}

#[test]
fn scenario_b_partial_cover_lists_residual() {
    let roster = vec![team(1, &["E1"]), team(2, &[]), team(3, &["E1"])];
    let events = keys(&["E1", "E2", "E3"]);
    let universe = build_universe(&roster, &Constraints::for_team(TeamNumber(1))).unwrap();

    let solution = solve(&universe, &events, TeamNumber(1)).unwrap();

    assert_eq!(numbers(&solution), vec![1]);
    assert!(!solution.complete);
    assert_eq!(
        solution.uncovered,
        keys(&["E2", "E3"]).into_iter().collect::<BTreeSet<_>>()
    );
    assert_well_formed(&solution, &roster, &events);
}

#[test]
fn scenario_c_excluded_team_never_selected() {
    let roster = vec![
        team(7, &["a"]),
        team(50, &["b", "unique"]),
        team(60, &["b"]),
        team(150, &["unique"]),
    ];
    let events = keys(&["a", "b", "unique"]);
    let mut constraints = Constraints::for_team(TeamNumber(7));
    constraints.max_team_number = 100;
    constraints.excluded.insert(TeamNumber(50));
    let universe = build_universe(&roster, &constraints).unwrap();

    let solutions = solve_many(&universe, &events, TeamNumber(7), 5).unwrap();

    assert!(!solutions.is_empty());
    for solution in &solutions {
        assert!(!solution.contains(TeamNumber(50)));
        assert!(!solution.contains(TeamNumber(150)));
        assert!(solution.uncovered.contains(&EventKey::from("unique")));
        assert_well_formed(solution, &roster, &events);
    }
}

#[test]
fn scenario_d_include_list_overrides_bound() {
    let roster = vec![team(3314, &["a"]), team(15_000, &["b"]), team(16_000, &["b"])];
    let mut constraints = Constraints::for_team(TeamNumber(3314));
    constraints.max_team_number = 6000;
    constraints.included.insert(TeamNumber(15_000));
    let universe = build_universe(&roster, &constraints).unwrap();

    assert!(universe.contains(TeamNumber(15_000)));
    assert!(!universe.contains(TeamNumber(16_000)));

    let solution = solve(&universe, &keys(&["a", "b"]), TeamNumber(3314)).unwrap();
    assert_eq!(numbers(&solution), vec![3314, 15_000]);
}

#[test]
fn scenario_e_alternatives_run_out_of_first_choices() {
    let roster = vec![team(1, &["E1"]), team(2, &["E2", "E3"]), team(3, &["E2", "E3"])];
    let events = keys(&["E1", "E2", "E3"]);
    let universe = build_universe(&roster, &Constraints::for_team(TeamNumber(1))).unwrap();

    let solutions = solve_many(&universe, &events, TeamNumber(1), 5).unwrap();

    assert_eq!(solutions.len(), 2);
    let sets: BTreeSet<BTreeSet<TeamNumber>> =
        solutions.iter().map(Solution::team_set).collect();
    assert_eq!(sets.len(), solutions.len());
    assert_eq!(solutions.first().map(numbers), Some(vec![1, 2]));
    assert_eq!(solutions.get(1).map(numbers), Some(vec![1, 3]));
}

#[test]
fn mandatory_team_in_every_solution() {
    let (roster, events) = district();
    let mut constraints = Constraints::for_team(TeamNumber(3314));
    constraints.max_team_number = 100;
    let universe = build_universe(&roster, &constraints).unwrap();

    let solutions = solve_many(&universe, &events, TeamNumber(3314), 5).unwrap();

    assert!(solutions.len() > 1);
    for solution in &solutions {
        assert_eq!(solution.steps.first().map(|s| s.team), Some(TeamNumber(3314)));
        assert!(solution.complete);
        assert_well_formed(solution, &roster, &events);
    }
}

#[test]
fn smaller_alternative_sorts_ahead_of_greedy_baseline() {
    // Team 10 has the largest first gain but leads to a four-team cover;
    // banning it finds the three-team one.
    let roster = vec![
        team(1, &[]),
        team(10, &["a", "b", "c", "d"]),
        team(20, &["a", "b", "e"]),
        team(30, &["c", "d", "f"]),
    ];
    let events = keys(&["a", "b", "c", "d", "e", "f"]);
    let universe = build_universe(&roster, &Constraints::for_team(TeamNumber(1))).unwrap();

    let baseline = solve(&universe, &events, TeamNumber(1)).unwrap();
    assert_eq!(numbers(&baseline), vec![1, 10, 20, 30]);

    let solutions = solve_many(&universe, &events, TeamNumber(1), 5).unwrap();

    let walks: Vec<Vec<u32>> = solutions.iter().map(numbers).collect();
    assert_eq!(walks, vec![vec![1, 20, 30], vec![1, 10, 20, 30]]);
    for solution in &solutions {
        assert!(solution.complete);
        assert_well_formed(solution, &roster, &events);
    }
}

#[test]
fn equal_sizes_ordered_by_first_pick_then_team_numbers() {
    let (roster, events) = district();
    let mut constraints = Constraints::for_team(TeamNumber(3314));
    constraints.max_team_number = 100;
    let universe = build_universe(&roster, &constraints).unwrap();

    let solutions = solve_many(&universe, &events, TeamNumber(3314), 10).unwrap();

    // Found in the order 10, 50, 20, (30 duplicates the baseline), 60, 40;
    // the last two swap because {10, 40} sorts before {50, 60}.
    let walks: Vec<Vec<u32>> = solutions.iter().map(numbers).collect();
    assert_eq!(
        walks,
        vec![
            vec![3314, 10, 30],
            vec![3314, 50, 20],
            vec![3314, 20, 30],
            vec![3314, 40, 10],
            vec![3314, 60, 50],
        ]
    );
    let first_gains: Vec<usize> = solutions
        .iter()
        .map(|s| s.first_pick().map_or(0, |step| step.newly_covered.len()))
        .collect();
    assert_eq!(first_gains, vec![3, 3, 2, 1, 1]);
}

#[test]
fn sole_coverer_ban_still_yields_alternatives() {
    let roster = vec![
        team(1, &["a"]),
        team(2, &["b", "c", "d"]),
        team(3, &["b"]),
        team(4, &["d"]),
        team(5, &["b", "d"]),
    ];
    let events = keys(&["a", "b", "c", "d"]);
    let universe = build_universe(&roster, &Constraints::for_team(TeamNumber(1))).unwrap();

    let solutions = solve_many(&universe, &events, TeamNumber(1), 2).unwrap();

    let walks: Vec<Vec<u32>> = solutions.iter().map(numbers).collect();
    assert_eq!(walks, vec![vec![1, 2], vec![1, 5, 2]]);
    for solution in &solutions {
        assert!(solution.complete);
        assert_well_formed(solution, &roster, &events);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let (roster, events) = district();
    let mut constraints = Constraints::for_team(TeamNumber(3314));
    constraints.max_team_number = 100;

    let first = {
        let universe = build_universe(&roster, &constraints).unwrap();
        solve_many(&universe, &events, TeamNumber(3314), 5).unwrap()
    };
    let mut reversed = roster.clone();
    reversed.reverse();
    let second = {
        let universe = build_universe(&reversed, &constraints).unwrap();
        solve_many(&universe, &events, TeamNumber(3314), 5).unwrap()
    };

    assert_eq!(first, second);
}

#[test]
fn universe_missing_mandatory_is_rejected() {
    let attendance: BTreeSet<EventKey> = keys(&["a"]).into_iter().collect();
    let universe: EligibleUniverse = [(TeamNumber(2), attendance)].into_iter().collect();
    assert!(solve_many(&universe, &keys(&["a"]), TeamNumber(1), 3).is_err());
}
