//! Error types for the `coverage-core` crate.
//!
//! Every variant is a configuration fault: an invariant violated by the
//! inputs. They abort the computation before any solving begins.

use coverage_types::TeamNumber;

/// Invariant violations in the inputs supplied to the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The mandatory team does not appear in the supplied roster. The
    /// caller must fetch it before building the universe.
    #[error("mandatory team {0} is not in the supplied roster")]
    MandatoryTeamMissing(TeamNumber),

    /// No teams are eligible at all, not even the mandatory team.
    #[error("eligible universe is empty")]
    EmptyUniverse,

    /// The eligible universe was built without the mandatory team.
    #[error("mandatory team {0} is not in the eligible universe")]
    MandatoryTeamNotEligible(TeamNumber),

    /// `solve_many` was asked for zero solutions.
    #[error("at least one solution must be requested")]
    NoAlternativesRequested,
}
