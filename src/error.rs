//! Error types surfaced by configuration loading and domain construction.

use thiserror::Error;

/// Errors a caller can actually hit while building or driving a [`crate::domain::Domain`].
///
/// `SearchExhausted` ("no plan exists") is deliberately not a variant
/// here — exhausting the search space is an expected outcome of planning,
/// not a failure of the planner itself, so it is reported as `Ok(None)`
/// from [`crate::plan::planner::AcyclicPlanner::run`] instead.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The init/goal configuration could not be parsed, or described an
    /// inconsistent world (e.g. a goal entity absent from init).
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An action's preconditions and effects disagreed with a domain
    /// invariant. Checked only under `debug_assertions` (spec §4.E).
    #[error("domain invariant violated: {0}")]
    DomainInvariant(String),

    /// An action schema referenced a parameter name that was never bound.
    #[error("parameter `{0}` was never bound in this grounding")]
    ParameterBinding(String),
}

/// Errors raised while parsing or validating a problem configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to parse problem file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read problem file `{path}`: {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error("goal references unknown entity `{0}`")]
    UnknownGoalEntity(String),

    #[error("problem configuration declares no robot")]
    NoRobot,

    #[error("entity `{0}` has a non-finite position component")]
    NonFinitePosition(String),
}
