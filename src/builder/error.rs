//! Build errors for state machines and transitions.

use thiserror::Error;

/// A single problem found in a transition definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Transition needs at least one source state. Pass a state to .from(..) or use .from_any()")]
    EmptySources,

    #[error("Exception list is empty. Pass at least one state to .except(..)")]
    EmptyExceptions,

    #[error("Exceptions only apply to .from_any() transitions, not to explicit source states")]
    ExceptionsOnExplicitSources,

    #[error("Cannot combine explicit .from(..) states with .from_any()")]
    ConflictingSources,

    #[error("Transition source not specified. Call .from(..) or .from_any()")]
    MissingSource,

    #[error("Transition target not specified. Call .to(state) or .to_previous()")]
    MissingTarget,

    #[error("Transition condition not specified. Call .when(predicate) or .condition(..)")]
    MissingCondition,
}

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every violation found in one transition definition
    #[error("Invalid configuration: {}", describe(.0))]
    InvalidConfiguration(Vec<ConfigViolation>),

    #[error("Owner not specified. Call .owner(value) before .build()")]
    MissingOwner,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,
}

impl BuildError {
    /// Violations carried by an `InvalidConfiguration`, empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            BuildError::InvalidConfiguration(violations) => violations,
            _ => &[],
        }
    }
}

impl From<ConfigViolation> for BuildError {
    fn from(violation: ConfigViolation) -> Self {
        BuildError::InvalidConfiguration(vec![violation])
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
