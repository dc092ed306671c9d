//! Accumulating validation of transition definitions.
//!
//! Every check runs, and every failure is reported, so a host sees all the
//! problems in a definition at once instead of fixing them one at a time.

use crate::builder::error::{BuildError, ConfigViolation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a check that yields a value on success.
pub(crate) type Checked<V> = Validation<V, NonEmptyVec<ConfigViolation>>;

/// Outcome of a single configuration check.
pub(crate) type Check = Checked<()>;

/// Pass when `ok`, otherwise fail with `violation`.
pub(crate) fn require(ok: bool, violation: ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

/// Pass with the value when it is set, otherwise fail with `violation`.
pub(crate) fn present<V>(value: Option<V>, violation: ConfigViolation) -> Checked<V> {
    match value {
        Some(value) => Validation::success(value),
        None => Validation::fail(violation),
    }
}

/// Combine checks, keeping every failure in order.
pub(crate) fn all(checks: Vec<Check>) -> Check {
    Validation::all_vec(checks).map(|_| ())
}

/// Turn the failed checks among `checks` into one build error.
///
/// Callers pass at least one failed check.
pub(crate) fn reject(checks: Vec<Check>) -> BuildError {
    let violations = checks
        .into_iter()
        .flat_map(|check| match check {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        })
        .collect();
    BuildError::InvalidConfiguration(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_passing_checks_succeed() {
        let checks = vec![
            require(true, ConfigViolation::MissingSource),
            require(true, ConfigViolation::MissingTarget),
        ];

        assert!(matches!(all(checks), Validation::Success(())));
    }

    #[test]
    fn every_failure_is_kept() {
        let checks = vec![
            require(false, ConfigViolation::EmptySources),
            require(true, ConfigViolation::MissingSource),
            require(false, ConfigViolation::EmptyExceptions),
        ];

        match all(checks) {
            Validation::Failure(errors) => assert_eq!(
                errors.iter().cloned().collect::<Vec<_>>(),
                vec![ConfigViolation::EmptySources, ConfigViolation::EmptyExceptions]
            ),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn no_checks_is_success() {
        assert!(matches!(all(Vec::new()), Validation::Success(())));
    }

    #[test]
    fn present_passes_value_through() {
        assert!(matches!(
            present(Some(7), ConfigViolation::MissingTarget),
            Validation::Success(7)
        ));
        assert!(matches!(
            present(None::<u8>, ConfigViolation::MissingTarget),
            Validation::Failure(_)
        ));
    }

    #[test]
    fn reject_reports_every_failure_in_order() {
        let checks = vec![
            require(false, ConfigViolation::MissingSource),
            require(true, ConfigViolation::EmptySources),
            require(false, ConfigViolation::MissingTarget),
            require(false, ConfigViolation::MissingCondition),
        ];

        let error = reject(checks);

        assert_eq!(
            error.violations(),
            &[
                ConfigViolation::MissingSource,
                ConfigViolation::MissingTarget,
                ConfigViolation::MissingCondition,
            ]
        );
    }
}
