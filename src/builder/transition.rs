//! Builder for constructing transitions.

use crate::builder::error::{BuildError, ConfigViolation};
use crate::builder::validate::{all, present, reject, require};
use crate::core::{Condition, State};
use crate::engine::{SourceFilter, StateSet, Target, Transition};
use std::sync::Arc;
use stillwater::validation::Validation;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SourceMode {
    Explicit,
    Any,
}

/// Builder for constructing transitions with a fluent API.
///
/// Problems noticed while chaining (an empty `except` list, exceptions on an
/// explicit source set, ...) are remembered and reported together by
/// [`build`](TransitionBuilder::build) as one `InvalidConfiguration`.
pub struct TransitionBuilder<T> {
    mode: Option<SourceMode>,
    sources: StateSet<T>,
    exceptions: StateSet<T>,
    target: Option<Target<T>>,
    condition: Option<Condition<T>>,
    noticed: Vec<ConfigViolation>,
}

impl<T> TransitionBuilder<T> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            mode: None,
            sources: StateSet::new(),
            exceptions: StateSet::new(),
            target: None,
            condition: None,
            noticed: Vec::new(),
        }
    }

    /// Add a source state. May be called repeatedly.
    pub fn from(mut self, state: &Arc<State<T>>) -> Self {
        self.explicit();
        self.sources.insert(state);
        self
    }

    /// Add several source states; at least one is required.
    pub fn from_all<'a, I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        self.explicit();
        let before = self.sources.len();
        let mut given = 0;
        for state in states {
            given += 1;
            self.sources.insert(state);
        }
        if given == 0 && before == 0 {
            self.notice(ConfigViolation::EmptySources);
        }
        self
    }

    /// Allow the transition to fire from any state.
    pub fn from_any(mut self) -> Self {
        if self.mode == Some(SourceMode::Explicit) {
            self.notice(ConfigViolation::ConflictingSources);
        }
        self.mode = Some(SourceMode::Any);
        self
    }

    /// Exclude a state from a `from_any` transition.
    ///
    /// Calling this before any source is set implies `from_any`.
    pub fn except(self, state: &Arc<State<T>>) -> Self {
        self.except_all([state])
    }

    /// Exclude several states; at least one is required. Duplicates are
    /// harmless.
    pub fn except_all<'a, I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        match self.mode {
            Some(SourceMode::Explicit) => self.notice(ConfigViolation::ExceptionsOnExplicitSources),
            _ => self.mode = Some(SourceMode::Any),
        }
        let mut given = 0;
        for state in states {
            given += 1;
            self.exceptions.insert(state);
        }
        if given == 0 {
            self.notice(ConfigViolation::EmptyExceptions);
        }
        self
    }

    /// Set the target state.
    pub fn to(mut self, state: &Arc<State<T>>) -> Self {
        self.target = Some(Target::state(state));
        self
    }

    /// Return to the machine's previous state when the transition fires.
    pub fn to_previous(mut self) -> Self {
        self.target = Some(Target::Previous);
        self
    }

    /// Set the condition from a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&mut T) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Condition::new(predicate));
        self
    }

    /// Set a shared condition, keeping its identity.
    pub fn condition(mut self, condition: Condition<T>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Build the transition, reporting every configuration problem at once.
    pub fn build(self) -> Result<Transition<T>, BuildError> {
        let noticed = all(
            self.noticed
                .into_iter()
                .map(|violation| require(false, violation))
                .collect(),
        );
        let mode = present(self.mode, ConfigViolation::MissingSource);
        let target = present(self.target, ConfigViolation::MissingTarget);
        let condition = present(self.condition, ConfigViolation::MissingCondition);

        match (noticed, mode, target, condition) {
            (
                Validation::Success(()),
                Validation::Success(mode),
                Validation::Success(target),
                Validation::Success(condition),
            ) => {
                let source = match mode {
                    SourceMode::Explicit => SourceFilter::Only(self.sources),
                    SourceMode::Any => SourceFilter::AnyExcept(self.exceptions),
                };
                Ok(Transition::new(source, target, condition))
            }
            (noticed, mode, target, condition) => Err(reject(vec![
                noticed,
                mode.map(|_| ()),
                target.map(|_| ()),
                condition.map(|_| ()),
            ])),
        }
    }

    fn explicit(&mut self) {
        match self.mode {
            Some(SourceMode::Any) => self.notice(ConfigViolation::ConflictingSources),
            _ => self.mode = Some(SourceMode::Explicit),
        }
        if !self.exceptions.is_empty() {
            self.notice(ConfigViolation::ExceptionsOnExplicitSources);
        }
    }

    fn notice(&mut self, violation: ConfigViolation) {
        if !self.noticed.contains(&violation) {
            self.noticed.push(violation);
        }
    }
}

impl<T> Default for TransitionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
