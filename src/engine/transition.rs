//! Transition rules: source filters, targets and matching.

use crate::builder::{BuildError, ConfigViolation};
use crate::core::{Condition, State, StateId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Set of states compared by identity.
///
/// Insertion order is kept for diagnostics, but equality is set equality:
/// order and duplicates never matter.
pub struct StateSet<T> {
    ids: HashSet<StateId>,
    states: Vec<Arc<State<T>>>,
}

impl<T> StateSet<T> {
    pub fn new() -> Self {
        Self {
            ids: HashSet::new(),
            states: Vec::new(),
        }
    }

    /// Add a state. Returns `false` if it was already a member.
    pub fn insert(&mut self, state: &Arc<State<T>>) -> bool {
        if !self.ids.insert(state.id()) {
            return false;
        }
        self.states.push(Arc::clone(state));
        true
    }

    pub fn contains(&self, state: &State<T>) -> bool {
        self.ids.contains(&state.id())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<State<T>>> {
        self.states.iter()
    }

    /// True iff the symmetric difference of the two sets is empty.
    pub fn same_members(&self, other: &StateSet<T>) -> bool {
        self.ids.symmetric_difference(&other.ids).next().is_none()
    }

    fn names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name()).collect()
    }
}

impl<T> Default for StateSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for StateSet<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            states: self.states.clone(),
        }
    }
}

impl<T> PartialEq for StateSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_members(other)
    }
}

impl<T> Eq for StateSet<T> {}

impl<'a, T: 'a> FromIterator<&'a Arc<State<T>>> for StateSet<T> {
    fn from_iter<I: IntoIterator<Item = &'a Arc<State<T>>>>(iter: I) -> Self {
        let mut set = StateSet::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: 'a> Extend<&'a Arc<State<T>>> for StateSet<T> {
    fn extend<I: IntoIterator<Item = &'a Arc<State<T>>>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl<T> fmt::Debug for StateSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Which current states a transition may fire from.
pub enum SourceFilter<T> {
    /// Only from one of these states (an empty set never matches)
    Only(StateSet<T>),
    /// From any state except these (an empty set always matches)
    AnyExcept(StateSet<T>),
}

impl<T> SourceFilter<T> {
    pub fn any() -> Self {
        SourceFilter::AnyExcept(StateSet::new())
    }

    pub fn only<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        SourceFilter::Only(states.into_iter().collect())
    }

    pub fn any_except<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        SourceFilter::AnyExcept(states.into_iter().collect())
    }

    /// Structural check against the current state.
    pub fn admits(&self, current: &State<T>) -> bool {
        match self {
            SourceFilter::Only(states) => states.contains(current),
            SourceFilter::AnyExcept(exceptions) => !exceptions.contains(current),
        }
    }
}

impl<T> Clone for SourceFilter<T> {
    fn clone(&self) -> Self {
        match self {
            SourceFilter::Only(states) => SourceFilter::Only(states.clone()),
            SourceFilter::AnyExcept(states) => SourceFilter::AnyExcept(states.clone()),
        }
    }
}

impl<T> PartialEq for SourceFilter<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SourceFilter::Only(a), SourceFilter::Only(b)) => a == b,
            (SourceFilter::AnyExcept(a), SourceFilter::AnyExcept(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> Eq for SourceFilter<T> {}

impl<T> fmt::Debug for SourceFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::Only(states) => f.debug_tuple("Only").field(states).finish(),
            SourceFilter::AnyExcept(states) => f.debug_tuple("AnyExcept").field(states).finish(),
        }
    }
}

/// Where a transition leads.
pub enum Target<T> {
    State(Arc<State<T>>),
    /// The machine's previous state at the moment the transition fires
    Previous,
}

impl<T> Target<T> {
    pub fn state(state: &Arc<State<T>>) -> Self {
        Target::State(Arc::clone(state))
    }

    /// Resolve against the machine's previous state.
    ///
    /// Returns `None` for [`Target::Previous`] when nothing has been
    /// recorded yet.
    pub fn resolve<'a>(
        &'a self,
        previous: Option<&'a Arc<State<T>>>,
    ) -> Option<&'a Arc<State<T>>> {
        match self {
            Target::State(state) => Some(state),
            Target::Previous => previous,
        }
    }
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        match self {
            Target::State(state) => Target::State(Arc::clone(state)),
            Target::Previous => Target::Previous,
        }
    }
}

impl<T> PartialEq for Target<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::State(a), Target::State(b)) => a.is(b),
            (Target::Previous, Target::Previous) => true,
            _ => false,
        }
    }
}

impl<T> Eq for Target<T> {}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::State(state) => f.debug_tuple("State").field(&state.name()).finish(),
            Target::Previous => f.write_str("Previous"),
        }
    }
}

/// An immutable rule for changing state.
///
/// Equality is value equality: same condition identity, same target, and
/// source sets equal as sets. It is what
/// [`StateMachine::remove_transition`](crate::engine::StateMachine::remove_transition)
/// uses to find the rule to drop.
///
/// # Example
///
/// ```rust
/// use demeanor::core::{Condition, State};
/// use demeanor::engine::{SourceFilter, Target, Transition};
///
/// struct Door {
///     pushed: bool,
/// }
///
/// let closed = State::<Door>::empty("Closed");
/// let open = State::<Door>::empty("Open");
///
/// let push = Transition::new(
///     SourceFilter::only([&closed]),
///     Target::state(&open),
///     Condition::new(|door: &mut Door| door.pushed),
/// );
///
/// assert!(push.matches(&closed, &mut Door { pushed: true }));
/// assert!(!push.matches(&closed, &mut Door { pushed: false }));
/// assert!(!push.matches(&open, &mut Door { pushed: true }));
/// ```
pub struct Transition<T> {
    source: SourceFilter<T>,
    target: Target<T>,
    condition: Condition<T>,
}

impl<T> Transition<T> {
    pub fn new(source: SourceFilter<T>, target: Target<T>, condition: Condition<T>) -> Self {
        Self {
            source,
            target,
            condition,
        }
    }

    /// Transition from an explicit, non-empty list of states.
    pub fn from_states<'a, I>(
        states: I,
        target: Target<T>,
        condition: Condition<T>,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        let sources: StateSet<T> = states.into_iter().collect();
        if sources.is_empty() {
            return Err(ConfigViolation::EmptySources.into());
        }
        Ok(Self::new(SourceFilter::Only(sources), target, condition))
    }

    /// Transition that may fire from any state.
    pub fn from_any(target: Target<T>, condition: Condition<T>) -> Self {
        Self::new(SourceFilter::any(), target, condition)
    }

    /// Transition that may fire from any state outside `exceptions`.
    pub fn from_any_except<'a, I>(exceptions: I, target: Target<T>, condition: Condition<T>) -> Self
    where
        I: IntoIterator<Item = &'a Arc<State<T>>>,
        T: 'a,
    {
        Self::new(SourceFilter::any_except(exceptions), target, condition)
    }

    pub fn source(&self) -> &SourceFilter<T> {
        &self.source
    }

    pub fn target(&self) -> &Target<T> {
        &self.target
    }

    pub fn condition(&self) -> &Condition<T> {
        &self.condition
    }

    /// Whether the source filter admits `current`. Never runs the condition.
    pub fn admits(&self, current: &State<T>) -> bool {
        self.source.admits(current)
    }

    /// Structural check first; the condition runs only when it passes.
    pub fn matches(&self, current: &State<T>, owner: &mut T) -> bool {
        self.admits(current) && self.condition.check(owner)
    }
}

impl<T> Clone for Transition<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            target: self.target.clone(),
            condition: self.condition.clone(),
        }
    }
}

impl<T> PartialEq for Transition<T> {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition
            && self.target == other.target
            && self.source == other.source
    }
}

impl<T> Eq for Transition<T> {}

impl<T> fmt::Debug for Transition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("condition", &self.condition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Owner;

    fn states() -> (Arc<State<Owner>>, Arc<State<Owner>>, Arc<State<Owner>>) {
        (
            State::empty("Start"),
            State::empty("Middle"),
            State::empty("End"),
        )
    }

    fn counting_condition(result: bool) -> (Condition<Owner>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let condition = Condition::new(move |_: &mut Owner| {
            counter.fetch_add(1, Ordering::SeqCst);
            result
        });
        (condition, calls)
    }

    #[test]
    fn explicit_sources_match_members_only() {
        let (start, middle, end) = states();
        let transition = Transition::new(
            SourceFilter::only([&start, &middle]),
            Target::state(&end),
            Condition::always(),
        );

        assert!(transition.matches(&start, &mut Owner));
        assert!(transition.matches(&middle, &mut Owner));
        assert!(!transition.matches(&end, &mut Owner));
    }

    #[test]
    fn empty_explicit_set_never_matches() {
        let (start, _, end) = states();
        let transition = Transition::new(
            SourceFilter::Only(StateSet::new()),
            Target::state(&end),
            Condition::always(),
        );

        assert!(!transition.matches(&start, &mut Owner));
    }

    #[test]
    fn any_except_excludes_listed_states() {
        let (start, middle, end) = states();
        let transition = Transition::from_any_except([&start], Target::state(&end), Condition::always());

        assert!(!transition.matches(&start, &mut Owner));
        assert!(transition.matches(&middle, &mut Owner));
        assert!(transition.matches(&end, &mut Owner));
    }

    #[test]
    fn empty_exception_set_matches_everything() {
        let (start, middle, end) = states();
        let transition = Transition::from_any(Target::Previous, Condition::always());

        for state in [&start, &middle, &end] {
            assert!(transition.matches(state, &mut Owner));
        }
    }

    #[test]
    fn condition_is_not_evaluated_when_source_rejects() {
        let (start, middle, end) = states();
        let (condition, calls) = counting_condition(true);
        let transition = Transition::new(SourceFilter::only([&start]), Target::state(&end), condition);

        assert!(!transition.matches(&middle, &mut Owner));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(transition.matches(&start, &mut Owner));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn condition_is_not_evaluated_for_excepted_state() {
        let (start, _, end) = states();
        let (condition, calls) = counting_condition(true);
        let transition = Transition::from_any_except([&start], Target::state(&end), condition);

        assert!(!transition.matches(&start, &mut Owner));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn false_condition_blocks_match() {
        let (start, _, end) = states();
        let (condition, calls) = counting_condition(false);
        let transition = Transition::new(SourceFilter::only([&start]), Target::state(&end), condition);

        assert!(!transition.matches(&start, &mut Owner));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn from_states_rejects_empty_list() {
        let (_, _, end) = states();
        let result = Transition::from_states(
            Vec::<&Arc<State<Owner>>>::new(),
            Target::state(&end),
            Condition::always(),
        );

        let error = result.unwrap_err();
        assert_eq!(error.violations(), &[ConfigViolation::EmptySources]);
    }

    #[test]
    fn duplicate_entries_collapse() {
        let (start, middle, _) = states();
        let set: StateSet<Owner> = [&start, &start, &middle, &start].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().map(|s| s.name()).collect::<Vec<_>>(), vec!["Start", "Middle"]);
    }

    #[test]
    fn equality_ignores_order_and_duplicates() {
        let (start, middle, end) = states();
        let condition = Condition::always();

        let a = Transition::new(
            SourceFilter::any_except([&start, &middle]),
            Target::state(&end),
            condition.clone(),
        );
        let b = Transition::new(
            SourceFilter::any_except([&middle, &start, &middle]),
            Target::state(&end),
            condition,
        );

        assert_eq!(a, b);
    }

    #[test]
    fn equality_requires_same_condition_identity() {
        let (start, _, end) = states();
        let a = Transition::new(SourceFilter::only([&start]), Target::state(&end), Condition::always());
        let b = Transition::new(SourceFilter::only([&start]), Target::state(&end), Condition::always());

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn equality_distinguishes_targets_and_filter_kinds() {
        let (start, middle, end) = states();
        let condition = Condition::always();

        let to_end = Transition::new(SourceFilter::only([&start]), Target::state(&end), condition.clone());
        let to_middle =
            Transition::new(SourceFilter::only([&start]), Target::state(&middle), condition.clone());
        let to_previous = Transition::new(SourceFilter::only([&start]), Target::Previous, condition.clone());
        let except_start =
            Transition::new(SourceFilter::any_except([&start]), Target::state(&end), condition.clone());
        let from_middle = Transition::new(SourceFilter::only([&middle]), Target::state(&end), condition);

        assert_ne!(to_end, to_middle);
        assert_ne!(to_end, to_previous);
        assert_ne!(to_end, except_start);
        assert_ne!(to_end, from_middle);
    }

    #[test]
    fn previous_target_resolves_against_history() {
        let (start, _, _) = states();
        let target: Target<Owner> = Target::Previous;

        assert!(target.resolve(None).is_none());
        let resolved = target.resolve(Some(&start)).unwrap();
        assert!(resolved.is(&start));
    }

    #[test]
    fn debug_output_names_states() {
        let (start, _, end) = states();
        let transition = Transition::new(SourceFilter::only([&start]), Target::state(&end), Condition::always());
        let shown = format!("{:?}", transition);

        assert!(shown.contains("Only"));
        assert!(shown.contains("\"Start\""));
        assert!(shown.contains("\"End\""));
    }
}
