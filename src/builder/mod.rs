//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders for transitions and machines, plus
//! a few shorthands for the most common transition shapes. Builders are
//! pure convenience: a built transition matches exactly like one made with
//! [`Transition::new`].

pub mod error;
pub mod machine;
pub mod transition;
mod validate;

pub use error::{BuildError, ConfigViolation};
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Condition, State};
use crate::engine::{SourceFilter, Target, Transition};
use std::sync::Arc;

/// Start a transition that fires from any of `states`.
///
/// # Example
///
/// ```
/// use demeanor::builder::from;
/// use demeanor::core::State;
///
/// struct Guard {
///     alarm: bool,
/// }
///
/// let patrol = State::<Guard>::empty("Patrol");
/// let chase = State::<Guard>::empty("Chase");
///
/// let spotted = from([&patrol])
///     .to(&chase)
///     .when(|g: &mut Guard| g.alarm)
///     .build()
///     .unwrap();
///
/// assert!(spotted.matches(&patrol, &mut Guard { alarm: true }));
/// ```
pub fn from<'a, T, I>(states: I) -> TransitionBuilder<T>
where
    I: IntoIterator<Item = &'a Arc<State<T>>>,
    T: 'a,
{
    TransitionBuilder::new().from_all(states)
}

/// Start a transition that fires from any state, optionally narrowed with
/// `.except(..)`.
///
/// # Example
///
/// ```
/// use demeanor::builder::from_any;
/// use demeanor::core::State;
///
/// struct Guard {
///     stunned: bool,
/// }
///
/// let idle = State::<Guard>::empty("Idle");
/// let patrol = State::<Guard>::empty("Patrol");
/// let stunned = State::<Guard>::empty("Stunned");
///
/// let knocked_out = from_any()
///     .except(&stunned)
///     .to(&stunned)
///     .when(|g: &mut Guard| g.stunned)
///     .build()
///     .unwrap();
///
/// assert!(knocked_out.matches(&idle, &mut Guard { stunned: true }));
/// assert!(knocked_out.matches(&patrol, &mut Guard { stunned: true }));
/// assert!(!knocked_out.matches(&stunned, &mut Guard { stunned: true }));
/// ```
pub fn from_any<T>() -> TransitionBuilder<T> {
    TransitionBuilder::new().from_any()
}

/// Create a transition from one state to another guarded by `predicate`.
pub fn guarded_transition<T, F>(from: &Arc<State<T>>, to: &Arc<State<T>>, predicate: F) -> Transition<T>
where
    F: Fn(&mut T) -> bool + Send + Sync + 'static,
{
    Transition::new(
        SourceFilter::only([from]),
        Target::state(to),
        Condition::new(predicate),
    )
}

/// Create a transition from one state back to whichever state preceded it.
pub fn return_transition<T, F>(from: &Arc<State<T>>, predicate: F) -> Transition<T>
where
    F: Fn(&mut T) -> bool + Send + Sync + 'static,
{
    Transition::new(
        SourceFilter::only([from]),
        Target::Previous,
        Condition::new(predicate),
    )
}
