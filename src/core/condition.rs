//! Transition conditions.
//!
//! A condition is the predicate a transition evaluates against the owner.
//! Conditions are compared by identity: two `Condition` values are the same
//! condition iff they share one allocation, which is what lets a machine
//! find and remove a transition that was built from a cloned condition.

use std::fmt;
use std::sync::Arc;

type Predicate<T> = dyn Fn(&mut T) -> bool + Send + Sync;

/// Predicate over the owner that decides whether a transition fires.
///
/// Cloning a condition is cheap and preserves its identity.
///
/// # Example
///
/// ```rust
/// use demeanor::core::Condition;
///
/// struct Tank {
///     fuel: u32,
/// }
///
/// let empty = Condition::new(|tank: &mut Tank| tank.fuel == 0);
/// let same = empty.clone();
/// let lookalike = Condition::new(|tank: &mut Tank| tank.fuel == 0);
///
/// assert!(empty.check(&mut Tank { fuel: 0 }));
/// assert!(!empty.check(&mut Tank { fuel: 3 }));
/// assert!(empty.same_as(&same));
/// assert!(!empty.same_as(&lookalike));
/// ```
pub struct Condition<T> {
    predicate: Arc<Predicate<T>>,
}

impl<T> Condition<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut T) -> bool + Send + Sync + 'static,
    {
        Condition {
            predicate: Arc::new(predicate),
        }
    }

    /// A condition that is always true.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// A condition that is never true.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Evaluate the predicate against the owner.
    ///
    /// The predicate may inspect or mutate the owner; it runs exactly once
    /// per call.
    pub fn check(&self, owner: &mut T) -> bool {
        (self.predicate)(owner)
    }

    /// Identity comparison: true iff both values share one predicate.
    pub fn same_as(&self, other: &Condition<T>) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl<T> Clone for Condition<T> {
    fn clone(&self) -> Self {
        Condition {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> PartialEq for Condition<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<T> Eq for Condition<T> {}

impl<T> fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("predicate", &Arc::as_ptr(&self.predicate).cast::<()>())
            .finish()
    }
}
