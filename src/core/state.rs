//! Behavioral states and their lifecycle hooks.
//!
//! A state is an identity-bearing bundle of three optional callbacks over
//! the owner. States carry no transition data; they are built once, shared
//! through `Arc`, and referenced by any number of machines and transitions.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Callback invoked with the owner when a state is entered, updated or exited.
pub type Hook<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// Process-unique identity of a [`State`] instance.
///
/// Two states are the same state iff their ids are equal. Ids are never
/// reused within a process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
pub struct StateId(u64);

impl StateId {
    fn next() -> Self {
        StateId(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, useful for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One discrete behavioral mode of an owner `T`.
///
/// States are not `Clone`: identity is the point. Share them with
/// [`Arc::clone`] instead.
///
/// # Example
///
/// ```rust
/// use demeanor::core::State;
///
/// struct Lamp {
///     lit: bool,
///     ticks_on: u32,
/// }
///
/// let on = State::builder("On")
///     .on_enter(|lamp: &mut Lamp| lamp.lit = true)
///     .on_update(|lamp: &mut Lamp| lamp.ticks_on += 1)
///     .on_exit(|lamp: &mut Lamp| lamp.lit = false)
///     .build();
///
/// let mut lamp = Lamp { lit: false, ticks_on: 0 };
/// on.enter(&mut lamp);
/// on.update(&mut lamp);
/// assert!(lamp.lit);
/// assert_eq!(lamp.ticks_on, 1);
/// assert_eq!(on.name(), "On");
/// ```
pub struct State<T> {
    id: StateId,
    name: Cow<'static, str>,
    on_enter: Option<Hook<T>>,
    on_update: Option<Hook<T>>,
    on_exit: Option<Hook<T>>,
}

impl<T> State<T> {
    /// Build a shared state from three optional hooks.
    ///
    /// Any or all hooks may be `None`, in which case that lifecycle step is
    /// a no-op.
    pub fn build(
        name: impl Into<Cow<'static, str>>,
        on_enter: Option<Hook<T>>,
        on_update: Option<Hook<T>>,
        on_exit: Option<Hook<T>>,
    ) -> Arc<Self> {
        Arc::new(State {
            id: StateId::next(),
            name: name.into(),
            on_enter,
            on_update,
            on_exit,
        })
    }

    /// Start building a state with the given diagnostic name.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> StateBuilder<T> {
        StateBuilder {
            name: name.into(),
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }

    /// A state with no hooks at all.
    pub fn empty(name: impl Into<Cow<'static, str>>) -> Arc<Self> {
        Self::build(name, None, None, None)
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity comparison.
    pub fn is(&self, other: &State<T>) -> bool {
        self.id == other.id
    }

    /// Run the on-enter hook, if any.
    pub fn enter(&self, owner: &mut T) {
        if let Some(hook) = &self.on_enter {
            hook(owner);
        }
    }

    /// Run the on-update hook, if any.
    pub fn update(&self, owner: &mut T) {
        if let Some(hook) = &self.on_update {
            hook(owner);
        }
    }

    /// Run the on-exit hook, if any.
    pub fn exit(&self, owner: &mut T) {
        if let Some(hook) = &self.on_exit {
            hook(owner);
        }
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl<T> Eq for State<T> {}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

impl<T> fmt::Display for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.id)
    }
}

/// Fluent construction of a [`State`].
pub struct StateBuilder<T> {
    name: Cow<'static, str>,
    on_enter: Option<Hook<T>>,
    on_update: Option<Hook<T>>,
    on_exit: Option<Hook<T>>,
}

impl<T> StateBuilder<T> {
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Arc<State<T>> {
        State::build(self.name, self.on_enter, self.on_update, self.on_exit)
    }
}
