//! State machine bound to a single owner and ticked by the host.

use crate::config::MachineConfig;
use crate::core::{State, TransitionLog, TransitionRecord};
use crate::engine::transition::Transition;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// A live finite state machine driving one owner.
///
/// The host builds it with an owner and an initial state, registers
/// transitions, then calls [`update`](StateMachine::update) once per cycle.
///
/// # Example
///
/// ```rust
/// use demeanor::core::{Condition, State};
/// use demeanor::engine::{SourceFilter, StateMachine, Target, Transition};
///
/// #[derive(Default)]
/// struct Heater {
///     temperature: i32,
/// }
///
/// let cold = State::builder("Cold")
///     .on_update(|h: &mut Heater| h.temperature -= 1)
///     .build();
/// let warm = State::builder("Warm")
///     .on_update(|h: &mut Heater| h.temperature += 3)
///     .build();
///
/// let mut machine = StateMachine::new(Heater { temperature: 18 }, &cold);
/// machine
///     .add_transition(Transition::new(
///         SourceFilter::only([&cold]),
///         Target::state(&warm),
///         Condition::new(|h: &mut Heater| h.temperature < 18),
///     ))
///     .add_transition(Transition::new(
///         SourceFilter::only([&warm]),
///         Target::state(&cold),
///         Condition::new(|h: &mut Heater| h.temperature > 22),
///     ));
///
/// machine.update(); // stays Cold, 18 -> 17
/// assert!(machine.is_current_state(&cold));
/// machine.update(); // Cold -> Warm, 17 -> 20
/// assert!(machine.is_current_state(&warm));
/// assert_eq!(machine.owner().temperature, 20);
/// ```
pub struct StateMachine<T> {
    id: Uuid,
    config: MachineConfig,
    owner: T,
    current: Arc<State<T>>,
    previous: Option<Arc<State<T>>>,
    transitions: Vec<Transition<T>>,
    history: TransitionLog,
    ticks: u64,
}

impl<T> StateMachine<T> {
    /// Create a machine in `initial`, firing its on-enter hook immediately.
    pub fn new(owner: T, initial: &Arc<State<T>>) -> Self {
        Self::with_config(owner, initial, MachineConfig::default())
    }

    /// Like [`new`](StateMachine::new) with explicit configuration.
    pub fn with_config(owner: T, initial: &Arc<State<T>>, config: MachineConfig) -> Self {
        let mut machine = Self {
            id: Uuid::new_v4(),
            history: TransitionLog::with_capacity(config.history_capacity),
            config,
            owner,
            current: Arc::clone(initial),
            previous: None,
            transitions: Vec::new(),
            ticks: 0,
        };

        debug!(
            machine = %machine.config.name,
            machine_id = %machine.id,
            state = machine.current.name(),
            "entering initial state"
        );
        machine.current.enter(&mut machine.owner);
        machine
    }

    /// Append a transition. Registration order is evaluation priority.
    pub fn add_transition(&mut self, transition: Transition<T>) -> &mut Self {
        debug!(
            machine = %self.config.name,
            machine_id = %self.id,
            priority = self.transitions.len(),
            to = ?transition.target(),
            "transition registered"
        );
        self.transitions.push(transition);
        self
    }

    /// Append several transitions, keeping their order.
    pub fn add_transitions<I>(&mut self, transitions: I) -> &mut Self
    where
        I: IntoIterator<Item = Transition<T>>,
    {
        for transition in transitions {
            self.add_transition(transition);
        }
        self
    }

    /// Remove the first transition equal to `transition`.
    ///
    /// Returns `false` (and changes nothing) when no such transition is
    /// registered.
    pub fn remove_transition(&mut self, transition: &Transition<T>) -> bool {
        let Some(index) = self.transitions.iter().position(|t| t == transition) else {
            return false;
        };

        self.transitions.remove(index);
        debug!(
            machine = %self.config.name,
            machine_id = %self.id,
            priority = index,
            "transition removed"
        );
        true
    }

    /// Remove each listed transition once. Returns how many were found.
    pub fn remove_transitions<'a, I>(&mut self, transitions: I) -> usize
    where
        I: IntoIterator<Item = &'a Transition<T>>,
        T: 'a,
    {
        transitions
            .into_iter()
            .filter(|transition| self.remove_transition(transition))
            .count()
    }

    /// Run one tick.
    ///
    /// Transitions are scanned in registration order against the state that
    /// was current when the tick began; the first match wins. If its target
    /// differs from the current state, the current state's on-exit hook
    /// runs, then the target's on-enter hook. Finally the (possibly new)
    /// current state's on-update hook runs.
    ///
    /// A panicking condition unwinds before anything is mutated. A panicking
    /// exit hook leaves the current state in place; a panicking enter hook
    /// leaves the target current with its update hook not yet run.
    pub fn update(&mut self) {
        let current = Arc::clone(&self.current);
        let fired = self
            .transitions
            .iter()
            .position(|t| t.matches(&current, &mut self.owner));

        self.ticks += 1;
        let tick = self.ticks;

        if let Some(index) = fired {
            let target = self.transitions[index]
                .target()
                .resolve(self.previous.as_ref())
                .cloned();

            match target {
                Some(target) if !target.is(&current) => self.change_state(target, tick),
                Some(_) => trace!(
                    machine = %self.config.name,
                    machine_id = %self.id,
                    tick,
                    state = current.name(),
                    "self-transition, hooks skipped"
                ),
                None => trace!(
                    machine = %self.config.name,
                    machine_id = %self.id,
                    tick,
                    state = current.name(),
                    "no previous state to return to"
                ),
            }
        }

        trace!(
            machine = %self.config.name,
            machine_id = %self.id,
            tick,
            state = self.current.name(),
            fired = ?fired,
            "tick"
        );
        self.current.update(&mut self.owner);
    }

    fn change_state(&mut self, target: Arc<State<T>>, tick: u64) {
        let from = Arc::clone(&self.current);
        from.exit(&mut self.owner);

        debug!(
            machine = %self.config.name,
            machine_id = %self.id,
            tick,
            from = from.name(),
            to = target.name(),
            "state change"
        );
        self.history
            .record(TransitionRecord::new(&from, &target, tick));

        self.previous = Some(from);
        self.current = target;
        self.current.enter(&mut self.owner);
    }

    /// Identity comparison against the current state.
    pub fn is_current_state(&self, state: &State<T>) -> bool {
        self.current.is(state)
    }

    pub fn current_state(&self) -> &Arc<State<T>> {
        &self.current
    }

    /// State active before the most recent state change, if any.
    pub fn previous_state(&self) -> Option<&Arc<State<T>>> {
        self.previous.as_ref()
    }

    pub fn owner(&self) -> &T {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut T {
        &mut self.owner
    }

    /// Consume the machine, handing the owner back. No hooks run.
    pub fn into_owner(self) -> T {
        self.owner
    }

    /// Registered transitions in priority order.
    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    /// Number of completed `update` calls.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<T> fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("current", &self.current.name())
            .field("previous", &self.previous.as_ref().map(|s| s.name()))
            .field("transitions", &self.transitions.len())
            .field("ticks", &self.ticks)
            .finish()
    }
}
