//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::MachineConfig;
use crate::core::State;
use crate::engine::{StateMachine, Transition};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// The initial state's on-enter hook fires inside [`build`](Self::build),
/// exactly as with [`StateMachine::new`].
pub struct StateMachineBuilder<T> {
    owner: Option<T>,
    initial: Option<Arc<State<T>>>,
    transitions: Vec<Transition<T>>,
    config: MachineConfig,
}

impl<T> StateMachineBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            owner: None,
            initial: None,
            transitions: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the owner driven by the machine (required).
    pub fn owner(mut self, owner: T) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: &Arc<State<T>>) -> Self {
        self.initial = Some(Arc::clone(state));
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Shorthand for setting only the configured name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<T>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<T>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, in priority order.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition<T>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<T>, BuildError> {
        let owner = self.owner.ok_or(BuildError::MissingOwner)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = StateMachine::with_config(owner, &initial, self.config);
        machine.add_transitions(self.transitions);
        Ok(machine)
    }
}

impl<T> Default for StateMachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::from;
    use crate::core::Condition;
    use crate::engine::{SourceFilter, Target};

    #[derive(Default)]
    struct Robot {
        charged: bool,
        boots: u32,
    }

    #[test]
    fn builder_requires_owner() {
        let idle: Arc<State<Robot>> = State::empty("Idle");
        let result = StateMachineBuilder::new().initial(&idle).build();

        assert!(matches!(result, Err(BuildError::MissingOwner)));
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = StateMachineBuilder::new().owner(Robot::default()).build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn machine_without_transitions_is_allowed() {
        let idle: Arc<State<Robot>> = State::empty("Idle");
        let machine = StateMachineBuilder::new()
            .owner(Robot::default())
            .initial(&idle)
            .build()
            .unwrap();

        assert!(machine.transitions().is_empty());
        assert!(machine.is_current_state(&idle));
    }

    #[test]
    fn build_fires_initial_enter_hook() {
        let off = State::builder("Off")
            .on_enter(|r: &mut Robot| r.boots += 1)
            .build();
        let machine = StateMachineBuilder::new()
            .owner(Robot::default())
            .initial(&off)
            .build()
            .unwrap();

        assert_eq!(machine.owner().boots, 1);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let off: Arc<State<Robot>> = State::empty("Off");
        let on: Arc<State<Robot>> = State::empty("On");

        let mut machine = StateMachineBuilder::new()
            .owner(Robot {
                charged: true,
                boots: 0,
            })
            .initial(&off)
            .name("robot-1")
            .transition(from([&off]).to(&on).when(|r: &mut Robot| r.charged))
            .unwrap()
            .add_transition(Transition::new(
                SourceFilter::only([&on]),
                Target::state(&off),
                Condition::new(|r: &mut Robot| !r.charged),
            ))
            .build()
            .unwrap();

        assert_eq!(machine.name(), "robot-1");
        assert_eq!(machine.transitions().len(), 2);

        machine.update();
        assert!(machine.is_current_state(&on));

        machine.owner_mut().charged = false;
        machine.update();
        assert!(machine.is_current_state(&off));
    }

    #[test]
    fn invalid_transition_stops_the_chain() {
        let off: Arc<State<Robot>> = State::empty("Off");
        let result = StateMachineBuilder::new()
            .owner(Robot::default())
            .initial(&off)
            .transition(from([&off]).when(|_: &mut Robot| true));

        assert!(matches!(result, Err(BuildError::InvalidConfiguration(_))));
    }

    #[test]
    fn config_is_applied() {
        let off: Arc<State<Robot>> = State::empty("Off");
        let machine = StateMachineBuilder::new()
            .owner(Robot::default())
            .initial(&off)
            .config(MachineConfig::named("quiet").history_capacity(0))
            .build()
            .unwrap();

        assert_eq!(machine.name(), "quiet");
        assert_eq!(machine.history().capacity(), 0);
    }
}
