//! Demeanor: a tick-driven finite state machine engine
//!
//! Demeanor attaches discrete, condition-driven behavioral states to an
//! arbitrary owner value. The host ticks the machine once per cycle; the
//! engine picks at most one transition, runs exit/enter hooks when the state
//! changes, then runs the current state's update hook.
//!
//! # Core Concepts
//!
//! - **State**: identity-bearing bundle of optional enter/update/exit hooks
//! - **Transition**: a source filter, a target (or "previous") and a condition
//! - **StateMachine**: one owner, current/previous state, ordered transitions
//!
//! Transition order is priority: the first registered transition whose
//! source filter admits the current state and whose condition holds wins.
//!
//! # Example
//!
//! ```rust
//! use demeanor::builder::{from, from_any};
//! use demeanor::core::State;
//! use demeanor::engine::StateMachine;
//!
//! #[derive(Default)]
//! struct Villager {
//!     target: Option<u32>,
//!     greetings: u32,
//! }
//!
//! let idle = State::empty("Idle");
//! let greet = State::builder("Greet")
//!     .on_update(|v: &mut Villager| v.greetings += 1)
//!     .build();
//!
//! let mut machine = StateMachine::new(Villager::default(), &idle);
//! machine.add_transitions([
//!     from([&idle])
//!         .to(&greet)
//!         .when(|v: &mut Villager| v.target.is_some())
//!         .build()
//!         .unwrap(),
//!     from_any()
//!         .except(&idle)
//!         .to(&idle)
//!         .when(|v: &mut Villager| v.target.is_none())
//!         .build()
//!         .unwrap(),
//! ]);
//!
//! machine.update();
//! assert!(machine.is_current_state(&idle));
//!
//! machine.owner_mut().target = Some(7);
//! machine.update();
//! assert!(machine.is_current_state(&greet));
//! assert_eq!(machine.owner().greetings, 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, ConfigViolation, StateMachineBuilder, TransitionBuilder};
pub use config::MachineConfig;
pub use crate::core::{Condition, State, StateId};
pub use engine::{SourceFilter, StateMachine, Target, Transition};
