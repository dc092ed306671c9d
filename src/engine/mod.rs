//! The evaluation engine: transitions and the machine that runs them.
//!
//! # Key Concepts
//!
//! - **Transitions**: a source filter, a target and a condition. Matching
//!   checks the source filter first and only then runs the condition.
//! - **State Machine**: owns the current/previous state of one owner and an
//!   ordered transition list. Each `update` fires at most one transition
//!   (the first match in registration order) and then runs the current
//!   state's update hook.

mod machine;
mod transition;

pub use machine::StateMachine;
pub use transition::{SourceFilter, StateSet, Target, Transition};
