//! Core building blocks of the engine.
//!
//! - States with their enter/update/exit hooks via [`State`]
//! - Identity-compared predicates via [`Condition`]
//! - A bounded, diagnostic log of state changes via [`TransitionLog`]
//!
//! Nothing in this module knows about transitions or machines.

mod condition;
mod history;
mod state;

pub use condition::Condition;
pub use history::{TransitionLog, TransitionRecord};
pub use state::{Hook, State, StateBuilder, StateId};
