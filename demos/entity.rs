//! Idle / Walk / Talk Entity
//!
//! This example drives a single game entity through a small behavior loop.
//!
//! Key concepts:
//! - Shared states built once at startup
//! - Catch-all transition with exceptions ("any except Idle and Talk")
//! - First-match priority in registration order
//! - Hooks that mutate the owner (walking, counting phrases)
//!
//! Run with: RUST_LOG=demeanor=debug cargo run --example entity

use demeanor::builder::{from, from_any};
use demeanor::core::State;
use demeanor::{BuildError, MachineConfig, StateMachine};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Entity {
    target: Option<&'static str>,
    distance_to_target: f32,
    phrases_left: u32,
}

impl Entity {
    fn acquire(&mut self, target: &'static str) {
        self.target = Some(target);
        self.distance_to_target = 15.0;
    }

    fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn in_range(&self) -> bool {
        self.distance_to_target <= 0.01
    }
}

struct EntityStates {
    idle: Arc<State<Entity>>,
    walk: Arc<State<Entity>>,
    talk: Arc<State<Entity>>,
}

fn entity_states() -> EntityStates {
    EntityStates {
        idle: State::builder("Idle")
            .on_update(|_: &mut Entity| println!("  [Idle] looking for a target"))
            .build(),
        walk: State::builder("Walk")
            .on_update(|e: &mut Entity| {
                e.distance_to_target -= 2.0;
                println!("  [Walk] {:.1} units to go", e.distance_to_target.max(0.0));
            })
            .build(),
        talk: State::builder("Talk")
            .on_enter(|e: &mut Entity| e.phrases_left = 10)
            .on_update(|e: &mut Entity| {
                e.phrases_left -= 1;
                println!("  [Talk] {} phrases left", e.phrases_left);
            })
            .build(),
    }
}

fn build_machine(states: &EntityStates) -> Result<StateMachine<Entity>, BuildError> {
    let mut machine = StateMachine::with_config(
        Entity::default(),
        &states.idle,
        MachineConfig::named("villager"),
    );

    machine.add_transitions([
        from_any()
            .except_all([&states.idle, &states.talk])
            .to(&states.idle)
            .when(|e: &mut Entity| !e.has_target())
            .build()?,
        from([&states.idle])
            .to(&states.walk)
            .when(|e: &mut Entity| e.has_target())
            .build()?,
        from([&states.walk])
            .to(&states.talk)
            .when(|e: &mut Entity| e.in_range())
            .build()?,
        from([&states.talk])
            .to(&states.idle)
            .when(|e: &mut Entity| e.phrases_left == 0)
            .build()?,
    ]);

    Ok(machine)
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Idle / Walk / Talk Entity ===\n");

    let states = entity_states();
    let mut machine = build_machine(&states)?;

    for tick in 1..=24 {
        if tick == 3 {
            println!("  (a traveller appears)");
            machine.owner_mut().acquire("traveller");
        }
        println!("Tick {:>2}: {}", tick, machine.current_state().name());
        machine.update();
    }

    println!("\nVisited: {}", machine.history().path().join(" -> "));
    println!("Current state: {}", machine.current_state().name());

    println!("\n=== Example Complete ===");
    Ok(())
}
