//! Guard Post With Interruptions
//!
//! This example demonstrates the "return to previous state" target.
//!
//! Key concepts:
//! - An interrupt state reachable from anywhere
//! - Returning to whatever the guard was doing before the interrupt
//! - Removing a transition from a live machine
//!
//! Run with: cargo run --example guard_post

use demeanor::builder::{from, from_any, StateMachineBuilder};
use demeanor::core::{Condition, State};
use demeanor::BuildError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Guard {
    tick: u32,
    noise: bool,
    investigated: u32,
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guard Post ===\n");

    let stand = State::builder("Stand").build();
    let patrol = State::builder("Patrol").build();
    let investigate = State::builder("Investigate")
        .on_enter(|g: &mut Guard| g.investigated += 1)
        .on_exit(|g: &mut Guard| g.noise = false)
        .build();

    let heard_noise = Condition::new(|g: &mut Guard| g.noise);
    let noise_rule = from_any()
        .except(&investigate)
        .to(&investigate)
        .condition(heard_noise.clone())
        .build()?;

    let mut machine = StateMachineBuilder::new()
        .owner(Guard::default())
        .initial(&stand)
        .name("guard-post")
        .add_transition(noise_rule.clone())
        .transition(
            from([&investigate])
                .to_previous()
                .when(|g: &mut Guard| g.tick % 3 == 0),
        )?
        .transition(from([&stand]).to(&patrol).when(|g: &mut Guard| g.tick % 5 == 0))?
        .transition(from([&patrol]).to(&stand).when(|g: &mut Guard| g.tick % 7 == 0))?
        .build()?;

    for tick in 1..=20 {
        let guard = machine.owner_mut();
        guard.tick = tick;
        guard.noise = guard.noise || tick == 6 || tick == 13;

        machine.update();
        println!(
            "Tick {:>2}: {:<11} (previous: {})",
            tick,
            machine.current_state().name(),
            machine.previous_state().map_or("-", |s| s.name())
        );

        if tick == 15 {
            println!("  (the guard stops listening for noises)");
            machine.remove_transition(&noise_rule);
        }
    }

    println!("\nInvestigations: {}", machine.owner().investigated);
    println!("Shared condition still usable: {:?}", heard_noise);

    println!("\n=== Example Complete ===");
    Ok(())
}
