//! Basic demonstration of the skirmish simulation.
//!
//! Run with: cargo run --example battle_demo

use skirmish_sim::{Outcome, SimConfig, SimWorld};

fn main() {
    println!("=== Skirmish Sim - Battle Demo ===\n");

    let mut sim = SimWorld::with_config(SimConfig {
        unit_count: 40,
        seed: 42,
    });

    println!("Initial state:");
    print_standings(&mut sim);

    // Send the player faction through the wall gap toward the far corner.
    println!("\n--- Ordering Aethel to (550, 550) ---\n");
    match sim.command_move_to(550.0, 550.0) {
        Ok(count) => println!("{count} units commanded"),
        Err(err) => println!("command failed: {err}"),
    }

    // Run until the match decides itself, reporting every 200 ticks.
    let cap = 20_000;
    for tick in 0..cap {
        sim.tick();

        if (tick + 1) % 200 == 0 {
            println!("--- Tick {} ---", sim.current_tick());
            print_standings(&mut sim);
        }

        if sim.is_game_over() {
            break;
        }
    }

    println!("\n=== Result after {} ticks ===", sim.current_tick());
    match sim.outcome() {
        Some(Outcome::Victory { winner }) => println!("{} wins!", winner.name()),
        Some(Outcome::Draw) => println!("Mutual annihilation: draw."),
        None => println!("Still undecided after {cap} ticks."),
    }

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => println!("snapshot failed: {err}"),
    }
}

fn print_standings(sim: &mut SimWorld) {
    for standing in sim.standings() {
        println!(
            "  {:<8} {:>2} alive",
            standing.faction.name(),
            standing.live_count
        );
    }
}
