//! Public simulation facade.
//!
//! `SimWorld` owns the ECS world and the tick schedule, spawns the four
//! starting rosters, and exposes the whole external surface: ticking,
//! player move commands, standings, snapshots, rendering, and reset.

use crate::components::*;
use crate::draw::{render_frame, Surface};
use crate::faction::{spawn_anchors, FactionId, SPAWN_JITTER};
use crate::map::{GridMap, WORLD_SIZE};
use crate::pathfinding::find_path;
use crate::systems::outcome::{MatchState, Outcome};
use crate::systems::{
    combat_system, movement_system, outcome_system, steering_system, targeting_system,
};
use crate::world::{standings_from_world, FactionStanding, Snapshot};
use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors from player commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The clicked destination is outside the grid, inside an obstacle, or
    /// unreachable from every commanded unit's cell.
    #[error("no walkable path to ({x:.0}, {y:.0})")]
    PathNotFound { x: f32, y: f32 },
}

/// Simulation parameters fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Total units across all factions, split evenly four ways.
    pub unit_count: usize,
    /// Seed for spawn jitter. Equal seeds give identical battles.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            unit_count: 40,
            seed: 0,
        }
    }
}

/// The simulation: an ECS world plus the fixed tick schedule.
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    config: SimConfig,
    ticks: u64,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    pub fn with_config(config: SimConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(GridMap::with_center_wall());
        world.insert_resource(MatchState::default());

        spawn_units(&mut world, &config);

        // Tick order: acquire targets, steer, fight, move, then check for
        // a decided match.
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                targeting_system,
                steering_system,
                combat_system,
                movement_system,
                outcome_system,
            )
                .chain(),
        );

        tracing::debug!(
            unit_count = config.unit_count,
            seed = config.seed,
            "simulation initialized"
        );

        Self {
            world,
            schedule,
            config,
            ticks: 0,
        }
    }

    /// Advance the simulation by one tick. Ticking past the end of the match
    /// is allowed and does nothing; the terminal state is latched.
    pub fn tick(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.schedule.run(&mut self.world);
        self.ticks += 1;
    }

    /// Advance by `n` ticks.
    pub fn run_ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.ticks
    }

    /// Tear the battle down and rebuild it from the same config. With equal
    /// seeds the rebuilt battle replays identically.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    pub fn is_game_over(&self) -> bool {
        self.world.resource::<MatchState>().is_over()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.world.resource::<MatchState>().outcome()
    }

    /// Per-faction live counts, sorted descending.
    pub fn standings(&mut self) -> Vec<FactionStanding> {
        standings_from_world(&mut self.world)
    }

    /// Full serializable state snapshot for the current tick.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.ticks)
    }

    /// Render the current frame to a client-provided surface.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        render_frame(&mut self.world, surface);
    }

    /// Player move command: route every live player unit toward the clicked
    /// world position.
    ///
    /// One path is computed from a live player unit's cell and assigned to
    /// the whole roster; the units follow the same route and fan out under
    /// separation rather than stack. Targets are cleared so the order takes
    /// effect immediately. Returns the number of units commanded. `Ok(0)`
    /// means the command was valid but there was nobody to carry it out
    /// (match over, or no player unit alive).
    pub fn command_move_to(&mut self, x: f32, y: f32) -> Result<usize, CommandError> {
        if self.is_game_over() {
            return Ok(0);
        }

        let dest = GridMap::world_to_grid(x, y);
        if !self.world.resource::<GridMap>().is_walkable(dest) {
            return Err(CommandError::PathNotFound { x, y });
        }

        let mut troops: Vec<(Entity, Position)> = Vec::new();
        {
            let mut query = self.world.query::<(Entity, &FactionId, &Position, &Health)>();
            for (entity, faction, pos, health) in query.iter(&self.world) {
                if faction.is_player() && health.is_alive() {
                    troops.push((entity, *pos));
                }
            }
        }
        let Some((_, lead_pos)) = troops.first() else {
            return Ok(0);
        };

        let start = GridMap::world_to_grid(lead_pos.x, lead_pos.y);
        let path = find_path(self.world.resource::<GridMap>(), start, dest);
        if path.is_empty() {
            return Err(CommandError::PathNotFound { x, y });
        }

        let commanded = troops.len();
        for (entity, _) in troops {
            if let Some(mut follow) = self.world.get_mut::<PathFollow>(entity) {
                follow.assign(path.clone());
            }
            if let Some(mut target) = self.world.get_mut::<Target>(entity) {
                target.clear();
            }
        }

        tracing::debug!(x, y, commanded, "move command issued");
        Ok(commanded)
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn `unit_count` units split evenly across the four factions, each
/// jittered uniformly around its faction's corner anchor.
fn spawn_units(world: &mut World, config: &SimConfig) {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let per_faction = config.unit_count / FactionId::ALL.len();

    for (faction, anchor_x, anchor_y) in spawn_anchors(WORLD_SIZE) {
        for _ in 0..per_faction {
            let x = anchor_x + (rng.gen::<f32>() - 0.5) * SPAWN_JITTER;
            let y = anchor_y + (rng.gen::<f32>() - 0.5) * SPAWN_JITTER;
            world.spawn(UnitBundle::new(faction, x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_roster() {
        let mut sim = SimWorld::new();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.units.len(), 40);

        for faction in FactionId::ALL {
            let count = snapshot
                .units
                .iter()
                .filter(|u| u.faction == faction)
                .count();
            assert_eq!(count, 10, "{} roster", faction.name());
        }

        // Everyone spawns at full health near their corner anchor.
        for unit in &snapshot.units {
            assert_eq!(unit.health, unit.health_max);
            let anchors = spawn_anchors(WORLD_SIZE);
            let (_, ax, ay) = anchors
                .iter()
                .find(|(f, _, _)| *f == unit.faction)
                .copied()
                .unwrap();
            assert!((unit.x - ax).abs() <= SPAWN_JITTER / 2.0 + 1e-3);
            assert!((unit.y - ay).abs() <= SPAWN_JITTER / 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_battle() {
        let config = SimConfig {
            unit_count: 40,
            seed: 7,
        };
        let mut a = SimWorld::with_config(config);
        let mut b = SimWorld::with_config(config);

        a.run_ticks(200);
        b.run_ticks(200);

        let snap_a = a.snapshot().to_json().unwrap();
        let snap_b = b.snapshot().to_json().unwrap();
        assert_eq!(snap_a, snap_b);
    }

    #[test]
    fn test_move_command_assigns_paths_and_clears_targets() {
        let mut sim = SimWorld::new();

        // Let targeting pick targets first, then countermand it.
        sim.tick();
        let commanded = sim.command_move_to(300.0, 50.0).unwrap();
        assert_eq!(commanded, 10);

        let mut query = sim
            .world
            .query::<(&FactionId, &Target, &PathFollow)>();
        let mut shared_route: Option<Vec<_>> = None;
        for (faction, target, path) in query.iter(&sim.world) {
            if faction.is_player() {
                assert!(target.0.is_none());
                assert!(path.is_active());
                // Every player unit follows the same route.
                match &shared_route {
                    Some(route) => assert_eq!(route, &path.waypoints),
                    None => shared_route = Some(path.waypoints.clone()),
                }
            } else {
                assert!(!path.is_active(), "only player units take commands");
            }
        }
    }

    #[test]
    fn test_move_command_to_obstacle_fails() {
        let mut sim = SimWorld::new();
        // Center wall cell: column 10, row 15 -> world (210, 310).
        let err = sim.command_move_to(210.0, 310.0).unwrap_err();
        assert_eq!(
            err,
            CommandError::PathNotFound {
                x: 210.0,
                y: 310.0
            }
        );
    }

    #[test]
    fn test_move_command_out_of_bounds_fails() {
        let mut sim = SimWorld::new();
        assert!(sim.command_move_to(-10.0, 300.0).is_err());
        assert!(sim.command_move_to(300.0, 900.0).is_err());
    }

    #[test]
    fn test_move_command_after_game_over_is_a_noop() {
        let mut sim = SimWorld::new();
        {
            let mut query = sim.world.query::<(&FactionId, &mut Health)>();
            for (faction, mut health) in query.iter_mut(&mut sim.world) {
                if *faction != FactionId::Borean {
                    health.current = 0.0;
                }
            }
        }
        sim.tick();
        assert!(sim.is_game_over());
        assert_eq!(sim.command_move_to(300.0, 50.0), Ok(0));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut sim = SimWorld::with_config(SimConfig {
            unit_count: 40,
            seed: 3,
        });
        let initial = sim.snapshot().to_json().unwrap();

        sim.run_ticks(150);
        assert_ne!(sim.snapshot().to_json().unwrap(), initial);

        sim.reset();
        assert_eq!(sim.current_tick(), 0);
        assert_eq!(sim.snapshot().to_json().unwrap(), initial);
    }

    #[test]
    fn test_battle_reaches_termination() {
        let mut sim = SimWorld::with_config(SimConfig {
            unit_count: 40,
            seed: 11,
        });

        // Mutual pursuit drains the field well within this cap.
        let cap = 20_000;
        for _ in 0..cap {
            sim.tick();
            if sim.is_game_over() {
                break;
            }
        }

        assert!(sim.is_game_over(), "battle still running after {cap} ticks");
        match sim.outcome() {
            Some(Outcome::Victory { winner }) => {
                let standings = sim.standings();
                assert_eq!(standings[0].faction, winner);
                assert!(standings[0].live_count > 0);
                for standing in &standings[1..] {
                    assert_eq!(standing.live_count, 0);
                }
            }
            Some(Outcome::Draw) => {
                assert!(sim.standings().iter().all(|s| s.live_count == 0));
            }
            None => unreachable!(),
        }
    }

    #[test]
    fn test_standings_order_is_descending() {
        let mut sim = SimWorld::new();
        sim.run_ticks(500);
        let standings = sim.standings();
        assert_eq!(standings.len(), 4);
        for pair in standings.windows(2) {
            assert!(pair[0].live_count >= pair[1].live_count);
        }
    }
}
