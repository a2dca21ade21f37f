//! Steering: the per-tick decision ladder and force accumulation.
//!
//! First applicable branch wins: a unit engaged with an in-range target stops
//! dead (combat preempts navigation), a unit with an out-of-range target
//! pursues it, a unit with a path seeks its current waypoint, and otherwise
//! the unit idles. Separation applies in every branch so crowds fan out.
//! Accumulated steering is added to velocity and clamped to the faction's
//! maximum speed.

use crate::components::*;
use crate::map::{GridMap, CELL_SIZE};
use bevy_ecs::prelude::*;

/// Radius within which other bodies push a unit away.
pub const SEPARATION_RADIUS: f32 = 30.0;

/// Base separation force scale; applied doubled for visible crowd spacing.
pub const SEPARATION_FORCE: f32 = 0.05;

/// Arrival threshold for waypoints: half a cell width.
const WAYPOINT_ARRIVE: f32 = CELL_SIZE * 0.5;

/// System that accumulates steering forces and updates velocity and paths.
///
/// ## Data Access
/// - Reads: Position, Health, UnitStats, Target
/// - Writes: Velocity, PathFollow
pub fn steering_system(
    mut query: Query<(
        Entity,
        &Position,
        &Health,
        &UnitStats,
        &Target,
        &mut Velocity,
        &mut PathFollow,
    )>,
) {
    // Body snapshot: dead units keep their resting place and still repel.
    let bodies: Vec<(Entity, Position)> = query
        .iter()
        .map(|(entity, pos, ..)| (entity, *pos))
        .collect();
    let position_of = |handle: Entity| {
        bodies
            .iter()
            .find(|(entity, _)| *entity == handle)
            .map(|(_, pos)| *pos)
    };

    for (entity, pos, health, stats, target, mut vel, mut path) in query.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        let mut steer = Velocity::zero();

        if let Some(target_pos) = target.0.and_then(position_of) {
            // Combat pursuit overrides navigation in both branches.
            if pos.distance_to(&target_pos) <= stats.attack_range {
                *vel = Velocity::zero();
                path.clear();
            } else {
                let seek = seek_force(pos, &target_pos, stats.speed, &vel);
                steer.vx += seek.vx;
                steer.vy += seek.vy;
                path.clear();
            }
        } else if let Some(waypoint) = path.current() {
            let (cx, cy) = GridMap::cell_center(waypoint);
            let center = Position::new(cx, cy);
            let seek = seek_force(pos, &center, stats.speed, &vel);
            steer.vx += seek.vx;
            steer.vy += seek.vy;

            if pos.distance_to(&center) < WAYPOINT_ARRIVE {
                path.advance();
            }
        }

        let (sep_x, sep_y) = separation(entity, pos, &bodies);
        steer.vx += sep_x * SEPARATION_FORCE * 2.0;
        steer.vy += sep_y * SEPARATION_FORCE * 2.0;

        *vel = Velocity::new(vel.vx + steer.vx, vel.vy + steer.vy).clamped(stats.speed);
    }
}

/// Classic seek: desired velocity toward the goal at full speed, minus the
/// current velocity.
fn seek_force(pos: &Position, goal: &Position, max_speed: f32, vel: &Velocity) -> Velocity {
    let (dx, dy) = pos.offset_to(goal);
    let desired = Velocity::new(dx, dy).normalized();
    Velocity::new(
        desired.vx * max_speed - vel.vx,
        desired.vy * max_speed - vel.vy,
    )
}

/// Push-away force from every body within [`SEPARATION_RADIUS`], weighted
/// `1/d` so near neighbors dominate. Coincident bodies contribute nothing.
fn separation(this: Entity, pos: &Position, bodies: &[(Entity, Position)]) -> (f32, f32) {
    let mut fx = 0.0;
    let mut fy = 0.0;

    for (entity, other) in bodies {
        if *entity == this {
            continue;
        }
        let distance = pos.distance_to(other);
        if distance < SEPARATION_RADIUS && distance > 1e-4 {
            let away = Velocity::new(pos.x - other.x, pos.y - other.y).normalized();
            fx += away.vx / distance;
            fy += away.vy / distance;
        }
    }
    (fx, fy)
}
