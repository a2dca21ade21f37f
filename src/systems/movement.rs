//! Movement: velocity integration and the hard world boundary.

use crate::components::*;
use crate::map::WORLD_SIZE;
use bevy_ecs::prelude::*;

/// System that applies velocity to position, one step per tick, then clamps
/// the position so the unit's body stays fully inside the world.
///
/// ## Data Access
/// - Reads: Health, UnitStats, Velocity
/// - Writes: Position
pub fn movement_system(mut query: Query<(&Health, &UnitStats, &Velocity, &mut Position)>) {
    for (health, stats, vel, mut pos) in query.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        pos.x = (pos.x + vel.vx).clamp(stats.radius, WORLD_SIZE - stats.radius);
        pos.y = (pos.y + vel.vy).clamp(stats.radius, WORLD_SIZE - stats.radius);
    }
}
