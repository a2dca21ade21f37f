//! Target selection for autonomous units.
//!
//! Targets are sticky: a unit keeps its current target for as long as that
//! target is alive and hostile, even when a closer enemy walks by. Only when
//! the target dies (or was never set) does the unit scan the roster for the
//! nearest live enemy by straight-line distance.

use crate::components::*;
use crate::faction::FactionId;
use bevy_ecs::prelude::*;

/// System that re-validates every unit's target and re-acquires when needed.
///
/// ## Data Access
/// - Reads: Position, FactionId, Health
/// - Writes: Target
pub fn targeting_system(
    roster: Query<(Entity, &Position, &FactionId, &Health)>,
    mut hunters: Query<(Entity, &Position, &FactionId, &Health, &mut Target)>,
) {
    // Roster snapshot for validation and nearest-enemy scans.
    let units: Vec<(Entity, Position, FactionId, bool)> = roster
        .iter()
        .map(|(entity, pos, faction, health)| (entity, *pos, *faction, health.is_alive()))
        .collect();

    for (entity, pos, faction, health, mut target) in hunters.iter_mut() {
        if !health.is_alive() {
            target.clear();
            continue;
        }

        let still_viable = target.0.is_some_and(|handle| {
            units
                .iter()
                .any(|(e, _, f, alive)| *e == handle && *alive && f.is_hostile_to(*faction))
        });
        if still_viable {
            continue;
        }

        target.0 = nearest_enemy(entity, pos, *faction, &units);
    }
}

/// Nearest live hostile unit by Euclidean distance, if any remain.
fn nearest_enemy(
    this: Entity,
    pos: &Position,
    faction: FactionId,
    units: &[(Entity, Position, FactionId, bool)],
) -> Option<Entity> {
    let mut nearest = None;
    let mut min_distance = f32::INFINITY;

    for (entity, other_pos, other_faction, alive) in units {
        if *entity == this || !alive || !other_faction.is_hostile_to(faction) {
            continue;
        }
        let distance = pos.distance_to(other_pos);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(*entity);
        }
    }
    nearest
}
