//! Combat: a continuous per-tick damage drain between engaged units.
//!
//! There are no discrete attacks or cooldowns: every tick an attacker spends
//! with its target inside attack range drains exactly `damage_per_tick` from
//! the target's health. Damage is gathered into a map first and applied
//! afterwards, so intra-tick iteration order cannot decide who lands a
//! killing blow.

use crate::components::*;
use bevy_ecs::prelude::*;
use std::collections::HashMap;

/// System that resolves engagements and applies damage.
///
/// ## Data Access
/// - Reads: Position, UnitStats, Target
/// - Writes: Health
pub fn combat_system(
    mut query: Query<(Entity, &Position, &UnitStats, &Target, &mut Health)>,
) {
    // Gather phase: read-only pass accumulating damage per defender.
    let mut incoming: HashMap<Entity, f32> = HashMap::new();

    let snapshot: Vec<(Entity, Position, bool)> = query
        .iter()
        .map(|(entity, pos, _, _, health)| (entity, *pos, health.is_alive()))
        .collect();
    let lookup = |handle: Entity| {
        snapshot
            .iter()
            .find(|(entity, _, _)| *entity == handle)
            .map(|(_, pos, alive)| (*pos, *alive))
    };

    for (_, pos, stats, target, health) in query.iter() {
        if !health.is_alive() {
            continue;
        }
        let Some(handle) = target.0 else { continue };
        let Some((target_pos, target_alive)) = lookup(handle) else {
            continue;
        };
        if !target_alive {
            continue;
        }
        if pos.distance_to(&target_pos) <= stats.attack_range {
            *incoming.entry(handle).or_insert(0.0) += stats.damage_per_tick;
        }
    }

    // Apply phase: drain health, clamped at zero.
    for (entity, _, _, _, mut health) in query.iter_mut() {
        if let Some(&amount) = incoming.get(&entity) {
            health.damage(amount);
        }
    }
}
