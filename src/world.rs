//! Serializable views of the simulation state.
//!
//! `Snapshot` is the full external view of a tick: every unit's kinematics
//! and health, the faction standings, and the match outcome once decided.
//! Clients render or log from snapshots; the ECS world itself never leaves
//! the crate.

use crate::components::*;
use crate::faction::FactionId;
use crate::systems::outcome::{MatchState, Outcome};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// One unit's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub faction: FactionId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub health: f32,
    pub health_max: f32,
}

/// Live population of one faction, for external stats display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionStanding {
    pub faction: FactionId,
    /// Display color, verbatim from the faction table.
    pub color: String,
    pub live_count: usize,
}

/// Complete simulation state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick the snapshot was taken at.
    pub tick: u64,
    /// All units, dead ones included (render clients skip them).
    pub units: Vec<UnitSnapshot>,
    /// Per-faction live counts, sorted descending.
    pub standings: Vec<FactionStanding>,
    /// Set once the match has ended.
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    /// Capture a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64) -> Self {
        let mut units = Vec::new();
        let mut query = world.query::<(&FactionId, &Position, &Velocity, &Health)>();
        for (faction, pos, vel, health) in query.iter(world) {
            units.push(UnitSnapshot {
                faction: *faction,
                x: pos.x,
                y: pos.y,
                vx: vel.vx,
                vy: vel.vy,
                health: health.current,
                health_max: health.max,
            });
        }

        Self {
            tick,
            units,
            standings: standings_from_world(world),
            outcome: world
                .get_resource::<MatchState>()
                .and_then(|state| state.outcome()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Live counts for all four factions, sorted descending by count. Factions
/// wiped to zero stay listed; ties keep table order.
pub fn standings_from_world(world: &mut World) -> Vec<FactionStanding> {
    let mut counts = [0usize; FactionId::ALL.len()];
    let mut query = world.query::<(&FactionId, &Health)>();
    for (faction, health) in query.iter(world) {
        if health.is_alive() {
            let slot = FactionId::ALL
                .iter()
                .position(|f| f == faction)
                .unwrap_or(0);
            counts[slot] += 1;
        }
    }

    let mut standings: Vec<FactionStanding> = FactionId::ALL
        .iter()
        .zip(counts)
        .map(|(faction, live_count)| FactionStanding {
            faction: *faction,
            color: faction.config().color.to_string(),
            live_count,
        })
        .collect();
    standings.sort_by(|a, b| b.live_count.cmp(&a.live_count));
    standings
}
