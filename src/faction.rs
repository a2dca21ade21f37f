//! Faction identity and the static per-faction parameter table.
//!
//! Four factions contest the field. `Aethel` takes player path commands; the
//! other three are fully autonomous. Teams only label who the player controls:
//! every faction is hostile to every other faction, including the other
//! "Enemy"-team factions.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Engagement range shared by all factions, in world units.
pub const ATTACK_RANGE: f32 = 70.0;

/// Body radius shared by all units, in world units.
pub const UNIT_RADIUS: f32 = 8.0;

/// Distance of each spawn anchor from its corner.
pub const SPAWN_OFFSET: f32 = 50.0;

/// Full width of the uniform jitter box around each spawn anchor.
pub const SPAWN_JITTER: f32 = 40.0;

/// Faction identifier.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum FactionId {
    #[default]
    Aethel,
    Borean,
    Cygnus,
    Drakon,
}

/// Side marker: `Player` factions receive path commands, `Enemy` factions do
/// not. Hostility is faction-vs-faction regardless of team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Static parameters for one faction.
#[derive(Debug, Clone, Copy)]
pub struct FactionConfig {
    /// Display color, hex CSS notation, passed verbatim to the render surface.
    pub color: &'static str,
    pub max_health: f32,
    pub damage_per_tick: f32,
    /// Maximum speed in world units per tick.
    pub speed: f32,
    pub team: Team,
}

impl FactionId {
    /// All factions, in stats-display order.
    pub const ALL: [FactionId; 4] = [
        FactionId::Aethel,
        FactionId::Borean,
        FactionId::Cygnus,
        FactionId::Drakon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FactionId::Aethel => "Aethel",
            FactionId::Borean => "Borean",
            FactionId::Cygnus => "Cygnus",
            FactionId::Drakon => "Drakon",
        }
    }

    pub fn config(&self) -> FactionConfig {
        match self {
            FactionId::Aethel => FactionConfig {
                color: "#10b981",
                max_health: 80.0,
                damage_per_tick: 0.6,
                speed: 2.5,
                team: Team::Player,
            },
            FactionId::Borean => FactionConfig {
                color: "#ef4444",
                max_health: 120.0,
                damage_per_tick: 0.4,
                speed: 1.5,
                team: Team::Enemy,
            },
            FactionId::Cygnus => FactionConfig {
                color: "#3b82f6",
                max_health: 100.0,
                damage_per_tick: 0.5,
                speed: 2.0,
                team: Team::Enemy,
            },
            FactionId::Drakon => FactionConfig {
                color: "#fcd34d",
                max_health: 70.0,
                damage_per_tick: 0.7,
                speed: 2.2,
                team: Team::Enemy,
            },
        }
    }

    pub fn is_player(&self) -> bool {
        self.config().team == Team::Player
    }

    pub fn is_hostile_to(&self, other: FactionId) -> bool {
        *self != other
    }
}

/// Spawn anchors, one corner per faction, in spawn order.
/// `world_size` is the square world edge length.
pub fn spawn_anchors(world_size: f32) -> [(FactionId, f32, f32); 4] {
    [
        (FactionId::Aethel, SPAWN_OFFSET, SPAWN_OFFSET),
        (FactionId::Cygnus, world_size - SPAWN_OFFSET, SPAWN_OFFSET),
        (
            FactionId::Borean,
            world_size - SPAWN_OFFSET,
            world_size - SPAWN_OFFSET,
        ),
        (FactionId::Drakon, SPAWN_OFFSET, world_size - SPAWN_OFFSET),
    ]
}
