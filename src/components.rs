//! ECS components for the skirmish simulation.
//!
//! Components are pure data containers attached to unit entities.
//! All behavior lives in the systems that query them.

use crate::faction::FactionId;
use crate::map::GridCell;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// KINEMATIC COMPONENTS
// ============================================================================

/// 2D world position (x = east/west, y = north/south).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Vector from `self` toward `other`.
    pub fn offset_to(&self, other: &Position) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }
}

/// 2D velocity, applied once per tick by the movement system.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn magnitude(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Unit-length copy; a zero-length vector normalizes to zero.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-4 {
            Self::default()
        } else {
            Self {
                vx: self.vx / mag,
                vy: self.vy / mag,
            }
        }
    }

    /// Clamp magnitude to `max`, preserving direction.
    pub fn clamped(&self, max: f32) -> Self {
        if self.magnitude() > max {
            let n = self.normalized();
            Self {
                vx: n.vx * max,
                vy: n.vy * max,
            }
        } else {
            *self
        }
    }
}

// ============================================================================
// COMBAT COMPONENTS
// ============================================================================

/// Health of a unit. A unit at zero is dead and inert; it is never despawned,
/// so entity references to it stay valid for lookups.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply damage, clamping at zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Per-unit combat and movement parameters, derived from the faction table
/// at spawn time.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitStats {
    /// Maximum speed in world units per tick.
    pub speed: f32,
    /// Health drained from the target every tick spent in range.
    pub damage_per_tick: f32,
    /// Engagement range in world units.
    pub attack_range: f32,
    /// Body radius, used for separation and boundary clamping.
    pub radius: f32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            speed: 2.0,
            damage_per_tick: 0.5,
            attack_range: crate::faction::ATTACK_RANGE,
            radius: crate::faction::UNIT_RADIUS,
        }
    }
}

// ============================================================================
// TARGETING / NAVIGATION COMPONENTS
// ============================================================================

/// Weak reference to the unit currently being chased or attacked.
///
/// The referenced entity is never despawned, only marked dead, so the handle
/// cannot dangle — but it must be re-validated every tick because the target
/// may have died since it was adopted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Target(pub Option<Entity>);

impl Target {
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Waypoint sequence assigned by a player path command.
///
/// `index` always stays within `[0, waypoints.len())`; the whole path is
/// cleared once exhausted or when combat preempts navigation.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollow {
    pub waypoints: Vec<GridCell>,
    pub index: usize,
}

impl PathFollow {
    pub fn assign(&mut self, waypoints: Vec<GridCell>) {
        self.waypoints = waypoints;
        self.index = 0;
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.index = 0;
    }

    pub fn is_active(&self) -> bool {
        !self.waypoints.is_empty()
    }

    pub fn current(&self) -> Option<GridCell> {
        self.waypoints.get(self.index).copied()
    }

    /// Step to the next waypoint; clears the path when the last one is reached.
    pub fn advance(&mut self) {
        self.index += 1;
        if self.index >= self.waypoints.len() {
            self.clear();
        }
    }
}

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning a complete unit entity.
#[derive(Bundle, Default)]
pub struct UnitBundle {
    pub faction: FactionId,
    pub position: Position,
    pub velocity: Velocity,
    pub health: Health,
    pub stats: UnitStats,
    pub target: Target,
    pub path: PathFollow,
}

impl UnitBundle {
    /// Build a unit at a position with parameters from the faction table.
    pub fn new(faction: FactionId, x: f32, y: f32) -> Self {
        let config = faction.config();
        Self {
            faction,
            position: Position::new(x, y),
            velocity: Velocity::zero(),
            health: Health::new(config.max_health),
            stats: UnitStats {
                speed: config.speed,
                damage_per_tick: config.damage_per_tick,
                attack_range: crate::faction::ATTACK_RANGE,
                radius: crate::faction::UNIT_RADIUS,
            },
            target: Target::default(),
            path: PathFollow::default(),
        }
    }
}
