//! Frame rendering against an abstract 2D surface.
//!
//! The core never touches a real canvas: clients hand in anything that
//! implements [`Surface`] and receive the frame as a sequence of rectangle
//! and circle calls in screen space. Colors are CSS hex strings, faction
//! colors verbatim from the faction table.

use crate::components::*;
use crate::faction::FactionId;
use crate::map::{GridMap, CELL_SIZE, WORLD_SIZE};
use bevy_ecs::prelude::*;

const BACKGROUND_COLOR: &str = "#ffffff";
const OBSTACLE_COLOR: &str = "#a0aec0";
const OUTLINE_COLOR: &str = "#333";
const BAR_BACK_COLOR: &str = "#cccccc";
const BAR_HIGH_COLOR: &str = "#22c55e";
const BAR_MID_COLOR: &str = "#facc15";
const BAR_LOW_COLOR: &str = "#ef4444";
const RANGE_RING_COLOR: &str = "#ef444455";

const BAR_HEIGHT: f32 = 4.0;

/// Abstract 2D drawing surface. Coordinates are world units, which map 1:1
/// to pixels on a 600×600 canvas.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str);
    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, line_width: f32);
}

/// Draw one full frame: map first, then every live unit with its health bar
/// and, when its target is close, an attack-range ring. Dead units draw
/// nothing.
pub fn render_frame(world: &mut World, surface: &mut dyn Surface) {
    surface.fill_rect(0.0, 0.0, WORLD_SIZE, WORLD_SIZE, BACKGROUND_COLOR);

    if let Some(map) = world.get_resource::<GridMap>() {
        for cell in map.obstacle_cells() {
            surface.fill_rect(
                cell.i as f32 * CELL_SIZE,
                cell.j as f32 * CELL_SIZE,
                CELL_SIZE,
                CELL_SIZE,
                OBSTACLE_COLOR,
            );
        }
    }

    // Snapshot for target lookups while iterating.
    let mut query = world.query::<(Entity, &Position, &Health)>();
    let bodies: Vec<(Entity, Position, bool)> = query
        .iter(world)
        .map(|(entity, pos, health)| (entity, *pos, health.is_alive()))
        .collect();

    let mut query =
        world.query::<(&FactionId, &Position, &Health, &UnitStats, &Target)>();
    for (faction, pos, health, stats, target) in query.iter(world) {
        if !health.is_alive() {
            continue;
        }

        surface.fill_circle(pos.x, pos.y, stats.radius, faction.config().color);
        surface.stroke_circle(pos.x, pos.y, stats.radius, OUTLINE_COLOR, 1.0);

        draw_health_bar(surface, pos, health, stats);

        let engaged_nearby = target.0.and_then(|handle| {
            bodies
                .iter()
                .find(|(entity, _, alive)| *entity == handle && *alive)
                .map(|(_, target_pos, _)| pos.distance_to(target_pos))
        });
        if engaged_nearby.is_some_and(|dist| dist <= stats.attack_range * 1.5) {
            surface.stroke_circle(pos.x, pos.y, stats.attack_range, RANGE_RING_COLOR, 2.0);
        }
    }
}

/// Three-part bar above the body: gray back, colored fill proportional to
/// remaining health, thin border.
fn draw_health_bar(surface: &mut dyn Surface, pos: &Position, health: &Health, stats: &UnitStats) {
    let bar_width = stats.radius * 3.0;
    let ratio = health.fraction();
    let x = pos.x - bar_width / 2.0;
    let y = pos.y - stats.radius - BAR_HEIGHT - 4.0;

    surface.fill_rect(x, y, bar_width, BAR_HEIGHT, BAR_BACK_COLOR);

    let fill_color = if ratio > 0.5 {
        BAR_HIGH_COLOR
    } else if ratio > 0.2 {
        BAR_MID_COLOR
    } else {
        BAR_LOW_COLOR
    };
    surface.fill_rect(x, y, bar_width * ratio, BAR_HEIGHT, fill_color);

    surface.stroke_rect(x, y, bar_width, BAR_HEIGHT, OUTLINE_COLOR, 0.5);
}
