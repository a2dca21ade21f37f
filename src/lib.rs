//! # Skirmish Sim
//!
//! A four-faction real-time skirmish simulation on a 30×30 walkability grid.
//! Units steer, separate, pursue the nearest enemy, and drain each other's
//! health every tick spent in range; the player faction additionally takes
//! click-to-move commands routed with A*.
//!
//! ## Quick start
//!
//! ```
//! use skirmish_sim::{SimConfig, SimWorld};
//!
//! let mut sim = SimWorld::with_config(SimConfig { unit_count: 40, seed: 42 });
//! sim.command_move_to(300.0, 50.0).ok();
//! sim.run_ticks(100);
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.units.len(), 40);
//! ```

pub mod api;
pub mod components;
pub mod draw;
pub mod faction;
pub mod map;
pub mod pathfinding;
pub mod systems;
pub mod world;

pub use api::{CommandError, SimConfig, SimWorld};
pub use components::{Health, PathFollow, Position, Target, UnitBundle, UnitStats, Velocity};
pub use draw::Surface;
pub use faction::{FactionId, Team};
pub use map::{GridCell, GridMap, CELL_SIZE, GRID_SIZE, WORLD_SIZE};
pub use pathfinding::find_path;
pub use systems::outcome::{MatchState, Outcome};
pub use world::{FactionStanding, Snapshot, UnitSnapshot};
