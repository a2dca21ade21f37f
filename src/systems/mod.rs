//! ECS systems for the skirmish simulation.
//!
//! One tick is a single run of the schedule, with the phases chained in
//! decision order:
//!
//! 1. `targeting_system` - re-validates targets, acquires the nearest enemy
//! 2. `steering_system` - engage/pursue/path-follow/idle plus separation,
//!    accumulated into velocity and clamped to the faction speed
//! 3. `combat_system` - continuous per-tick damage drain while in range
//! 4. `movement_system` - integrates velocity, clamps to the world bounds
//! 5. `outcome_system` - live-faction count and the game-over transition
//!
//! All phases skip dead units; corpses stay entity-resident so target
//! handles never dangle.

pub mod combat;
pub mod movement;
pub mod outcome;
pub mod steering;
pub mod targeting;

pub use combat::*;
pub use movement::*;
pub use outcome::*;
pub use steering::*;
pub use targeting::*;
