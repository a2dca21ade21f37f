//! Termination check: the match ends when at most one faction still stands.
//!
//! The check runs every tick because a single tick can eliminate several
//! units, including the last units of two different factions at once.

use crate::components::Health;
use crate::faction::FactionId;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one faction survived.
    Victory { winner: FactionId },
    /// Simultaneous mutual annihilation: nobody survived.
    Draw,
}

/// Match state resource. The only transition is `Running -> GameOver`;
/// returning to `Running` requires an external reset, which rebuilds the
/// whole world.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub enum MatchState {
    #[default]
    Running,
    GameOver(Outcome),
}

impl MatchState {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchState::GameOver(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            MatchState::Running => None,
            MatchState::GameOver(outcome) => Some(*outcome),
        }
    }
}

/// System that counts live factions and ends the match at ≤ 1.
///
/// ## Data Access
/// - Reads: FactionId, Health
/// - Writes: MatchState
pub fn outcome_system(
    mut state: ResMut<MatchState>,
    query: Query<(&FactionId, &Health)>,
) {
    if state.is_over() {
        return;
    }

    let mut live: HashSet<FactionId> = HashSet::new();
    for (faction, health) in query.iter() {
        if health.is_alive() {
            live.insert(*faction);
        }
    }

    if live.len() > 1 {
        return;
    }

    let outcome = match live.into_iter().next() {
        Some(winner) => Outcome::Victory { winner },
        None => Outcome::Draw,
    };
    tracing::info!(?outcome, "match ended");
    *state = MatchState::GameOver(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::UnitBundle;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(outcome_system);
        schedule.run(world);
    }

    fn kill_faction(world: &mut World, faction: FactionId) {
        let mut query = world.query::<(&FactionId, &mut Health)>();
        for (f, mut health) in query.iter_mut(world) {
            if *f == faction {
                health.current = 0.0;
            }
        }
    }

    #[test]
    fn test_running_with_multiple_factions() {
        let mut world = World::new();
        world.insert_resource(MatchState::default());
        world.spawn(UnitBundle::new(FactionId::Aethel, 0.0, 0.0));
        world.spawn(UnitBundle::new(FactionId::Borean, 500.0, 500.0));

        run(&mut world);
        assert_eq!(*world.resource::<MatchState>(), MatchState::Running);
    }

    #[test]
    fn test_victory_on_same_tick_as_last_death() {
        let mut world = World::new();
        world.insert_resource(MatchState::default());
        world.spawn(UnitBundle::new(FactionId::Aethel, 0.0, 0.0));
        world.spawn(UnitBundle::new(FactionId::Borean, 500.0, 500.0));
        world.spawn(UnitBundle::new(FactionId::Borean, 400.0, 500.0));

        kill_faction(&mut world, FactionId::Borean);
        run(&mut world);

        assert_eq!(
            world.resource::<MatchState>().outcome(),
            Some(Outcome::Victory {
                winner: FactionId::Aethel
            })
        );
    }

    #[test]
    fn test_mutual_annihilation_is_a_draw() {
        let mut world = World::new();
        world.insert_resource(MatchState::default());
        world.spawn(UnitBundle::new(FactionId::Aethel, 0.0, 0.0));
        world.spawn(UnitBundle::new(FactionId::Cygnus, 500.0, 500.0));

        kill_faction(&mut world, FactionId::Aethel);
        kill_faction(&mut world, FactionId::Cygnus);
        run(&mut world);

        assert_eq!(world.resource::<MatchState>().outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_terminal_state_is_latched() {
        let mut world = World::new();
        world.insert_resource(MatchState::GameOver(Outcome::Draw));
        world.spawn(UnitBundle::new(FactionId::Aethel, 0.0, 0.0));
        world.spawn(UnitBundle::new(FactionId::Borean, 500.0, 500.0));

        run(&mut world);
        assert_eq!(world.resource::<MatchState>().outcome(), Some(Outcome::Draw));
    }
}
