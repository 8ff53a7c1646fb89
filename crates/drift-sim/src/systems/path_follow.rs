//! Path following: enemies walk the waypoint list at a fixed per-frame
//! speed. Reaching the last waypoint costs the player a life.

use hecs::World;

use drift_core::components::{Active, PathFollower};
use drift_core::events::GameEvent;
use drift_core::types::Position;

use crate::game_state::GameState;
use crate::path::Path;

pub fn run(world: &mut World, path: &Path, state: &mut GameState, events: &mut Vec<GameEvent>) {
    let last = path.len().saturating_sub(1);
    for (_entity, (active, pos, follower)) in
        world.query_mut::<(&mut Active, &mut Position, &mut PathFollower)>()
    {
        if !active.0 {
            continue;
        }
        follower.path_index = follower.path_index.min(last);
        if follower.path_index < last {
            if let Some(next) = path.get(follower.path_index + 1) {
                if pos.step_toward(next, follower.speed) {
                    follower.path_index += 1;
                }
            }
        }
        if follower.path_index >= last {
            active.0 = false;
            state.lives -= 1;
            state.stats.enemies_leaked += 1;
            events.push(GameEvent::EnemyLeaked { lives: state.lives });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::config::EnemyStats;
    use drift_core::constants::DEFENSE_STARTING_LIVES;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::world_setup;

    #[test]
    fn walks_path_and_leaks() {
        let path = Path::new(
            vec![
                Position::new(0.0, 0.0),
                Position::new(3.0, 0.0),
                Position::new(3.0, 2.0),
            ],
            10.0,
            10.0,
        );
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let stats = EnemyStats {
            speed: 1.0,
            ..EnemyStats::default()
        };
        let e = world_setup::spawn_enemy(&mut world, &mut rng, &stats, Position::ORIGIN, None);
        let mut state = GameState {
            lives: DEFENSE_STARTING_LIVES,
            ..GameState::default()
        };
        let mut events = Vec::new();

        for _ in 0..3 {
            run(&mut world, &path, &mut state, &mut events);
        }
        assert_eq!(world.get::<&PathFollower>(e).unwrap().path_index, 1);
        assert_eq!(*world.get::<&Position>(e).unwrap(), Position::new(3.0, 0.0));

        run(&mut world, &path, &mut state, &mut events);
        assert!(world.get::<&Active>(e).unwrap().0);
        run(&mut world, &path, &mut state, &mut events);
        assert!(!world.get::<&Active>(e).unwrap().0);
        assert_eq!(state.lives, DEFENSE_STARTING_LIVES - 1);
        assert_eq!(state.stats.enemies_leaked, 1);
        assert_eq!(events, vec![GameEvent::EnemyLeaked { lives: 9 }]);
    }
}
