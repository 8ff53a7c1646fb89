//! Spawning system: arcade hazards on difficulty-scaled timers, defense
//! enemies released by the wave schedule.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use drift_core::automaton::Automaton;
use drift_core::config::{ArcadeConfig, DefenseConfig};
use drift_core::constants::{HUNTER_SAFE_DISTANCE, MAX_SPAWN_ATTEMPTS};
use drift_core::types::Position;

use crate::game_state::GameState;
use crate::path::Path;
use crate::wave::WaveState;
use crate::world_setup;

/// Elapsed seconds at which each arcade hazard last spawned.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub last_asteroid: f32,
    pub last_hunter: f32,
}

/// Spawn asteroids and hunters when their intervals (base rate divided by
/// difficulty) have elapsed.
pub fn run_arcade(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timers: &mut SpawnTimers,
    state: &GameState,
    config: &ArcadeConfig,
    ship: Position,
    elapsed: f32,
) {
    let difficulty = state.difficulty.max(f32::EPSILON);

    if elapsed - timers.last_asteroid > config.asteroid_spawn_rate / difficulty {
        world_setup::spawn_asteroid(world, rng, config);
        timers.last_asteroid = elapsed;
    }

    if elapsed - timers.last_hunter > config.hunter_spawn_rate / difficulty {
        let position = hunter_spawn_position(rng, config, ship);
        world_setup::spawn_hunter(world, position);
        timers.last_hunter = elapsed;
    }
}

/// Random position at least `HUNTER_SAFE_DISTANCE` from the ship. Sampling
/// is bounded; when every attempt lands too close, the screen corner
/// farthest from the ship is used.
pub fn hunter_spawn_position(
    rng: &mut ChaCha8Rng,
    config: &ArcadeConfig,
    ship: Position,
) -> Position {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position::new(
            (rng.gen::<f32>() - 0.5) * config.world_width,
            (rng.gen::<f32>() - 0.5) * config.world_height,
        );
        if candidate.distance_to(&ship) >= HUNTER_SAFE_DISTANCE {
            return candidate;
        }
    }
    let corner = farthest_corner(config, ship);
    log::warn!(
        "no hunter spawn found after {MAX_SPAWN_ATTEMPTS} attempts, using corner ({:.2}, {:.2})",
        corner.x,
        corner.y
    );
    corner
}

pub fn farthest_corner(config: &ArcadeConfig, from: Position) -> Position {
    let (hw, hh) = (config.half_width(), config.half_height());
    let x = if from.x > 0.0 { -hw } else { hw };
    let y = if from.y > 0.0 { -hh } else { hh };
    Position::new(x, y)
}

/// Random drop position, kept away from the very edges.
pub fn powerup_drop_position(rng: &mut ChaCha8Rng, config: &ArcadeConfig) -> Position {
    Position::new(
        (rng.gen::<f32>() - 0.5) * config.world_width * 0.9,
        (rng.gen::<f32>() - 0.5) * config.world_height * 0.9,
    )
}

/// Release the enemies that are due at `frame` at the start of the path.
/// Returns the number spawned.
pub fn run_defense(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    waves: &mut WaveState,
    config: &DefenseConfig,
    path: &Path,
    frame: u64,
) -> u32 {
    let Some(start) = path.get(0) else {
        return 0;
    };
    let due = waves.due_spawns(config.waves.spawn_delay_frames, frame);
    let automaton: Option<&Automaton> = config.automaton.as_ref();
    for _ in 0..due {
        world_setup::spawn_enemy(world, rng, &config.enemy, start, automaton);
    }
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn farthest_corner_is_opposite_quadrant() {
        let config = ArcadeConfig::default();
        let corner = farthest_corner(&config, Position::new(0.5, -0.2));
        assert_eq!(corner, Position::new(-1.0, 0.8));
    }

    #[test]
    fn hunter_spawn_respects_safe_distance() {
        let config = ArcadeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let p = hunter_spawn_position(&mut rng, &config, Position::ORIGIN);
            assert!(p.distance_to(&Position::ORIGIN) >= HUNTER_SAFE_DISTANCE);
        }
    }

    #[test]
    fn hunter_spawn_falls_back_when_field_is_too_small() {
        // Every point of a tiny field is within the safe distance of the ship.
        let config = ArcadeConfig {
            world_width: 0.2,
            world_height: 0.2,
            ..ArcadeConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ship = Position::new(0.05, 0.05);
        let p = hunter_spawn_position(&mut rng, &config, ship);
        assert_eq!(p, Position::new(-0.1, -0.1));
    }
}
