//! Wave and difficulty progression.

use hecs::World;

use drift_core::components::{Active, Kind};
use drift_core::config::{ArcadeConfig, DefenseConfig};
use drift_core::enums::EntityKind;
use drift_core::events::GameEvent;

use crate::game_state::GameState;
use crate::wave::WaveState;

/// Timed arcade waves: every `wave_duration` seconds the wave advances and
/// awards `score_wave_bonus * wave`. Difficulty grows linearly with time.
pub fn run_arcade(
    state: &mut GameState,
    config: &ArcadeConfig,
    elapsed: f32,
    events: &mut Vec<GameEvent>,
) {
    if elapsed - state.wave_start_time >= config.wave_duration {
        let survived = state.wave;
        state.wave += 1;
        state.wave_start_time = elapsed;
        let bonus = config.score_wave_bonus.saturating_mul(state.wave);
        state.score = state.score.saturating_add(bonus);
        log::info!("wave {} survived, bonus {bonus}", survived);
        events.push(GameEvent::WaveCleared {
            wave: survived,
            bonus,
        });
    }
    state.difficulty = 1.0 + elapsed * config.difficulty_increase_rate;
    state.level = state.wave;
}

/// Begin the next defense wave.
pub fn start_defense_wave(
    waves: &mut WaveState,
    state: &GameState,
    config: &DefenseConfig,
    frame: u64,
    events: &mut Vec<GameEvent>,
) {
    let enemies = waves.start(&config.waves, state.wave, frame);
    log::info!("wave {} started with {enemies} enemies", state.wave);
    events.push(GameEvent::WaveStarted {
        wave: state.wave,
        enemies,
    });
}

/// Close the running wave once everything has spawned and no enemy is left.
/// Returns the outcome when the game is decided: `Some(false)` when the
/// lives ran out, `Some(true)` when the final wave was cleared.
pub fn run_defense(
    world: &World,
    waves: &mut WaveState,
    state: &mut GameState,
    config: &DefenseConfig,
    frame: u64,
    events: &mut Vec<GameEvent>,
) -> Option<bool> {
    if state.lives <= 0 {
        return Some(false);
    }
    if !waves.in_progress || !waves.all_spawned() || any_active_enemy(world) {
        return None;
    }

    waves.finish(frame);
    let cleared = state.wave;
    state.wave += 1;
    state.level = state.wave;
    state.score = state.score.saturating_add(config.waves.score_bonus);
    state.money = state.money.saturating_add(config.waves.money_bonus);
    log::info!("wave {cleared} cleared");
    events.push(GameEvent::WaveCleared {
        wave: cleared,
        bonus: config.waves.score_bonus,
    });

    match config.waves.final_wave {
        Some(last) if state.wave >= last => Some(true),
        _ => None,
    }
}

fn any_active_enemy(world: &World) -> bool {
    world
        .query::<(&Kind, &Active)>()
        .iter()
        .any(|(_, (kind, active))| kind.0 == EntityKind::Enemy && active.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arcade_wave_bonus_scales_with_wave() {
        let config = ArcadeConfig::default();
        let mut state = GameState::for_arcade(&config);
        let mut events = Vec::new();
        run_arcade(&mut state, &config, 29.9, &mut events);
        assert_eq!(state.wave, 1);
        run_arcade(&mut state, &config, 30.0, &mut events);
        assert_eq!(state.wave, 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 200);
        assert!((state.difficulty - 4.0).abs() < 1e-4);
    }

    #[test]
    fn defense_wave_clears_when_field_is_empty() {
        let config = DefenseConfig::default();
        let world = World::new();
        let mut state = GameState::for_defense(&config);
        let mut waves = WaveState::default();
        let mut events = Vec::new();
        start_defense_wave(&mut waves, &state, &config, 0, &mut events);
        assert_eq!(run_defense(&world, &mut waves, &mut state, &config, 1, &mut events), None);
        assert!(waves.in_progress, "enemies still pending");

        waves.due_spawns(0, 1);
        run_defense(&world, &mut waves, &mut state, &config, 2, &mut events);
        assert!(!waves.in_progress);
        assert_eq!(state.wave, 1);
        assert_eq!(state.money, 125);
    }

    #[test]
    fn clearing_final_wave_wins() {
        let mut config = DefenseConfig::default();
        config.waves.final_wave = Some(1);
        let world = World::new();
        let mut state = GameState::for_defense(&config);
        let mut waves = WaveState::default();
        let mut events = Vec::new();
        start_defense_wave(&mut waves, &state, &config, 0, &mut events);
        waves.due_spawns(0, 0);
        assert_eq!(
            run_defense(&world, &mut waves, &mut state, &config, 0, &mut events),
            Some(true)
        );
    }
}
