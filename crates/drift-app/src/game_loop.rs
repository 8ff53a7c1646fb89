//! Headless game loop: drives the engine with autopilot intents and logs
//! a HUD line once per simulated second.

use std::time::{Duration, Instant};

use drift_core::constants::{DT, FRAME_RATE};
use drift_core::enums::{GameMode, GamePhase};
use drift_core::state::{GameStateSnapshot, HudView};
use drift_sim::SimulationEngine;

use crate::autopilot::Autopilot;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Upper bound on simulated frames.
    pub frames: u64,
    /// Pace frames against the wall clock and feed measured `dt`.
    pub realtime: bool,
}

/// Run the loop until `options.frames` ticks have elapsed or a defense
/// game ends. Returns the last snapshot.
pub fn run(engine: &mut SimulationEngine, options: LoopOptions) -> GameStateSnapshot {
    let mut autopilot = Autopilot::new(engine.config());
    let mut snapshot = engine.tick(DT);
    let mut last_report = snapshot.time.frame;
    let mut next_tick_time = Instant::now();
    let mut last_tick = Instant::now();

    for _ in 1..options.frames {
        engine.queue_intents(autopilot.intents(&snapshot));

        let dt = if options.realtime {
            let now = Instant::now();
            let measured = now.duration_since(last_tick).as_secs_f32();
            last_tick = now;
            measured
        } else {
            DT
        };
        snapshot = engine.tick(dt);

        if snapshot.time.frame >= last_report + FRAME_RATE as u64 {
            last_report = snapshot.time.frame;
            log::info!("{}", hud_line(&snapshot));
        }
        for event in &snapshot.events {
            log::debug!("event: {event:?}");
        }

        if snapshot.mode == GameMode::Defense && snapshot.phase == GamePhase::GameOver {
            break;
        }

        if options.realtime {
            next_tick_time += FRAME_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > FRAME_DURATION * 2 {
                // Too far behind, drop the backlog
                next_tick_time = now;
            }
        }
    }
    snapshot
}

/// One-line HUD summary.
pub fn hud_line(snapshot: &GameStateSnapshot) -> String {
    let hud: &HudView = &snapshot.hud;
    let mut line = format!(
        "t={:.0}s score={} lives={} wave={}",
        snapshot.time.elapsed_secs, hud.score, hud.lives, hud.wave
    );
    match snapshot.mode {
        GameMode::Arcade => {
            line.push_str(&format!(
                " level={} asteroids={} hunters={}",
                hud.level, hud.stats.asteroids_destroyed, hud.stats.hunters_destroyed
            ));
            for p in &hud.powerups {
                line.push_str(&format!(" {}={:.1}s", p.kind.label(), p.remaining_secs));
            }
        }
        GameMode::Defense => {
            line.push_str(&format!(
                " money={} towers={} killed={} leaked={}",
                hud.money, hud.stats.towers_built, hud.stats.enemies_killed, hud.stats.enemies_leaked
            ));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::config::GameConfig;

    #[test]
    fn runs_requested_frames() {
        let mut engine = SimulationEngine::new(GameConfig::arcade());
        let snapshot = run(
            &mut engine,
            LoopOptions {
                frames: 120,
                realtime: false,
            },
        );
        assert!(snapshot.time.frame <= 120);
        assert!(snapshot.time.frame > 0);
    }

    #[test]
    fn autopilot_builds_towers() {
        let mut engine = SimulationEngine::new(GameConfig::tower_defense());
        let snapshot = run(
            &mut engine,
            LoopOptions {
                frames: 600,
                realtime: false,
            },
        );
        assert!(snapshot.count(drift_core::enums::EntityKind::Tower) > 0);
        assert!(snapshot.hud.wave >= 1);
    }

    #[test]
    fn hud_line_mentions_money_in_defense() {
        let snapshot = GameStateSnapshot {
            mode: GameMode::Defense,
            ..Default::default()
        };
        assert!(hud_line(&snapshot).contains("money=0"));
    }
}
