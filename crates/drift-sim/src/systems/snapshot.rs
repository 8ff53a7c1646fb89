//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use drift_core::components::*;
use drift_core::enums::*;
use drift_core::events::GameEvent;
use drift_core::state::*;
use drift_core::types::{Position, SimTime};

use crate::game_state::GameState;
use crate::path::Path;
use crate::wave::WaveState;

/// Everything outside the world that the snapshot reports.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub state: &'a GameState,
    pub waves: &'a WaveState,
    pub path: Option<&'a Path>,
    pub selected_tower: Option<u32>,
    pub feedback: Option<String>,
}

pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let won = (ctx.phase == GamePhase::GameOver).then_some(ctx.state.lives > 0);
    GameStateSnapshot {
        time: ctx.time,
        mode: ctx.mode,
        phase: ctx.phase,
        won,
        hud: build_hud(&ctx),
        entities: build_entities(world),
        path: ctx
            .path
            .map(|p| p.waypoints().to_vec())
            .unwrap_or_default(),
        events,
        feedback: ctx.feedback,
    }
}

fn build_hud(ctx: &SnapshotContext<'_>) -> HudView {
    let state = ctx.state;
    HudView {
        score: state.score,
        lives: state.lives,
        wave: state.wave,
        level: state.level,
        difficulty: state.difficulty,
        money: state.money,
        selected_tower: ctx.selected_tower,
        wave_in_progress: ctx.waves.in_progress,
        powerups: state.powerups.views(),
        stats: state.stats.clone(),
    }
}

/// One view per active entity. Circles are scaled by their body radius.
fn build_entities(world: &World) -> Vec<EntityView> {
    world
        .query::<(
            &Kind,
            &Active,
            &Position,
            &Appearance,
            &Shape,
            Option<&Body>,
            Option<&Spin>,
        )>()
        .iter()
        .filter(|(_, (_, active, ..))| active.0)
        .map(|(_, (kind, _, pos, look, shape, body, spin))| {
            let scale = match shape {
                Shape::Circle => look.scale * body.map_or(1.0, |b| b.radius),
                Shape::Polygon(_) => look.scale,
            };
            EntityView {
                kind: kind.0,
                position: *pos,
                rotation: spin.map_or(0.0, |s| s.rotation),
                scale,
                color: look.color,
                alpha: look.alpha,
                shape: shape.clone(),
            }
        })
        .collect()
}
