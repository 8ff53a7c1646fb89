//! Game state snapshot: everything a renderer or HUD needs after each tick.

use serde::{Deserialize, Serialize};

use crate::components::Shape;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Color, Position, SimTime};

/// Complete visible state produced by the engine after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub mode: GameMode,
    pub phase: GamePhase,
    /// `Some` once the game is over.
    pub won: Option<bool>,
    pub hud: HudView,
    pub entities: Vec<EntityView>,
    /// Waypoints of the enemy path (empty in arcade mode).
    pub path: Vec<Position>,
    pub events: Vec<GameEvent>,
    /// Most recent user-facing feedback string (e.g. rejected placement).
    pub feedback: Option<String>,
}

/// What a renderer needs to draw one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Position,
    pub rotation: f32,
    /// Render scale. For `Shape::Circle` this already includes the radius.
    pub scale: f32,
    pub color: Color,
    pub alpha: f32,
    pub shape: Shape,
}

/// Heads-up display counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub lives: i32,
    pub wave: u32,
    pub level: u32,
    pub difficulty: f32,
    pub money: u32,
    pub selected_tower: Option<u32>,
    pub wave_in_progress: bool,
    pub powerups: Vec<PowerUpView>,
    pub stats: StatsView,
}

/// An active timed power-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub remaining_secs: f32,
}

/// Running statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub asteroids_destroyed: u32,
    pub hunters_destroyed: u32,
    pub powerups_collected: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub shots_fired: u32,
    pub towers_built: u32,
}

impl GameStateSnapshot {
    /// Number of visible entities of `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
