//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic. Components that
//! hold entity handles live in the sim crate, next to the ECS.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Color;

/// Entity category marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind(pub EntityKind);

/// Inactive entities are skipped by every system and despawned by cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active(pub bool);

/// Collision circle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
}

/// Orientation and angular velocity (radians, radians/second).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spin {
    pub rotation: f32,
    pub angular_velocity: f32,
}

/// Per-frame velocity multiplier. `1.0` means no friction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Friction(pub f32);

/// Finite lifetime in seconds. Entities without this component live forever.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f32,
}

/// Render state consumed by the snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Appearance {
    pub color: Color,
    pub alpha: f32,
    pub scale: f32,
    /// Pulse/twinkle frequency; zero disables animation.
    pub pulse_speed: f32,
    pub pulse_offset: f32,
}

impl Appearance {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            alpha: 1.0,
            scale: 1.0,
            pulse_speed: 0.0,
            pulse_offset: 0.0,
        }
    }
}

/// Outline geometry in local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(Vec<[f32; 2]>),
    /// Unit circle scaled by the body radius.
    Circle,
}

/// Teleports to the opposite edge when fully off-screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wraps;

/// Steers toward the ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Chaser {
    pub acceleration: f32,
}

/// Power-up payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
}

impl Health {
    pub fn full(amount: f32) -> Self {
        Self { current: amount }
    }
}

/// Waypoint steering. Invariant: `path_index < path.len()`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathFollower {
    pub path_index: usize,
    /// Units per frame.
    pub speed: f32,
    /// Money and score awarded on kill.
    pub reward: u32,
}

/// Pending automaton input carried by an enemy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTape {
    pub symbols: Vec<Symbol>,
    pub cursor: usize,
}

impl SymbolTape {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols, cursor: 0 }
    }

    /// Next unconsumed symbol, `None` once the tape is fully processed.
    pub fn pending(&self) -> Option<Symbol> {
        self.symbols.get(self.cursor).copied()
    }

    pub fn consume(&mut self) {
        if self.cursor < self.symbols.len() {
            self.cursor += 1;
        }
    }
}
