//! Events emitted by the simulation for audio, HUD and log feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32, bonus: u32 },
    /// The ship took a hit; `shielded` hits cost no life.
    ShipHit { lives: i32, shielded: bool },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    Explosion { x: f32, y: f32, particles: u32 },
    Destroyed { kind: EntityKind, score: u32 },
    EnemyKilled { tower_type: u32, reward: u32 },
    EnemyLeaked { lives: i32 },
    ShotFired { tower_type: u32, frame: u64 },
    /// A projectile lost its target and was discarded without damage.
    ProjectileNeutralized,
    TowerPlaced { tower_type: u32, x: f32, y: f32 },
    /// User-facing reason a placement or selection was refused.
    PlacementRejected { reason: String },
    GameOver { won: bool, score: u32 },
    Restarted,
}
