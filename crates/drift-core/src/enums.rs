//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which rule set the engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Free-flight asteroid-field shooter with screen wrap.
    #[default]
    Arcade,
    /// Path-following enemies, towers and an economy.
    Defense,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// Loss or win; `lives > 0` distinguishes the two.
    GameOver,
}

/// Entity category. Drives per-kind stepping, collision filters and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    /// Arcade enemy that steers toward the ship.
    Hunter,
    PowerUp,
    Bullet,
    Particle,
    Star,
    /// Defense enemy that follows the path.
    Enemy,
    Tower,
    Projectile,
}

impl EntityKind {
    /// Kinds a bullet can destroy.
    pub fn is_bullet_target(self) -> bool {
        matches!(self, EntityKind::Asteroid | EntityKind::Hunter)
    }

    /// Kinds that hurt the ship on contact.
    pub fn is_hazard(self) -> bool {
        matches!(self, EntityKind::Asteroid | EntityKind::Hunter)
    }
}

/// Time-limited modifiers picked up by the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    MultiShot,
    SpeedBoost,
    /// Instant: one extra life, no timer.
    LifeUp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::SpeedBoost,
        PowerUpKind::LifeUp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "rapid fire",
            PowerUpKind::Shield => "shield",
            PowerUpKind::MultiShot => "multi shot",
            PowerUpKind::SpeedBoost => "speed boost",
            PowerUpKind::LifeUp => "life up",
        }
    }
}

/// Input alphabet of the tower-gating automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
}
