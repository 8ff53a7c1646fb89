//! Player intents sent from the input layer to the simulation.
//!
//! Intents are queued and processed at the next tick boundary. Held
//! controls (rotation, thrust, fire) are level-triggered: the input layer
//! re-sends them every frame the key is down.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerIntent {
    // --- Ship control (arcade) ---
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,

    // --- Building (defense) ---
    /// Place the selected tower type centred at (x, y).
    PlaceTower { x: f32, y: f32 },
    /// Select the tower type used by subsequent placements.
    SelectTowerType { id: u32 },
    /// Release the next wave.
    StartWave,
    /// The viewport changed size; path geometry is rescaled to match.
    Resize { width: f32, height: f32 },

    // --- Simulation control ---
    /// Toggle pause.
    Pause,
    /// Reinitialise after game over.
    Restart,
}
