//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Entity state lives in components, game-wide
//! counters in the `GameState` record passed in by the engine.

pub mod cleanup;
pub mod collision;
pub mod fire_control;
pub mod movement;
pub mod path_follow;
pub mod placement;
pub mod player;
pub mod powerups;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod waves;
