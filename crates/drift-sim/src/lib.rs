//! Simulation engine for Drift.
//!
//! Owns the hecs ECS world, runs the arcade or defense systems once per
//! frame, and produces GameStateSnapshots for a renderer or runner.

pub mod combat;
pub mod engine;
pub mod game_state;
pub mod path;
pub mod systems;
pub mod wave;
pub mod world_setup;

pub use drift_core as core;
pub use engine::SimulationEngine;
