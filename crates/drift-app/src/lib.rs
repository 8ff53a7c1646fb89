//! Drift headless runner.
//!
//! Wires the simulation engine to a command line, a frame loop and a
//! scripted autopilot that plays either mode.

pub mod autopilot;
pub mod cli;
pub mod game_loop;

pub use drift_core as core;
