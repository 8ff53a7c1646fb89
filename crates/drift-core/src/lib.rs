//! Core types and definitions for the Drift simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, intents, state snapshots, events, constants and the
//! configuration model. It has no dependency on the ECS or any runtime.

pub mod automaton;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
