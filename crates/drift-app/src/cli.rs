//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use drift_core::config::{ConfigError, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Asteroid-field shooter.
    Arcade,
    /// Tower defense with an economy.
    Defense,
    /// Tower defense gated by a two-state automaton.
    Automaton,
}

#[derive(Parser, Debug)]
#[command(name = "drift")]
#[command(about = "Headless arcade / tower-defense simulation")]
pub struct Args {
    /// Built-in rule set
    #[arg(long, value_enum, default_value = "arcade")]
    pub preset: Preset,

    /// JSON config file; overrides the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RNG seed; overrides the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames to simulate
    #[arg(long, default_value = "3600", value_parser = clap::value_parser!(u64).range(1..))]
    pub frames: u64,

    /// Pace the loop at 60 Hz with wall-clock delta time
    #[arg(long)]
    pub realtime: bool,

    /// Write the final snapshot as JSON to this file
    #[arg(long)]
    pub dump_snapshot: Option<PathBuf>,
}

impl Args {
    /// Resolve the configuration: file if given, else the preset, then the
    /// seed override. The result is validated.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => match self.preset {
                Preset::Arcade => GameConfig::arcade(),
                Preset::Defense => GameConfig::tower_defense(),
                Preset::Automaton => GameConfig::automaton_defense(),
            },
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}
