use clap::Parser;

use drift_app::cli::Args;
use drift_app::game_loop::{self, LoopOptions};
use drift_sim::SimulationEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match args.game_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {err}");
            std::process::exit(-1);
        }
    };
    log::info!("Starting {:?} game (seed {})", config.mode(), config.seed);

    let mut engine = SimulationEngine::new(config);
    let snapshot = game_loop::run(
        &mut engine,
        LoopOptions {
            frames: args.frames,
            realtime: args.realtime,
        },
    );

    if let Some(path) = &args.dump_snapshot {
        let written = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(err) = written {
            log::error!("Failed to write snapshot to {}: {err}", path.display());
            std::process::exit(-1);
        }
    }

    log::info!(
        "Finished after {} frames: {:?}, won={:?}, {}",
        snapshot.time.frame,
        snapshot.phase,
        snapshot.won,
        game_loop::hud_line(&snapshot)
    );
}
