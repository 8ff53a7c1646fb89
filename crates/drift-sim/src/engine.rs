//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the game-state record,
//! processes player intents, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use drift_core::commands::PlayerIntent;
use drift_core::config::{GameConfig, Rules};
use drift_core::constants::MAX_FRAME_DT;
use drift_core::enums::{GameMode, GamePhase};
use drift_core::events::GameEvent;
use drift_core::state::GameStateSnapshot;
use drift_core::types::{Position, SimTime};

use crate::game_state::GameState;
use crate::path::Path;
use crate::systems;
use crate::systems::player::{ShipClock, ShipControls};
use crate::systems::snapshot::SnapshotContext;
use crate::systems::spawner::SpawnTimers;
use crate::wave::WaveState;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    state: GameState,
    intent_queue: VecDeque<PlayerIntent>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    feedback: Option<String>,

    // --- Arcade ---
    ship: Option<Entity>,
    controls: ShipControls,
    ship_clock: ShipClock,
    spawn_timers: SpawnTimers,

    // --- Defense ---
    path: Option<Path>,
    waves: WaveState,
    selected_tower: Option<u32>,
}

impl SimulationEngine {
    /// Create a new engine and initialise the world for `config`.
    pub fn new(config: GameConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self {
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            state: GameState::default(),
            intent_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            feedback: None,
            ship: None,
            controls: ShipControls::default(),
            ship_clock: ShipClock::default(),
            spawn_timers: SpawnTimers::default(),
            path: None,
            waves: WaveState::default(),
            selected_tower: None,
        };
        engine.initialize_game();
        engine
    }

    /// Queue a player intent for processing at the next tick boundary.
    pub fn queue_intent(&mut self, intent: PlayerIntent) {
        self.intent_queue.push_back(intent);
    }

    /// Queue multiple intents.
    pub fn queue_intents(&mut self, intents: impl IntoIterator<Item = PlayerIntent>) {
        self.intent_queue.extend(intents);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot. Nothing moves while paused or after game over.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.process_intents();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Reinitialise the world in place, keeping the configuration.
    pub fn restart(&mut self) {
        self.initialize_game();
        self.events.push(GameEvent::Restarted);
        log::info!("game restarted");
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Enemy path; `None` in arcade mode.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> Option<Entity> {
        self.ship
    }

    pub fn waves(&self) -> &WaveState {
        &self.waves
    }

    /// Mutable game state for test setups.
    #[cfg(test)]
    pub fn game_state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Spawn a motionless asteroid (for collision tests).
    #[cfg(test)]
    pub fn spawn_test_asteroid(&mut self, at: Position, radius: f32) -> Entity {
        world_setup::spawn_asteroid_at(
            &mut self.world,
            &mut self.rng,
            at,
            drift_core::types::Velocity::default(),
            radius,
        )
    }

    /// Build the world for the configured mode. Score, lives, money, timers
    /// and every store are reset; the RNG stream continues.
    fn initialize_game(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.events.clear();
        self.feedback = None;
        self.controls = ShipControls::default();
        self.ship_clock = ShipClock::default();
        self.spawn_timers = SpawnTimers::default();
        self.waves = WaveState::default();

        match &self.config.rules {
            Rules::Arcade(arcade) => {
                self.state = GameState::for_arcade(arcade);
                self.ship = Some(world_setup::setup_arcade(
                    &mut self.world,
                    &mut self.rng,
                    arcade,
                ));
                self.path = None;
                self.selected_tower = None;
            }
            Rules::Defense(defense) => {
                self.state = GameState::for_defense(defense);
                self.ship = None;
                self.path = Some(Path::new(
                    defense.path.clone(),
                    defense.world_width,
                    defense.world_height,
                ));
                world_setup::setup_defense(&mut self.world, defense);
                self.selected_tower = defense.tower_types.first().map(|t| t.id);
            }
        }
    }

    /// Process all queued intents. Held controls are rebuilt every frame.
    fn process_intents(&mut self) {
        self.controls = ShipControls::default();
        while let Some(intent) = self.intent_queue.pop_front() {
            self.handle_intent(intent);
        }
    }

    /// Handle a single player intent.
    fn handle_intent(&mut self, intent: PlayerIntent) {
        match intent {
            PlayerIntent::RotateLeft => self.controls.turn += 1.0,
            PlayerIntent::RotateRight => self.controls.turn -= 1.0,
            PlayerIntent::Thrust => self.controls.thrust = true,
            PlayerIntent::Fire => self.controls.fire = true,
            PlayerIntent::Pause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Active,
                    GamePhase::GameOver => GamePhase::GameOver,
                };
            }
            PlayerIntent::Restart => {
                if self.phase == GamePhase::GameOver {
                    self.restart();
                }
            }
            PlayerIntent::SelectTowerType { id } => {
                let Rules::Defense(defense) = &self.config.rules else {
                    return;
                };
                if defense.tower_type(id).is_some() {
                    self.selected_tower = Some(id);
                } else {
                    self.reject(format!("Unknown tower type {id}"));
                }
            }
            PlayerIntent::PlaceTower { x, y } => self.place_tower(Position::new(x, y)),
            PlayerIntent::StartWave => {
                let Rules::Defense(defense) = &self.config.rules else {
                    return;
                };
                if self.phase != GamePhase::Active || self.waves.in_progress {
                    log::debug!("start wave ignored");
                    return;
                }
                systems::waves::start_defense_wave(
                    &mut self.waves,
                    &self.state,
                    defense,
                    self.time.frame,
                    &mut self.events,
                );
            }
            PlayerIntent::Resize { width, height } => {
                if let Some(path) = self.path.as_mut() {
                    path.rescale(width, height);
                }
            }
        }
    }

    fn place_tower(&mut self, at: Position) {
        if self.phase != GamePhase::Active || self.config.mode() != GameMode::Defense {
            return;
        }
        let Some(type_id) = self.selected_tower else {
            self.reject("No tower type selected".into());
            return;
        };
        let (Rules::Defense(defense), Some(path)) = (&self.config.rules, self.path.as_ref()) else {
            return;
        };
        let placed = systems::placement::place_tower(
            &mut self.world,
            path,
            defense,
            &mut self.state,
            type_id,
            at,
        );
        match placed {
            Ok(_) => self.events.push(GameEvent::TowerPlaced {
                tower_type: type_id,
                x: at.x,
                y: at.y,
            }),
            Err(err) => self.reject(err.to_string()),
        }
    }

    fn reject(&mut self, reason: String) {
        log::debug!("rejected: {reason}");
        self.events.push(GameEvent::PlacementRejected {
            reason: reason.clone(),
        });
        self.feedback = Some(reason);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        match self.config.mode() {
            GameMode::Arcade => self.run_arcade(dt),
            GameMode::Defense => self.run_defense(),
        }
        // Cleanup (inactive, dead, expired)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if self.state.lives <= 0 {
            self.game_over(false);
        }
    }

    fn run_arcade(&mut self, dt: f32) {
        let (Rules::Arcade(config), Some(ship)) = (&self.config.rules, self.ship) else {
            return;
        };
        let elapsed = self.time.elapsed_secs + dt;
        let ship_pos = self
            .world
            .get::<&Position>(ship)
            .map(|p| *p)
            .unwrap_or_default();

        // 1. Power-up timers
        systems::powerups::run(&mut self.state, dt, &mut self.events);
        // 2. Wave and difficulty progression
        systems::waves::run_arcade(&mut self.state, config, elapsed, &mut self.events);
        // 3. Hazard spawning
        systems::spawner::run_arcade(
            &mut self.world,
            &mut self.rng,
            &mut self.spawn_timers,
            &self.state,
            config,
            ship_pos,
            elapsed,
        );
        // 4. Ship controls
        systems::player::run(
            &mut self.world,
            &mut self.rng,
            ship,
            self.controls,
            &mut self.ship_clock,
            &mut self.state,
            config,
            elapsed,
            dt,
        );
        // 5. Chaser steering
        systems::movement::steer_chasers(&mut self.world, ship, dt);
        // 6. Integration
        systems::movement::run(&mut self.world, dt);
        // 7. Screen wrap, bullet culling, visual animation
        systems::movement::wrap(
            &mut self.world,
            &mut self.rng,
            config.half_width(),
            config.half_height(),
        );
        systems::movement::cull_bullets(&mut self.world, config.half_width(), config.half_height());
        systems::movement::animate(&mut self.world, elapsed);
        // 8. Collisions
        systems::collision::ship_collisions(
            &mut self.world,
            &mut self.rng,
            ship,
            &mut self.state,
            config,
            &mut self.events,
        );
        systems::collision::bullet_collisions(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            config,
            &mut self.events,
        );
    }

    fn run_defense(&mut self) {
        let (Rules::Defense(config), Some(path)) = (&self.config.rules, self.path.as_ref()) else {
            return;
        };
        let frame = self.time.frame;
        let automaton = config.automaton.as_ref();

        // 1. Automatic wave start
        if self.waves.auto_start_due(&config.waves, frame) {
            systems::waves::start_defense_wave(
                &mut self.waves,
                &self.state,
                config,
                frame,
                &mut self.events,
            );
        }
        // 2. Enemy spawning
        systems::spawner::run_defense(
            &mut self.world,
            &mut self.rng,
            &mut self.waves,
            config,
            path,
            frame,
        );
        // 3. Path following
        systems::path_follow::run(&mut self.world, path, &mut self.state, &mut self.events);
        // 4. Target acquisition and firing
        systems::fire_control::run(
            &mut self.world,
            automaton,
            &mut self.state,
            frame,
            &mut self.events,
        );
        // 5. Projectile homing and hits
        systems::projectiles::run(
            &mut self.world,
            automaton,
            config.enemy.hit_shrink,
            &mut self.state,
            &mut self.events,
        );
        // 6. Wave completion and outcome
        let outcome = systems::waves::run_defense(
            &self.world,
            &mut self.waves,
            &mut self.state,
            config,
            frame,
            &mut self.events,
        );
        if let Some(won) = outcome {
            self.game_over(won);
        }
    }

    fn game_over(&mut self, won: bool) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "game over: {} with score {}",
            if won { "won" } else { "lost" },
            self.state.score
        );
        self.events.push(GameEvent::GameOver {
            won,
            score: self.state.score,
        });
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                mode: self.config.mode(),
                phase: self.phase,
                state: &self.state,
                waves: &self.waves,
                path: self.path.as_ref(),
                selected_tower: self.selected_tower,
                feedback: self.feedback.clone(),
            },
            events,
        )
    }
}
