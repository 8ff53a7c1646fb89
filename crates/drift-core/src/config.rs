//! Game configuration: rule sets, stat tables, wave formulas and presets.
//!
//! Every struct is `#[serde(default)]`, so a JSON file only needs to name
//! the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::automaton::Automaton;
use crate::constants::*;
use crate::enums::GameMode;
use crate::types::Position;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for determinism. Same seed and intents = same simulation.
    pub seed: u64,
    pub rules: Rules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Rules {
    Arcade(ArcadeConfig),
    Defense(DefenseConfig),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::arcade()
    }
}

impl GameConfig {
    /// Asteroid-field shooter with power-ups and timed waves.
    pub fn arcade() -> Self {
        Self {
            seed: 42,
            rules: Rules::Arcade(ArcadeConfig::default()),
        }
    }

    /// Tower defense with an economy, three tower types and linear waves.
    pub fn tower_defense() -> Self {
        Self {
            seed: 42,
            rules: Rules::Defense(DefenseConfig::default()),
        }
    }

    /// Tower defense whose towers are gated by a two-state automaton.
    pub fn automaton_defense() -> Self {
        Self {
            seed: 42,
            rules: Rules::Defense(DefenseConfig::automaton()),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self.rules {
            Rules::Arcade(_) => GameMode::Arcade,
            Rules::Defense(_) => GameMode::Defense,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.rules {
            Rules::Arcade(arcade) => arcade.validate(),
            Rules::Defense(defense) => defense.validate(),
        }
    }
}

fn require(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

// --- Arcade ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub starting_lives: i32,
    pub ship_thrust: f32,
    pub ship_rotation_speed: f32,
    pub ship_max_speed: f32,
    pub ship_friction: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_cooldown: f32,
    pub bullet_cooldown_rapid: f32,
    pub asteroid_spawn_rate: f32,
    pub hunter_spawn_rate: f32,
    pub powerup_drop_chance: f32,
    pub powerup_duration: f32,
    pub powerup_lifetime: f32,
    pub score_asteroid: u32,
    pub score_hunter: u32,
    pub score_powerup: u32,
    pub score_wave_bonus: u32,
    pub difficulty_increase_rate: f32,
    pub wave_duration: f32,
    pub initial_asteroids: u32,
    pub background_stars: u32,
    pub explosion_particles: u32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            world_width: ARCADE_WORLD_WIDTH,
            world_height: ARCADE_WORLD_HEIGHT,
            starting_lives: SHIP_STARTING_LIVES,
            ship_thrust: SHIP_THRUST,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_friction: SHIP_FRICTION,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_cooldown: BULLET_COOLDOWN_NORMAL,
            bullet_cooldown_rapid: BULLET_COOLDOWN_RAPID,
            asteroid_spawn_rate: ASTEROID_BASE_SPAWN_RATE,
            hunter_spawn_rate: HUNTER_BASE_SPAWN_RATE,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            powerup_duration: POWERUP_DURATION,
            powerup_lifetime: POWERUP_LIFETIME,
            score_asteroid: SCORE_ASTEROID,
            score_hunter: SCORE_HUNTER,
            score_powerup: SCORE_POWERUP,
            score_wave_bonus: SCORE_WAVE_BONUS,
            difficulty_increase_rate: DIFFICULTY_INCREASE_RATE,
            wave_duration: WAVE_DURATION,
            initial_asteroids: INITIAL_ASTEROIDS,
            background_stars: BACKGROUND_STARS,
            explosion_particles: EXPLOSION_PARTICLES,
        }
    }
}

impl ArcadeConfig {
    pub fn half_width(&self) -> f32 {
        self.world_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.world_height / 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world dimensions must be positive",
        )?;
        require(self.starting_lives > 0, "starting_lives must be positive")?;
        require(
            (0.0..=1.0).contains(&self.ship_friction),
            "ship_friction must be within [0, 1]",
        )?;
        require(
            self.asteroid_spawn_rate > 0.0 && self.hunter_spawn_rate > 0.0,
            "spawn rates must be positive",
        )?;
        require(
            (0.0..=1.0).contains(&self.powerup_drop_chance),
            "powerup_drop_chance must be within [0, 1]",
        )?;
        require(self.wave_duration > 0.0, "wave_duration must be positive")
    }
}

// --- Defense ---

/// How many enemies wave `n` (0-based) releases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WaveFormula {
    /// `base + wave * increment`.
    Linear { base: u32, increment: u32 },
    /// `base + fib(wave)` with `fib(0) = 0`, `fib(1) = 1`.
    Fibonacci { base: u32 },
}

impl WaveFormula {
    pub fn enemy_count(&self, wave: u32) -> u32 {
        match *self {
            WaveFormula::Linear { base, increment } => {
                base.saturating_add(wave.saturating_mul(increment))
            }
            WaveFormula::Fibonacci { base } => base.saturating_add(fibonacci(wave)),
        }
    }
}

fn fibonacci(n: u32) -> u32 {
    let (mut a, mut b) = (0u32, 1u32);
    for _ in 0..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub formula: WaveFormula,
    /// Frames between consecutive enemy spawns; 0 releases the wave at once.
    pub spawn_delay_frames: u64,
    /// Start the next wave automatically this many frames after the last one ends.
    pub auto_start_delay_frames: Option<u64>,
    /// Clearing this many waves wins the game.
    pub final_wave: Option<u32>,
    pub score_bonus: u32,
    pub money_bonus: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            formula: WaveFormula::Linear {
                base: ENEMIES_PER_WAVE_BASE,
                increment: ENEMIES_PER_WAVE_INCREMENT,
            },
            spawn_delay_frames: 45,
            auto_start_delay_frames: None,
            final_wave: Some(10),
            score_bonus: SCORE_WAVE_BONUS,
            money_bonus: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    pub health: f32,
    /// Units per frame.
    pub speed: f32,
    pub radius: f32,
    pub reward: u32,
    /// Radius multiplier applied on every hit (1.0 = no shrink).
    pub hit_shrink: f32,
    /// Symbols on each enemy's tape when an automaton is configured.
    pub tape_length: usize,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            health: ENEMY_HEALTH,
            speed: 1.0,
            radius: 15.0,
            reward: ENEMY_REWARD,
            hit_shrink: 1.0,
            tape_length: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerType {
    pub id: u32,
    pub name: String,
    pub cost: u32,
    pub range: f32,
    /// Minimum frames between two shots.
    pub fire_rate: u64,
    pub damage: f32,
    /// Units per frame.
    pub projectile_speed: f32,
    pub radius: f32,
    /// Automaton state this tower is tagged with; `None` attacks anything.
    pub gate: Option<String>,
}

impl Default for TowerType {
    fn default() -> Self {
        Self {
            id: 0,
            name: "basic".into(),
            cost: 50,
            range: TOWER_RANGE,
            fire_rate: TOWER_FIRE_RATE,
            damage: TOWER_DAMAGE,
            projectile_speed: PROJECTILE_SPEED,
            radius: TOWER_RADIUS,
            gate: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialTower {
    pub type_id: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRules {
    /// Minimum distance from a tower centre to any path segment.
    pub min_path_clearance: f32,
    /// Minimum distance between two tower centres.
    pub min_tower_spacing: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            min_path_clearance: TOWER_RADIUS + 10.0,
            min_tower_spacing: TOWER_RADIUS * 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Waypoints authored for `world_width` x `world_height`.
    pub path: Vec<Position>,
    pub starting_lives: i32,
    pub starting_money: u32,
    pub enemy: EnemyStats,
    pub tower_types: Vec<TowerType>,
    /// Towers present from the start, free of charge.
    pub initial_towers: Vec<InitialTower>,
    pub waves: WaveConfig,
    pub placement: PlacementRules,
    pub automaton: Option<Automaton>,
}

/// The serpentine path of the original prototype on an 800x600 field.
pub fn default_path() -> Vec<Position> {
    let mid = DEFENSE_WORLD_HEIGHT / 2.0;
    vec![
        Position::new(0.0, mid),
        Position::new(150.0, mid),
        Position::new(150.0, 100.0),
        Position::new(400.0, 100.0),
        Position::new(400.0, 400.0),
        Position::new(650.0, 400.0),
        Position::new(650.0, mid),
        Position::new(DEFENSE_WORLD_WIDTH, mid),
    ]
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            world_width: DEFENSE_WORLD_WIDTH,
            world_height: DEFENSE_WORLD_HEIGHT,
            path: default_path(),
            starting_lives: DEFENSE_STARTING_LIVES,
            starting_money: DEFENSE_STARTING_MONEY,
            enemy: EnemyStats::default(),
            tower_types: vec![
                TowerType::default(),
                TowerType {
                    id: 1,
                    name: "sniper".into(),
                    cost: 120,
                    range: 220.0,
                    fire_rate: 120,
                    damage: 120.0,
                    projectile_speed: 6.0,
                    ..TowerType::default()
                },
                TowerType {
                    id: 2,
                    name: "rapid".into(),
                    cost: 80,
                    range: 90.0,
                    fire_rate: 20,
                    damage: 15.0,
                    projectile_speed: 4.0,
                    ..TowerType::default()
                },
            ],
            initial_towers: Vec::new(),
            waves: WaveConfig::default(),
            placement: PlacementRules::default(),
            automaton: None,
        }
    }
}

impl DefenseConfig {
    /// Four pre-placed gated towers on the serpentine path, large slow
    /// enemies that shrink when hit, Fibonacci waves started on a timer.
    pub fn automaton() -> Self {
        let gated = |id: u32, state: &str| TowerType {
            id,
            name: format!("{state} tower"),
            gate: Some(state.to_string()),
            ..TowerType::default()
        };
        Self {
            enemy: EnemyStats {
                health: ENEMY_HEALTH,
                speed: ENEMY_SPEED,
                radius: ENEMY_RADIUS,
                reward: ENEMY_REWARD,
                hit_shrink: 0.5,
                tape_length: 4,
            },
            tower_types: vec![gated(0, "q0"), gated(1, "q1")],
            initial_towers: vec![
                InitialTower { type_id: 0, x: 250.0, y: 250.0 },
                InitialTower { type_id: 1, x: 350.0, y: 150.0 },
                InitialTower { type_id: 0, x: 550.0, y: 250.0 },
                InitialTower { type_id: 1, x: 700.0, y: 350.0 },
            ],
            waves: WaveConfig {
                formula: WaveFormula::Fibonacci { base: 3 },
                spawn_delay_frames: 120,
                auto_start_delay_frames: Some(180),
                final_wave: Some(8),
                ..WaveConfig::default()
            },
            automaton: Some(Automaton::two_state()),
            ..Self::default()
        }
    }

    pub fn tower_type(&self, id: u32) -> Option<&TowerType> {
        self.tower_types.iter().find(|t| t.id == id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world dimensions must be positive",
        )?;
        require(self.path.len() >= 2, "path needs at least two waypoints")?;
        require(self.starting_lives > 0, "starting_lives must be positive")?;
        require(self.enemy.speed > 0.0, "enemy speed must be positive")?;
        require(self.enemy.health > 0.0, "enemy health must be positive")?;
        require(
            self.enemy.hit_shrink > 0.0 && self.enemy.hit_shrink <= 1.0,
            "enemy hit_shrink must be within (0, 1]",
        )?;
        require(!self.tower_types.is_empty(), "at least one tower type is required")?;

        if let Some(automaton) = &self.automaton {
            automaton.validate()?;
        }

        for (i, tower) in self.tower_types.iter().enumerate() {
            if self.tower_types[..i].iter().any(|t| t.id == tower.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate tower type id {}",
                    tower.id
                )));
            }
            if tower.fire_rate == 0 {
                return Err(ConfigError::Invalid(format!(
                    "tower type {} needs a positive fire_rate",
                    tower.id
                )));
            }
            require(tower.projectile_speed > 0.0, "projectile_speed must be positive")?;
            if let Some(gate) = &tower.gate {
                let known = self.automaton.as_ref().is_some_and(|a| a.has_state(gate));
                if !known {
                    return Err(ConfigError::Invalid(format!(
                        "tower type {} is gated by unknown automaton state '{gate}'",
                        tower.id
                    )));
                }
            }
        }

        for initial in &self.initial_towers {
            if self.tower_type(initial.type_id).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "initial tower references unknown type {}",
                    initial.type_id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(GameConfig::arcade().validate().is_ok());
        assert!(GameConfig::tower_defense().validate().is_ok());
        assert!(GameConfig::automaton_defense().validate().is_ok());
    }

    #[test]
    fn linear_formula_starts_at_base() {
        let formula = WaveFormula::Linear {
            base: ENEMIES_PER_WAVE_BASE,
            increment: 2,
        };
        assert_eq!(formula.enemy_count(0), 5);
        assert_eq!(formula.enemy_count(3), 11);
    }

    #[test]
    fn fibonacci_formula() {
        let formula = WaveFormula::Fibonacci { base: 3 };
        let counts: Vec<u32> = (0..7).map(|w| formula.enemy_count(w)).collect();
        assert_eq!(counts, vec![3, 4, 4, 5, 6, 8, 11]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "seed": 7, "rules": { "mode": "Defense", "starting_money": 500 } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, 7);
        match config.rules {
            Rules::Defense(defense) => {
                assert_eq!(defense.starting_money, 500);
                assert_eq!(defense.path.len(), 8);
                assert_eq!(defense.tower_types.len(), 3);
            }
            Rules::Arcade(_) => panic!("expected defense rules"),
        }
    }

    #[test]
    fn short_path_is_invalid() {
        let mut defense = DefenseConfig::default();
        defense.path.truncate(1);
        assert!(matches!(defense.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn gate_without_automaton_is_invalid() {
        let mut defense = DefenseConfig::automaton();
        defense.automaton = None;
        assert!(defense.validate().is_err());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/drift-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
