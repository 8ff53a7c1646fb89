//! Simulation constants and tuning parameters.
//!
//! These are the defaults baked into the configuration presets; the engine
//! itself reads every tunable through `config`.

/// Nominal frame rate (Hz) for fixed-step runs.
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the nominal frame rate.
pub const DT: f32 = 1.0 / FRAME_RATE as f32;

// --- Arcade world ---

/// World width in normalized units (x spans -1.0..1.0).
pub const ARCADE_WORLD_WIDTH: f32 = 2.0;

/// World height in normalized units (y spans -0.8..0.8).
pub const ARCADE_WORLD_HEIGHT: f32 = 1.6;

/// Teleport overlap when an object wraps to the opposite edge.
pub const WRAP_BUFFER: f32 = 0.01;

/// Distance beyond an edge at which bullets are discarded.
pub const BULLET_OFFSCREEN_MARGIN: f32 = 0.1;

// --- Ship ---

pub const SHIP_THRUST: f32 = 3.0;
pub const SHIP_ROTATION_SPEED: f32 = 5.0;
pub const SHIP_MAX_SPEED: f32 = 1.0;
pub const SHIP_RADIUS: f32 = 0.06;
pub const SHIP_FRICTION: f32 = 0.98;
pub const SHIP_STARTING_LIVES: i32 = 3;

/// Thrust multiplier while speed boost is active.
pub const SPEED_BOOST_THRUST_FACTOR: f32 = 1.5;

/// Max-speed multiplier while speed boost is active.
pub const SPEED_BOOST_MAX_SPEED_FACTOR: f32 = 1.3;

// --- Bullets ---

pub const BULLET_SPEED: f32 = 2.0;
pub const BULLET_LIFETIME: f32 = 3.0;
pub const BULLET_RADIUS: f32 = 0.01;
pub const BULLET_COOLDOWN_NORMAL: f32 = 0.2;
pub const BULLET_COOLDOWN_RAPID: f32 = 0.08;

/// Fraction of the ship velocity inherited by a bullet.
pub const BULLET_INHERIT_FACTOR: f32 = 0.5;

/// Angular spread between multi-shot bullets (radians).
pub const MULTI_SHOT_SPREAD: f32 = 0.3;

// --- Spawning ---

pub const ASTEROID_BASE_SPAWN_RATE: f32 = 2.0;
pub const HUNTER_BASE_SPAWN_RATE: f32 = 8.0;
pub const POWERUP_DROP_CHANCE: f32 = 0.15;
pub const INITIAL_ASTEROIDS: u32 = 3;
pub const BACKGROUND_STARS: u32 = 150;

/// Minimum distance between a freshly spawned hunter and the ship.
pub const HUNTER_SAFE_DISTANCE: f32 = 0.3;

/// Attempts at rejection sampling before falling back to the farthest corner.
pub const MAX_SPAWN_ATTEMPTS: u32 = 32;

pub const ASTEROID_MIN_RADIUS: f32 = 0.08;
pub const ASTEROID_RADIUS_JITTER: f32 = 0.05;
pub const ASTEROID_SIDES: usize = 6;
pub const HUNTER_RADIUS: f32 = 0.06;
pub const HUNTER_FRICTION: f32 = 0.99;

/// Steering acceleration of hunters toward the ship.
pub const HUNTER_ACCELERATION: f32 = 0.5;

// --- Power-ups ---

pub const POWERUP_DURATION: f32 = 8.0;
pub const POWERUP_LIFETIME: f32 = 15.0;
pub const POWERUP_RADIUS: f32 = 0.04;
pub const POWERUP_PULSE_SPEED: f32 = 3.0;

// --- Particles ---

pub const EXPLOSION_PARTICLES: u32 = 8;
pub const POWERUP_BURST_PARTICLES: u32 = 6;
pub const PARTICLE_FRICTION: f32 = 0.95;
pub const PARTICLE_RADIUS: f32 = 0.005;
pub const THRUST_PARTICLE_INTERVAL: f32 = 0.03;
pub const THRUST_PARTICLE_FRICTION: f32 = 0.92;
pub const EDGE_SPARK_LIFETIME: f32 = 0.3;

// --- Scoring ---

pub const SCORE_ASTEROID: u32 = 10;
pub const SCORE_HUNTER: u32 = 25;
pub const SCORE_POWERUP: u32 = 50;
pub const SCORE_WAVE_BONUS: u32 = 100;

// --- Difficulty ---

pub const DIFFICULTY_INCREASE_RATE: f32 = 0.1;
pub const WAVE_DURATION: f32 = 30.0;

// --- Defense world ---

pub const DEFENSE_WORLD_WIDTH: f32 = 800.0;
pub const DEFENSE_WORLD_HEIGHT: f32 = 600.0;
pub const DEFENSE_STARTING_LIVES: i32 = 10;
pub const DEFENSE_STARTING_MONEY: u32 = 100;
pub const ENEMIES_PER_WAVE_BASE: u32 = 5;
pub const ENEMIES_PER_WAVE_INCREMENT: u32 = 2;

pub const ENEMY_HEALTH: f32 = 100.0;
pub const ENEMY_RADIUS: f32 = 60.0;
pub const ENEMY_SPEED: f32 = 0.8 / 3.0;
pub const ENEMY_REWARD: u32 = 10;

pub const TOWER_RADIUS: f32 = 20.0;
pub const TOWER_RANGE: f32 = 120.0;

/// Frames between shots of the basic tower.
pub const TOWER_FIRE_RATE: u64 = 60;
pub const TOWER_DAMAGE: f32 = 50.0;
pub const PROJECTILE_SPEED: f32 = 3.0;
pub const PROJECTILE_RADIUS: f32 = 6.0;

/// Longest frame the engine will integrate in one tick (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;
