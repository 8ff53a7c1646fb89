//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the ship, background, hazards, particles, enemies, towers and
//! projectiles with appropriate component bundles.

use std::f32::consts::{FRAC_PI_2, TAU};

use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use drift_core::automaton::Automaton;
use drift_core::components::*;
use drift_core::config::{ArcadeConfig, DefenseConfig, EnemyStats, TowerType};
use drift_core::constants::*;
use drift_core::enums::*;
use drift_core::types::{Color, Position, Velocity};

use crate::combat::{FireGate, Projectile, Targeting, Tower};

pub const SHIP_COLOR: Color = Color::new(0.2, 0.8, 1.0);
pub const ASTEROID_COLOR: Color = Color::new(0.7, 0.4, 0.2);
pub const HUNTER_COLOR: Color = Color::new(1.0, 0.2, 0.2);
pub const ENEMY_COLOR: Color = Color::new(0.9, 0.2, 0.3);
pub const TOWER_COLOR: Color = Color::new(0.3, 0.5, 1.0);
pub const PROJECTILE_COLOR: Color = Color::new(1.0, 0.9, 0.3);

pub fn powerup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::RapidFire => Color::new(1.0, 1.0, 0.0),
        PowerUpKind::Shield => Color::new(0.0, 1.0, 1.0),
        PowerUpKind::MultiShot => Color::new(1.0, 0.0, 1.0),
        PowerUpKind::SpeedBoost => Color::new(0.0, 1.0, 0.0),
        PowerUpKind::LifeUp => Color::new(1.0, 0.0, 0.0),
    }
}

/// Gated tower colours, cycled by automaton state index.
const GATE_PALETTE: [Color; 4] = [
    Color::new(0.2, 0.6, 1.0),
    Color::new(0.2, 1.0, 0.4),
    Color::new(1.0, 0.6, 0.2),
    Color::new(0.8, 0.3, 1.0),
];

/// Colour of a tower gated on `gate`; ungated towers use `TOWER_COLOR`.
pub fn gate_color(gate: Option<&str>, automaton: Option<&Automaton>) -> Color {
    let Some(gate) = gate else {
        return TOWER_COLOR;
    };
    let index = automaton.and_then(|a| a.state_index(gate)).unwrap_or(0);
    GATE_PALETTE[index % GATE_PALETTE.len()]
}

// --- Arcade ---

/// Set up the initial arcade world: ship, background stars, a few asteroids.
/// Returns the ship handle.
pub fn setup_arcade(world: &mut World, rng: &mut ChaCha8Rng, config: &ArcadeConfig) -> Entity {
    let ship = spawn_ship(world, config);
    for _ in 0..config.background_stars {
        spawn_star(world, rng, config);
    }
    for _ in 0..config.initial_asteroids {
        spawn_asteroid(world, rng, config);
    }
    ship
}

/// Spawn the player's ship at the origin, nose up.
pub fn spawn_ship(world: &mut World, config: &ArcadeConfig) -> Entity {
    world.spawn((
        Kind(EntityKind::Ship),
        Active(true),
        Position::ORIGIN,
        Velocity::default(),
        Spin {
            rotation: FRAC_PI_2,
            angular_velocity: 0.0,
        },
        Friction(config.ship_friction),
        Body {
            radius: SHIP_RADIUS,
        },
        Wraps,
        Appearance::solid(SHIP_COLOR),
        Shape::Polygon(vec![[0.08, 0.0], [-0.05, 0.05], [-0.02, 0.0], [-0.05, -0.05]]),
    ))
}

pub fn spawn_star(world: &mut World, rng: &mut ChaCha8Rng, config: &ArcadeConfig) -> Entity {
    let size = 0.002 + rng.gen::<f32>() * 0.003;
    let brightness = 0.3 + rng.gen::<f32>() * 0.7;
    let position = Position::new(
        (rng.gen::<f32>() - 0.5) * config.world_width,
        (rng.gen::<f32>() - 0.5) * config.world_height,
    );
    world.spawn((
        Kind(EntityKind::Star),
        Active(true),
        position,
        Body { radius: size },
        Appearance {
            color: Color::gray(brightness),
            alpha: 1.0,
            scale: 1.0,
            pulse_speed: 0.5 + rng.gen::<f32>(),
            pulse_offset: rng.gen::<f32>() * TAU,
        },
        Shape::Circle,
    ))
}

/// Irregular hexagon with per-vertex radius jitter of 0.7..1.3.
fn asteroid_outline(rng: &mut ChaCha8Rng, base_radius: f32) -> Vec<[f32; 2]> {
    (0..ASTEROID_SIDES)
        .map(|i| {
            let angle = TAU * i as f32 / ASTEROID_SIDES as f32;
            let r = base_radius * (0.7 + rng.gen::<f32>() * 0.6);
            [r * angle.cos(), r * angle.sin()]
        })
        .collect()
}

/// Spawn an asteroid on a random screen edge, partially visible, drifting
/// inward.
pub fn spawn_asteroid(world: &mut World, rng: &mut ChaCha8Rng, config: &ArcadeConfig) -> Entity {
    let radius = ASTEROID_MIN_RADIUS + rng.gen::<f32>() * ASTEROID_RADIUS_JITTER;
    let (hw, hh) = (config.half_width(), config.half_height());
    let offset = radius / 2.0;
    let inward = 0.1 + rng.gen::<f32>() * 0.3;
    let (position, velocity) = match rng.gen_range(0..4) {
        0 => (
            Position::new((rng.gen::<f32>() - 0.5) * config.world_width, hh + offset),
            Velocity::new(0.0, -inward),
        ),
        1 => (
            Position::new(hw + offset, (rng.gen::<f32>() - 0.5) * config.world_height),
            Velocity::new(-inward, 0.0),
        ),
        2 => (
            Position::new((rng.gen::<f32>() - 0.5) * config.world_width, -hh - offset),
            Velocity::new(0.0, inward),
        ),
        _ => (
            Position::new(-hw - offset, (rng.gen::<f32>() - 0.5) * config.world_height),
            Velocity::new(inward, 0.0),
        ),
    };
    spawn_asteroid_at(world, rng, position, velocity, radius)
}

pub fn spawn_asteroid_at(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    velocity: Velocity,
    radius: f32,
) -> Entity {
    let outline = asteroid_outline(rng, radius);
    world.spawn((
        Kind(EntityKind::Asteroid),
        Active(true),
        position,
        velocity,
        Spin {
            rotation: 0.0,
            angular_velocity: (rng.gen::<f32>() - 0.5) * 2.0,
        },
        Friction(1.0),
        Body { radius },
        Wraps,
        Appearance::solid(ASTEROID_COLOR),
        Shape::Polygon(outline),
    ))
}

pub fn spawn_hunter(world: &mut World, position: Position) -> Entity {
    let h = HUNTER_RADIUS;
    world.spawn((
        Kind(EntityKind::Hunter),
        Active(true),
        position,
        Velocity::default(),
        Spin::default(),
        Friction(HUNTER_FRICTION),
        Body { radius: h },
        Wraps,
        Chaser {
            acceleration: HUNTER_ACCELERATION,
        },
        Appearance::solid(HUNTER_COLOR),
        Shape::Polygon(vec![[-h, -h], [h, -h], [h, h], [-h, h]]),
    ))
}

pub fn spawn_powerup(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &ArcadeConfig,
    position: Position,
) -> Entity {
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    world.spawn((
        Kind(EntityKind::PowerUp),
        Active(true),
        position,
        Body {
            radius: POWERUP_RADIUS,
        },
        Lifetime {
            remaining: config.powerup_lifetime,
        },
        PowerUp { kind },
        Appearance {
            color: powerup_color(kind),
            alpha: 1.0,
            scale: 1.0,
            pulse_speed: POWERUP_PULSE_SPEED,
            pulse_offset: rng.gen::<f32>() * TAU,
        },
        Shape::Polygon(vec![[0.0, 0.05], [-0.03, 0.0], [0.0, -0.05], [0.03, 0.0]]),
    ))
}

pub fn spawn_bullet(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    lifetime: f32,
) -> Entity {
    world.spawn((
        Kind(EntityKind::Bullet),
        Active(true),
        position,
        velocity,
        Friction(1.0),
        Body {
            radius: BULLET_RADIUS,
        },
        Lifetime {
            remaining: lifetime,
        },
        Appearance::solid(Color::WHITE),
        Shape::Circle,
    ))
}

/// A free particle. Alpha tracks the remaining lifetime.
pub fn spawn_particle(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    color: Color,
    lifetime: f32,
    friction: f32,
) -> Entity {
    world.spawn((
        Kind(EntityKind::Particle),
        Active(true),
        position,
        velocity,
        Friction(friction),
        Body {
            radius: PARTICLE_RADIUS,
        },
        Lifetime {
            remaining: lifetime,
        },
        Appearance::solid(color),
        Shape::Circle,
    ))
}

/// Burst of `count` particles flying out in random directions.
pub fn spawn_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    color: Color,
    count: u32,
) {
    for _ in 0..count {
        let angle = rng.gen::<f32>() * TAU;
        let speed = 0.1 + rng.gen::<f32>() * 0.5;
        let lifetime = 1.0 + rng.gen::<f32>() * 0.5;
        spawn_particle(
            world,
            position,
            Velocity::from_angle(angle, speed),
            color,
            lifetime,
            PARTICLE_FRICTION,
        );
    }
}

// --- Defense ---

/// Place the configured starting towers. They cost nothing and skip
/// placement validation.
pub fn setup_defense(world: &mut World, config: &DefenseConfig) {
    for initial in &config.initial_towers {
        if let Some(tower_type) = config.tower_type(initial.type_id) {
            spawn_tower(
                world,
                tower_type,
                Position::new(initial.x, initial.y),
                config.automaton.as_ref(),
            );
        }
    }
}

pub fn spawn_tower(
    world: &mut World,
    tower_type: &TowerType,
    position: Position,
    automaton: Option<&Automaton>,
) -> Entity {
    world.spawn((
        Kind(EntityKind::Tower),
        Active(true),
        position,
        Body {
            radius: tower_type.radius,
        },
        Tower::from_type(tower_type),
        FireGate::new(tower_type.fire_rate),
        Targeting::default(),
        Appearance::solid(gate_color(tower_type.gate.as_deref(), automaton)),
        Shape::Circle,
    ))
}

/// Spawn an enemy at the start of the path. With an automaton configured the
/// enemy carries a random symbol tape.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stats: &EnemyStats,
    start: Position,
    automaton: Option<&Automaton>,
) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add_bundle((
        Kind(EntityKind::Enemy),
        Active(true),
        start,
        Body {
            radius: stats.radius,
        },
        Health::full(stats.health),
        PathFollower {
            path_index: 0,
            speed: stats.speed,
            reward: stats.reward,
        },
        Appearance::solid(ENEMY_COLOR),
        Shape::Circle,
    ));
    if automaton.is_some() {
        let symbols = (0..stats.tape_length)
            .map(|_| if rng.gen::<bool>() { Symbol::A } else { Symbol::B })
            .collect();
        builder.add(SymbolTape::new(symbols));
    }
    world.spawn(builder.build())
}

pub fn spawn_projectile(
    world: &mut World,
    position: Position,
    tower: &Tower,
    target: Entity,
) -> Entity {
    world.spawn((
        Kind(EntityKind::Projectile),
        Active(true),
        position,
        Body {
            radius: PROJECTILE_RADIUS,
        },
        Projectile {
            target,
            speed: tower.projectile_speed,
            damage: tower.damage,
            tower_type: tower.type_id,
            gate_state: tower.gate.clone(),
        },
        Appearance::solid(PROJECTILE_COLOR),
        Shape::Circle,
    ))
}
