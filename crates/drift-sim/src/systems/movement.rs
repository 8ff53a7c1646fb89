//! Kinematic integration and kind-specific motion.
//!
//! position += velocity * dt, rotation += angular_velocity * dt,
//! velocity *= friction, finite lifetimes count down.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use drift_core::components::*;
use drift_core::constants::*;
use drift_core::enums::EntityKind;
use drift_core::types::{Color, Position, Velocity};

use crate::world_setup;

/// Integrate every active entity. Entities whose lifetime runs out are
/// deactivated.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (active, pos, vel, friction)) in world.query_mut::<(
        &Active,
        &mut Position,
        &mut Velocity,
        Option<&Friction>,
    )>() {
        if !active.0 {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        if let Some(friction) = friction {
            *vel = vel.scaled(friction.0);
        }
    }

    for (_entity, (active, spin)) in world.query_mut::<(&Active, &mut Spin)>() {
        if active.0 {
            spin.rotation += spin.angular_velocity * dt;
        }
    }

    for (_entity, (active, lifetime)) in world.query_mut::<(&mut Active, &mut Lifetime)>() {
        if !active.0 {
            continue;
        }
        lifetime.remaining -= dt;
        if lifetime.remaining <= 0.0 {
            active.0 = false;
        }
    }
}

/// Accelerate chasers toward the ship.
pub fn steer_chasers(world: &mut World, ship: Entity, dt: f32) {
    let Some(target) = world
        .get::<&Position>(ship)
        .ok()
        .map(|p| p.to_vec2())
    else {
        return;
    };
    for (_entity, (active, pos, vel, chaser)) in
        world.query_mut::<(&Active, &Position, &mut Velocity, &Chaser)>()
    {
        if !active.0 {
            continue;
        }
        let dir = (target - pos.to_vec2()).normalize_or_zero();
        *vel = (vel.to_vec2() + dir * chaser.acceleration * dt).into();
    }
}

/// Screen wrap for `Wraps` entities. While an entity crosses an edge
/// outward it sheds sparks; once fully off-screen it reappears just beyond
/// the opposite edge.
pub fn wrap(world: &mut World, rng: &mut ChaCha8Rng, half_width: f32, half_height: f32) {
    let mut sparks: Vec<(Position, Velocity, Color)> = Vec::new();

    for (_entity, (active, pos, vel, body, look, _wraps)) in world.query_mut::<(
        &Active,
        &mut Position,
        &Velocity,
        &Body,
        &Appearance,
        &Wraps,
    )>() {
        if !active.0 {
            continue;
        }
        let near = body.radius * 0.8;
        if vel.x > 0.0 && pos.x + near > half_width {
            let drift = Vec2::new((rng.gen::<f32>() - 1.0) * 0.1 - vel.x * 0.1, spark_jitter(rng));
            sparks.push((Position::new(half_width, pos.y), drift.into(), look.color));
        } else if vel.x < 0.0 && pos.x - near < -half_width {
            let drift = Vec2::new(rng.gen::<f32>() * 0.1 - vel.x * 0.1, spark_jitter(rng));
            sparks.push((Position::new(-half_width, pos.y), drift.into(), look.color));
        }
        if vel.y > 0.0 && pos.y + near > half_height {
            let drift = Vec2::new(spark_jitter(rng), (rng.gen::<f32>() - 1.0) * 0.1 - vel.y * 0.1);
            sparks.push((Position::new(pos.x, half_height), drift.into(), look.color));
        } else if vel.y < 0.0 && pos.y - near < -half_height {
            let drift = Vec2::new(spark_jitter(rng), rng.gen::<f32>() * 0.1 - vel.y * 0.1);
            sparks.push((Position::new(pos.x, -half_height), drift.into(), look.color));
        }

        let r = body.radius;
        if pos.x > half_width + r {
            pos.x = -half_width - r + WRAP_BUFFER;
        } else if pos.x < -half_width - r {
            pos.x = half_width + r - WRAP_BUFFER;
        }
        if pos.y > half_height + r {
            pos.y = -half_height - r + WRAP_BUFFER;
        } else if pos.y < -half_height - r {
            pos.y = half_height + r - WRAP_BUFFER;
        }
    }

    for (position, velocity, color) in sparks {
        world_setup::spawn_particle(
            world,
            position,
            velocity,
            color,
            EDGE_SPARK_LIFETIME,
            PARTICLE_FRICTION,
        );
    }
}

fn spark_jitter(rng: &mut ChaCha8Rng) -> f32 {
    (rng.gen::<f32>() - 0.5) * 0.2
}

/// Deactivate bullets that left the screen by more than the margin.
pub fn cull_bullets(world: &mut World, half_width: f32, half_height: f32) {
    let (mx, my) = (
        half_width + BULLET_OFFSCREEN_MARGIN,
        half_height + BULLET_OFFSCREEN_MARGIN,
    );
    for (_entity, (kind, active, pos)) in world.query_mut::<(&Kind, &mut Active, &Position)>() {
        if kind.0 == EntityKind::Bullet && (pos.x.abs() > mx || pos.y.abs() > my) {
            active.0 = false;
        }
    }
}

/// Power-ups pulse, stars twinkle, particles fade with their lifetime.
pub fn animate(world: &mut World, elapsed: f32) {
    for (_entity, (kind, look, lifetime)) in
        world.query_mut::<(&Kind, &mut Appearance, Option<&Lifetime>)>()
    {
        let phase = elapsed * look.pulse_speed + look.pulse_offset;
        match kind.0 {
            EntityKind::PowerUp => look.scale = 1.0 + 0.2 * phase.sin(),
            EntityKind::Star => look.alpha = 0.3 + 0.7 * (0.5 + 0.5 * phase.sin()),
            EntityKind::Particle => {
                if let Some(lifetime) = lifetime {
                    look.alpha = lifetime.remaining.clamp(0.0, 1.0);
                }
            }
            _ => {}
        }
    }
}
