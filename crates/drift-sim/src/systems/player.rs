//! Ship control system: turns the frame's held controls into rotation,
//! thrust, thrust particles and bullets.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use drift_core::components::Spin;
use drift_core::config::ArcadeConfig;
use drift_core::constants::*;
use drift_core::enums::PowerUpKind;
use drift_core::types::{Color, Position, Velocity};

use crate::game_state::GameState;
use crate::world_setup;

/// Controls held during the current frame. Rebuilt from intents every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipControls {
    /// +1 counter-clockwise, -1 clockwise.
    pub turn: f32,
    pub thrust: bool,
    pub fire: bool,
}

/// Elapsed seconds of the last shot and the last thrust particle emission.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipClock {
    pub last_shot: Option<f32>,
    pub last_thrust_particle: Option<f32>,
}

impl ShipClock {
    fn due(last: Option<f32>, now: f32, interval: f32) -> bool {
        last.is_none_or(|t| now - t >= interval)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ship: Entity,
    controls: ShipControls,
    clock: &mut ShipClock,
    state: &mut GameState,
    config: &ArcadeConfig,
    elapsed: f32,
    dt: f32,
) {
    let boosted = state.powerups.is_active(PowerUpKind::SpeedBoost);
    let (thrust, max_speed) = if boosted {
        (
            config.ship_thrust * SPEED_BOOST_THRUST_FACTOR,
            config.ship_max_speed * SPEED_BOOST_MAX_SPEED_FACTOR,
        )
    } else {
        (config.ship_thrust, config.ship_max_speed)
    };

    let Ok((pos, vel, spin)) =
        world.query_one_mut::<(&Position, &mut Velocity, &mut Spin)>(ship)
    else {
        return;
    };

    spin.rotation += controls.turn.clamp(-1.0, 1.0) * config.ship_rotation_speed * dt;
    let heading = Vec2::from_angle(spin.rotation);

    if controls.thrust {
        let accelerated = vel.to_vec2() + heading * thrust * dt;
        *vel = Velocity::from(accelerated).clamped(max_speed);
    }

    let (origin, ship_vel, rotation) = (*pos, *vel, spin.rotation);

    if controls.thrust && ShipClock::due(clock.last_thrust_particle, elapsed, THRUST_PARTICLE_INTERVAL)
    {
        emit_thrust(world, rng, origin, heading);
        clock.last_thrust_particle = Some(elapsed);
    }

    let cooldown = if state.powerups.is_active(PowerUpKind::RapidFire) {
        config.bullet_cooldown_rapid
    } else {
        config.bullet_cooldown
    };
    if controls.fire && ShipClock::due(clock.last_shot, elapsed, cooldown) {
        let angles: &[f32] = if state.powerups.is_active(PowerUpKind::MultiShot) {
            &[-MULTI_SHOT_SPREAD, 0.0, MULTI_SHOT_SPREAD]
        } else {
            &[0.0]
        };
        for offset in angles {
            let dir = Vec2::from_angle(rotation + offset);
            let muzzle = origin.to_vec2() + dir * SHIP_RADIUS;
            let velocity = dir * config.bullet_speed + ship_vel.to_vec2() * BULLET_INHERIT_FACTOR;
            world_setup::spawn_bullet(
                world,
                muzzle.into(),
                velocity.into(),
                config.bullet_lifetime,
            );
        }
        clock.last_shot = Some(elapsed);
    }
}

fn emit_thrust(world: &mut World, rng: &mut ChaCha8Rng, ship: Position, heading: Vec2) {
    let exhaust = ship.to_vec2() - heading * 0.08;
    for _ in 0..2 {
        let color = Color::new(0.0, 0.5 + rng.gen::<f32>() * 0.5, 1.0);
        let speed = 0.15 + rng.gen::<f32>() * 0.1;
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 0.05;
        let lifetime = 0.2 + rng.gen::<f32>() * 0.2;
        world_setup::spawn_particle(
            world,
            exhaust.into(),
            (-heading * speed + jitter).into(),
            color,
            lifetime,
            THRUST_PARTICLE_FRICTION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::components::Kind;
    use drift_core::enums::EntityKind;
    use rand::SeedableRng;

    fn setup() -> (World, ChaCha8Rng, Entity, ArcadeConfig, GameState) {
        let config = ArcadeConfig::default();
        let mut world = World::new();
        let ship = world_setup::spawn_ship(&mut world, &config);
        let state = GameState::for_arcade(&config);
        (world, ChaCha8Rng::seed_from_u64(3), ship, config, state)
    }

    fn bullets(world: &World) -> usize {
        world
            .query::<&Kind>()
            .iter()
            .filter(|(_, k)| k.0 == EntityKind::Bullet)
            .count()
    }

    #[test]
    fn fire_respects_cooldown() {
        let (mut world, mut rng, ship, config, mut state) = setup();
        let mut clock = ShipClock::default();
        let fire = ShipControls {
            fire: true,
            ..Default::default()
        };
        run(&mut world, &mut rng, ship, fire, &mut clock, &mut state, &config, 0.0, DT);
        run(&mut world, &mut rng, ship, fire, &mut clock, &mut state, &config, 0.1, DT);
        assert_eq!(bullets(&world), 1);
        run(&mut world, &mut rng, ship, fire, &mut clock, &mut state, &config, 0.2, DT);
        assert_eq!(bullets(&world), 2);
    }

    #[test]
    fn multi_shot_fires_three() {
        let (mut world, mut rng, ship, config, mut state) = setup();
        state.powerups.activate(PowerUpKind::MultiShot, 8.0);
        let mut clock = ShipClock::default();
        let fire = ShipControls {
            fire: true,
            ..Default::default()
        };
        run(&mut world, &mut rng, ship, fire, &mut clock, &mut state, &config, 0.0, DT);
        assert_eq!(bullets(&world), 3);
    }

    #[test]
    fn thrust_is_capped_at_max_speed() {
        let (mut world, mut rng, ship, config, mut state) = setup();
        let mut clock = ShipClock::default();
        let thrust = ShipControls {
            thrust: true,
            ..Default::default()
        };
        for i in 0..600 {
            run(
                &mut world,
                &mut rng,
                ship,
                thrust,
                &mut clock,
                &mut state,
                &config,
                i as f32 * DT,
                DT,
            );
        }
        let speed = world.get::<&Velocity>(ship).unwrap().speed();
        assert!(speed <= config.ship_max_speed + 1e-4);
        assert!(speed > 0.9);
    }
}
