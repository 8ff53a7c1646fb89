//! Arcade collisions: the ship against hazards and power-ups, bullets
//! against asteroids and hunters.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use drift_core::components::*;
use drift_core::config::ArcadeConfig;
use drift_core::constants::POWERUP_BURST_PARTICLES;
use drift_core::enums::{EntityKind, PowerUpKind};
use drift_core::events::GameEvent;
use drift_core::types::{check_collision, Color, Position, Velocity};

use crate::game_state::GameState;
use crate::systems::spawner;
use crate::world_setup;

#[derive(Clone, Copy)]
struct Collider {
    entity: Entity,
    kind: EntityKind,
    position: Position,
    radius: f32,
    color: Color,
}

fn active_colliders(world: &World, filter: impl Fn(EntityKind) -> bool) -> Vec<Collider> {
    world
        .query::<(&Kind, &Active, &Position, &Body, &Appearance)>()
        .iter()
        .filter(|(_, (kind, active, ..))| active.0 && filter(kind.0))
        .map(|(entity, (kind, _, position, body, look))| Collider {
            entity,
            kind: kind.0,
            position: *position,
            radius: body.radius,
            color: look.color,
        })
        .collect()
}

fn deactivate(world: &mut World, entity: Entity) {
    if let Ok(mut active) = world.get::<&mut Active>(entity) {
        active.0 = false;
    }
}

fn explode(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    at: Position,
    color: Color,
    particles: u32,
    events: &mut Vec<GameEvent>,
) {
    world_setup::spawn_explosion(world, rng, at, color, particles);
    events.push(GameEvent::Explosion {
        x: at.x,
        y: at.y,
        particles,
    });
}

fn ship_body(world: &mut World, ship: Entity) -> Option<(Position, f32)> {
    world
        .query_one_mut::<(&Position, &Body)>(ship)
        .ok()
        .map(|(p, b)| (*p, b.radius))
}

/// Ship against hazards, then against power-ups at its post-hit position.
pub fn ship_collisions(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ship: Entity,
    state: &mut GameState,
    config: &ArcadeConfig,
    events: &mut Vec<GameEvent>,
) {
    let Some((ship_pos, ship_radius)) = ship_body(world, ship) else {
        return;
    };

    let hazards: Vec<Collider> = active_colliders(world, EntityKind::is_hazard)
        .into_iter()
        .filter(|c| check_collision(&ship_pos, ship_radius, &c.position, c.radius))
        .collect();

    for hazard in hazards {
        let shielded = state.powerups.is_active(PowerUpKind::Shield);
        if !shielded {
            state.lives -= 1;
            if let Ok((pos, vel)) = world.query_one_mut::<(&mut Position, &mut Velocity)>(ship) {
                *pos = Position::ORIGIN;
                *vel = Velocity::default();
            }
        }
        events.push(GameEvent::ShipHit {
            lives: state.lives,
            shielded,
        });
        deactivate(world, hazard.entity);
        explode(
            world,
            rng,
            hazard.position,
            hazard.color,
            config.explosion_particles,
            events,
        );
        if !shielded {
            // The ship has left; remaining hazards no longer touch it.
            break;
        }
    }

    let Some((ship_pos, ship_radius)) = ship_body(world, ship) else {
        return;
    };
    let powerups: Vec<Collider> = active_colliders(world, |k| k == EntityKind::PowerUp)
        .into_iter()
        .filter(|c| check_collision(&ship_pos, ship_radius, &c.position, c.radius))
        .collect();

    for other in powerups {
        let Ok(kind) = world.get::<&PowerUp>(other.entity).map(|p| p.kind) else {
            continue;
        };
        collect_powerup(state, config, kind);
        events.push(GameEvent::PowerUpCollected { kind });
        deactivate(world, other.entity);
        explode(
            world,
            rng,
            other.position,
            other.color,
            POWERUP_BURST_PARTICLES,
            events,
        );
    }
}

fn collect_powerup(state: &mut GameState, config: &ArcadeConfig, kind: PowerUpKind) {
    match kind {
        PowerUpKind::LifeUp => state.lives += 1,
        timed => state.powerups.activate(timed, config.powerup_duration),
    }
    state.score = state.score.saturating_add(config.score_powerup);
    state.stats.powerups_collected += 1;
    log::debug!("collected {}", kind.label());
}

/// Every active bullet against every active asteroid and hunter. The first
/// overlapping target wins; both are deactivated.
pub fn bullet_collisions(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    config: &ArcadeConfig,
    events: &mut Vec<GameEvent>,
) {
    let bullets = active_colliders(world, |k| k == EntityKind::Bullet);
    let targets = active_colliders(world, EntityKind::is_bullet_target);
    let mut destroyed = vec![false; targets.len()];

    for bullet in &bullets {
        let hit = targets.iter().enumerate().position(|(i, t)| {
            !destroyed[i] && check_collision(&bullet.position, bullet.radius, &t.position, t.radius)
        });
        let Some(index) = hit else {
            continue;
        };
        destroyed[index] = true;
        let target = targets[index];

        deactivate(world, bullet.entity);
        deactivate(world, target.entity);
        explode(
            world,
            rng,
            target.position,
            target.color,
            config.explosion_particles,
            events,
        );

        let score = if target.kind == EntityKind::Asteroid {
            state.stats.asteroids_destroyed += 1;
            config.score_asteroid
        } else {
            state.stats.hunters_destroyed += 1;
            config.score_hunter
        };
        state.score = state.score.saturating_add(score);
        events.push(GameEvent::Destroyed {
            kind: target.kind,
            score,
        });

        if rng.gen::<f32>() < config.powerup_drop_chance {
            let at = spawner::powerup_drop_position(rng, config);
            world_setup::spawn_powerup(world, rng, config, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn count(world: &World, kind: EntityKind) -> usize {
        world
            .query::<&Kind>()
            .iter()
            .filter(|(_, k)| k.0 == kind)
            .count()
    }

    #[test]
    fn shield_absorbs_hit() {
        let config = ArcadeConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ship = world_setup::spawn_ship(&mut world, &config);
        let rock = world_setup::spawn_asteroid_at(
            &mut world,
            &mut rng,
            Position::new(0.05, 0.0),
            Velocity::default(),
            0.1,
        );
        let mut state = GameState::for_arcade(&config);
        state.powerups.activate(PowerUpKind::Shield, 8.0);
        let mut events = Vec::new();

        ship_collisions(&mut world, &mut rng, ship, &mut state, &config, &mut events);

        assert_eq!(state.lives, 3);
        assert!(!world.get::<&Active>(rock).unwrap().0);
        assert_eq!(count(&world, EntityKind::Particle), 8);
        assert!(events.contains(&GameEvent::ShipHit {
            lives: 3,
            shielded: true
        }));
    }

    #[test]
    fn powerups_checked_at_respawn_position() {
        let config = ArcadeConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ship = world_setup::spawn_ship(&mut world, &config);
        let away = Position::new(0.5, 0.0);
        *world.get::<&mut Position>(ship).unwrap() = away;
        world_setup::spawn_asteroid_at(&mut world, &mut rng, away, Velocity::default(), 0.1);
        let left_behind = world_setup::spawn_powerup(&mut world, &mut rng, &config, away);
        let at_origin = world_setup::spawn_powerup(&mut world, &mut rng, &config, Position::ORIGIN);
        let mut state = GameState::for_arcade(&config);
        let mut events = Vec::new();

        ship_collisions(&mut world, &mut rng, ship, &mut state, &config, &mut events);

        assert_eq!(*world.get::<&Position>(ship).unwrap(), Position::ORIGIN);
        assert!(world.get::<&Active>(left_behind).unwrap().0);
        assert!(!world.get::<&Active>(at_origin).unwrap().0);
        assert_eq!(state.stats.powerups_collected, 1);
    }

    #[test]
    fn bullet_destroys_one_target() {
        let config = ArcadeConfig {
            powerup_drop_chance: 0.0,
            ..ArcadeConfig::default()
        };
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bullet = world_setup::spawn_bullet(
            &mut world,
            Position::new(0.5, 0.5),
            Velocity::default(),
            3.0,
        );
        let a = world_setup::spawn_asteroid_at(
            &mut world,
            &mut rng,
            Position::new(0.52, 0.5),
            Velocity::default(),
            0.08,
        );
        let b = world_setup::spawn_hunter(&mut world, Position::new(0.48, 0.5));
        let mut state = GameState::for_arcade(&config);
        let mut events = Vec::new();

        bullet_collisions(&mut world, &mut rng, &mut state, &config, &mut events);

        assert!(!world.get::<&Active>(bullet).unwrap().0);
        let a_alive = world.get::<&Active>(a).unwrap().0;
        let b_alive = world.get::<&Active>(b).unwrap().0;
        assert!(a_alive ^ b_alive, "exactly one target destroyed");
        assert!(state.score == 10 || state.score == 25);
    }

    #[test]
    fn life_up_adds_life() {
        let config = ArcadeConfig::default();
        let mut state = GameState::for_arcade(&config);
        collect_powerup(&mut state, &config, PowerUpKind::LifeUp);
        assert_eq!(state.lives, 4);
        assert_eq!(state.score, 50);
        assert!(state.powerups.views().is_empty());
    }
}
