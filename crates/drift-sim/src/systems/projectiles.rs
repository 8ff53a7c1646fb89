//! Homing projectiles. Each frame the target handle is re-resolved; a
//! missing, inactive or no-longer-attackable target neutralizes the
//! projectile without damage.

use hecs::{Entity, World};

use drift_core::automaton::Automaton;
use drift_core::components::{Active, Body, Health, PathFollower, SymbolTape};
use drift_core::events::GameEvent;
use drift_core::types::{check_collision, Position};

use crate::combat::{may_attack, Projectile};
use crate::game_state::GameState;

enum Outcome {
    Neutralized,
    Moving(Position),
    Hit,
}

pub fn run(
    world: &mut World,
    automaton: Option<&Automaton>,
    hit_shrink: f32,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) {
    let projectiles: Vec<(Entity, Position, f32, Projectile)> = world
        .query::<(&Active, &Position, &Body, &Projectile)>()
        .iter()
        .filter(|(_, (active, ..))| active.0)
        .map(|(e, (_, pos, body, proj))| (e, *pos, body.radius, proj.clone()))
        .collect();

    for (entity, mut pos, radius, projectile) in projectiles {
        let outcome = advance(world, &mut pos, radius, &projectile, automaton);
        match outcome {
            Outcome::Neutralized => {
                deactivate(world, entity);
                events.push(GameEvent::ProjectileNeutralized);
            }
            Outcome::Moving(next) => {
                if let Ok(mut p) = world.get::<&mut Position>(entity) {
                    *p = next;
                }
            }
            Outcome::Hit => {
                deactivate(world, entity);
                apply_hit(world, &projectile, automaton, hit_shrink, state, events);
            }
        }
    }
}

fn advance(
    world: &World,
    pos: &mut Position,
    radius: f32,
    projectile: &Projectile,
    automaton: Option<&Automaton>,
) -> Outcome {
    let Ok(mut query) =
        world.query_one::<(&Active, &Position, &Body, Option<&SymbolTape>)>(projectile.target)
    else {
        return Outcome::Neutralized;
    };
    let Some((active, target_pos, body, tape)) = query.get() else {
        return Outcome::Neutralized;
    };
    if !active.0 || !may_attack(projectile.gate_state.as_deref(), tape, automaton) {
        return Outcome::Neutralized;
    }
    let arrived = pos.step_toward(*target_pos, projectile.speed);
    if arrived || check_collision(pos, radius, target_pos, body.radius) {
        Outcome::Hit
    } else {
        Outcome::Moving(*pos)
    }
}

fn apply_hit(
    world: &mut World,
    projectile: &Projectile,
    automaton: Option<&Automaton>,
    hit_shrink: f32,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) {
    let Ok((active, health, body, follower, tape)) = world.query_one_mut::<(
        &mut Active,
        &mut Health,
        &mut Body,
        &PathFollower,
        Option<&mut SymbolTape>,
    )>(projectile.target) else {
        return;
    };
    health.current -= projectile.damage;
    body.radius *= hit_shrink;
    if projectile.gate_state.is_some() {
        if let Some(tape) = tape {
            tape.consume();
        }
    }
    if health.current > 0.0 {
        return;
    }
    active.0 = false;
    let bonus = match (projectile.gate_state.as_deref(), automaton) {
        (Some(gate), Some(automaton)) => automaton.reward(gate),
        _ => 0,
    };
    let reward = follower.reward + bonus;
    state.reward(reward);
    state.stats.enemies_killed += 1;
    events.push(GameEvent::EnemyKilled {
        tower_type: projectile.tower_type,
        reward,
    });
}

fn deactivate(world: &mut World, entity: Entity) {
    if let Ok(mut active) = world.get::<&mut Active>(entity) {
        active.0 = false;
    }
}
