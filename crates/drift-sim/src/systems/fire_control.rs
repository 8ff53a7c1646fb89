//! Fire control: every tower picks the nearest enemy in range that it is
//! allowed to attack, then fires a homing projectile when its gate allows.

use hecs::{Entity, World};

use drift_core::automaton::Automaton;
use drift_core::components::{Active, Kind, SymbolTape};
use drift_core::enums::EntityKind;
use drift_core::events::GameEvent;
use drift_core::types::Position;

use crate::combat::{may_attack, FireGate, Targeting, Tower};
use crate::game_state::GameState;
use crate::world_setup;

struct Candidate {
    entity: Entity,
    position: Position,
    tape: Option<SymbolTape>,
}

pub fn run(
    world: &mut World,
    automaton: Option<&Automaton>,
    state: &mut GameState,
    frame: u64,
    events: &mut Vec<GameEvent>,
) {
    let enemies: Vec<Candidate> = world
        .query::<(&Kind, &Active, &Position, Option<&SymbolTape>)>()
        .iter()
        .filter(|(_, (kind, active, _, _))| kind.0 == EntityKind::Enemy && active.0)
        .map(|(entity, (_, _, position, tape))| Candidate {
            entity,
            position: *position,
            tape: tape.cloned(),
        })
        .collect();

    let mut shots: Vec<(Position, Tower, Entity)> = Vec::new();

    for (_entity, (active, pos, tower, targeting, gate)) in world.query_mut::<(
        &Active,
        &Position,
        &Tower,
        &mut Targeting,
        &mut FireGate,
    )>() {
        if !active.0 {
            continue;
        }
        targeting.current = select_target(pos, tower, &enemies, automaton);
        let Some(target) = targeting.current else {
            continue;
        };
        if gate.ready(frame) {
            gate.record_shot(frame);
            shots.push((*pos, tower.clone(), target));
        }
    }

    for (position, tower, target) in shots {
        world_setup::spawn_projectile(world, position, &tower, target);
        state.stats.shots_fired += 1;
        events.push(GameEvent::ShotFired {
            tower_type: tower.type_id,
            frame,
        });
    }
}

/// Nearest enemy within range satisfying the attack predicate.
fn select_target(
    tower_pos: &Position,
    tower: &Tower,
    enemies: &[Candidate],
    automaton: Option<&Automaton>,
) -> Option<Entity> {
    enemies
        .iter()
        .filter(|c| may_attack(tower.gate.as_deref(), c.tape.as_ref(), automaton))
        .map(|c| (c, tower_pos.distance_to(&c.position)))
        .filter(|(_, d)| *d <= tower.range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.entity)
}
