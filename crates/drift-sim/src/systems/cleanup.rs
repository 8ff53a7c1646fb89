//! Cleanup system: removes inactive, dead and expired entities at the end of
//! the frame.

use hecs::{Entity, World};

use drift_core::components::{Active, Health, Kind, Lifetime};
use drift_core::enums::EntityKind;

/// Despawn every entity that is inactive, has `health <= 0` or a finite
/// lifetime `<= 0`. The ship is never removed.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (kind, active, health, lifetime)) in world.query_mut::<(
        Option<&Kind>,
        Option<&Active>,
        Option<&Health>,
        Option<&Lifetime>,
    )>() {
        if kind.is_some_and(|k| k.0 == EntityKind::Ship) {
            continue;
        }
        let inactive = active.is_some_and(|a| !a.0);
        let dead = health.is_some_and(|h| h.current <= 0.0);
        let expired = lifetime.is_some_and(|l| l.remaining <= 0.0);
        if inactive || dead || expired {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::types::Position;

    #[test]
    fn removes_inactive_dead_and_expired() {
        let mut world = World::new();
        let keep = world.spawn((Active(true), Position::ORIGIN));
        let inactive = world.spawn((Active(false),));
        let dead = world.spawn((Active(true), Health { current: 0.0 }));
        let expired = world.spawn((Active(true), Lifetime { remaining: -0.1 }));
        let ship = world.spawn((Kind(EntityKind::Ship), Active(false)));

        let mut buffer = Vec::new();
        run(&mut world, &mut buffer);

        assert!(world.contains(keep));
        assert!(!world.contains(inactive));
        assert!(!world.contains(dead));
        assert!(!world.contains(expired));
        assert!(world.contains(ship));
        assert!(buffer.is_empty());
    }
}
