//! Tower and projectile components. They hold `hecs::Entity` handles, so
//! they live next to the ECS rather than in the core vocabulary.

use hecs::Entity;

use drift_core::automaton::Automaton;
use drift_core::components::SymbolTape;
use drift_core::config::TowerType;

/// Static stats of a placed tower.
#[derive(Debug, Clone)]
pub struct Tower {
    pub type_id: u32,
    pub range: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    /// Automaton state the tower is tagged with.
    pub gate: Option<String>,
}

impl Tower {
    pub fn from_type(tower_type: &TowerType) -> Self {
        Self {
            type_id: tower_type.id,
            range: tower_type.range,
            damage: tower_type.damage,
            projectile_speed: tower_type.projectile_speed,
            gate: tower_type.gate.clone(),
        }
    }
}

/// Frame-counted fire-rate gate.
#[derive(Debug, Clone, Copy)]
pub struct FireGate {
    pub fire_rate: u64,
    pub last_shot_frame: Option<u64>,
}

impl FireGate {
    pub fn new(fire_rate: u64) -> Self {
        Self {
            fire_rate,
            last_shot_frame: None,
        }
    }

    pub fn ready(&self, frame: u64) -> bool {
        self.last_shot_frame
            .is_none_or(|last| frame.saturating_sub(last) >= self.fire_rate)
    }

    pub fn record_shot(&mut self, frame: u64) {
        self.last_shot_frame = Some(frame);
    }
}

/// The enemy a tower is currently locked on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Targeting {
    pub current: Option<Entity>,
}

/// Homing projectile. The target is re-resolved every frame; a stale handle
/// means the projectile is neutralized.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub target: Entity,
    pub speed: f32,
    pub damage: f32,
    pub tower_type: u32,
    /// State of the firing tower when gated.
    pub gate_state: Option<String>,
}

/// Attack predicate. Ungated towers may attack anything; gated towers need
/// the enemy's next pending symbol to have a transition out of their state.
pub fn may_attack(
    gate: Option<&str>,
    tape: Option<&SymbolTape>,
    automaton: Option<&Automaton>,
) -> bool {
    let Some(state) = gate else {
        return true;
    };
    match (tape.and_then(SymbolTape::pending), automaton) {
        (Some(symbol), Some(automaton)) => automaton.permits(state, symbol),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::enums::Symbol;

    #[test]
    fn gate_opens_after_fire_rate_frames() {
        let mut gate = FireGate::new(60);
        assert!(gate.ready(0));
        gate.record_shot(0);
        assert!(!gate.ready(59));
        assert!(gate.ready(60));
    }

    #[test]
    fn ungated_tower_attacks_anything() {
        assert!(may_attack(None, None, None));
    }

    #[test]
    fn gated_tower_follows_transitions() {
        let dfa = Automaton::two_state();
        let tape = SymbolTape::new(vec![Symbol::A, Symbol::B]);
        assert!(may_attack(Some("q0"), Some(&tape), Some(&dfa)));
        assert!(!may_attack(Some("q1"), Some(&tape), Some(&dfa)));
    }

    #[test]
    fn exhausted_tape_is_immune_to_gated_towers() {
        let dfa = Automaton::two_state();
        let mut tape = SymbolTape::new(vec![Symbol::A]);
        tape.consume();
        assert!(!may_attack(Some("q0"), Some(&tape), Some(&dfa)));
        assert!(!may_attack(Some("q0"), None, Some(&dfa)));
    }
}
