//! Power-up timers: count down and report expiry.

use drift_core::events::GameEvent;

use crate::game_state::GameState;

pub fn run(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    for kind in state.powerups.tick(dt) {
        log::debug!("{} expired", kind.label());
        events.push(GameEvent::PowerUpExpired { kind });
    }
}
