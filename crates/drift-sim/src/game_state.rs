//! The explicit game-state record owned by the engine.
//!
//! Systems receive it by `&mut` instead of touching globals.

use drift_core::config::{ArcadeConfig, DefenseConfig};
use drift_core::enums::PowerUpKind;
use drift_core::state::{PowerUpView, StatsView};

/// Remaining seconds of each timed power-up. Zero means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerUpTimers {
    pub rapid_fire: f32,
    pub shield: f32,
    pub multi_shot: f32,
    pub speed_boost: f32,
}

impl PowerUpTimers {
    fn slot(&mut self, kind: PowerUpKind) -> Option<&mut f32> {
        match kind {
            PowerUpKind::RapidFire => Some(&mut self.rapid_fire),
            PowerUpKind::Shield => Some(&mut self.shield),
            PowerUpKind::MultiShot => Some(&mut self.multi_shot),
            PowerUpKind::SpeedBoost => Some(&mut self.speed_boost),
            PowerUpKind::LifeUp => None,
        }
    }

    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire,
            PowerUpKind::Shield => self.shield,
            PowerUpKind::MultiShot => self.multi_shot,
            PowerUpKind::SpeedBoost => self.speed_boost,
            PowerUpKind::LifeUp => 0.0,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0.0
    }

    /// Start (or refresh) a timed effect. Instant kinds are ignored.
    pub fn activate(&mut self, kind: PowerUpKind, duration: f32) {
        if let Some(slot) = self.slot(kind) {
            *slot = duration;
        }
    }

    /// Count every active timer down by `dt` and return the kinds that expired.
    pub fn tick(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            if let Some(slot) = self.slot(kind) {
                if *slot > 0.0 {
                    *slot -= dt;
                    if *slot <= 0.0 {
                        *slot = 0.0;
                        expired.push(kind);
                    }
                }
            }
        }
        expired
    }

    pub fn views(&self) -> Vec<PowerUpView> {
        PowerUpKind::ALL
            .iter()
            .filter(|kind| self.is_active(**kind))
            .map(|&kind| PowerUpView {
                kind,
                remaining_secs: self.remaining(kind),
            })
            .collect()
    }
}

/// Score, lives, economy and progression counters.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub score: u32,
    pub lives: i32,
    pub level: u32,
    pub wave: u32,
    pub money: u32,
    pub difficulty: f32,
    /// Elapsed seconds at which the current arcade wave began.
    pub wave_start_time: f32,
    pub powerups: PowerUpTimers,
    pub stats: StatsView,
}

impl GameState {
    pub fn for_arcade(config: &ArcadeConfig) -> Self {
        Self {
            lives: config.starting_lives,
            level: 1,
            wave: 1,
            difficulty: 1.0,
            ..Self::default()
        }
    }

    pub fn for_defense(config: &DefenseConfig) -> Self {
        Self {
            lives: config.starting_lives,
            money: config.starting_money,
            difficulty: 1.0,
            ..Self::default()
        }
    }

    /// Award money and score for a kill.
    pub fn reward(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
        self.score = self.score.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_expire_once() {
        let mut timers = PowerUpTimers::default();
        timers.activate(PowerUpKind::Shield, 0.05);
        assert!(timers.is_active(PowerUpKind::Shield));
        assert!(timers.tick(0.02).is_empty());
        assert_eq!(timers.tick(0.04), vec![PowerUpKind::Shield]);
        assert!(timers.tick(0.04).is_empty());
        assert!(!timers.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn life_up_has_no_timer() {
        let mut timers = PowerUpTimers::default();
        timers.activate(PowerUpKind::LifeUp, 8.0);
        assert!(timers.views().is_empty());
    }

    #[test]
    fn defense_state_starts_at_wave_zero() {
        let state = GameState::for_defense(&DefenseConfig::default());
        assert_eq!(state.wave, 0);
        assert_eq!(state.lives, 10);
        assert_eq!(state.money, 100);
    }
}
