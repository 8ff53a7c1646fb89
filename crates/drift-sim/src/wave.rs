//! Defense wave bookkeeping: how many enemies remain to be released and when
//! the next one is due.

use drift_core::config::WaveConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveState {
    pub in_progress: bool,
    /// Enemies of the current wave not yet spawned.
    pub left_to_spawn: u32,
    /// Enemies of the current wave spawned so far.
    pub spawned: u32,
    /// Frame at which the next enemy may be released.
    pub next_spawn_frame: u64,
    /// Frame at which the previous wave ended (0 before the first wave).
    pub ended_at_frame: u64,
}

impl WaveState {
    /// Begin wave `wave` at `frame`. Returns the number of enemies it holds.
    pub fn start(&mut self, config: &WaveConfig, wave: u32, frame: u64) -> u32 {
        let count = config.formula.enemy_count(wave);
        self.in_progress = true;
        self.left_to_spawn = count;
        self.spawned = 0;
        self.next_spawn_frame = frame;
        count
    }

    /// Whether an automatic start is due at `frame`.
    pub fn auto_start_due(&self, config: &WaveConfig, frame: u64) -> bool {
        match config.auto_start_delay_frames {
            Some(delay) => !self.in_progress && frame >= self.ended_at_frame + delay,
            None => false,
        }
    }

    /// Number of enemies to release at `frame`, updating the schedule.
    pub fn due_spawns(&mut self, spawn_delay_frames: u64, frame: u64) -> u32 {
        if !self.in_progress || self.left_to_spawn == 0 || frame < self.next_spawn_frame {
            return 0;
        }
        let count = if spawn_delay_frames == 0 {
            self.left_to_spawn
        } else {
            1
        };
        self.left_to_spawn -= count;
        self.spawned += count;
        self.next_spawn_frame = frame + spawn_delay_frames;
        count
    }

    pub fn all_spawned(&self) -> bool {
        self.left_to_spawn == 0
    }

    pub fn finish(&mut self, frame: u64) {
        self.in_progress = false;
        self.ended_at_frame = frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::config::WaveFormula;

    #[test]
    fn staggered_release() {
        let config = WaveConfig::default();
        let mut wave = WaveState::default();
        assert_eq!(wave.start(&config, 0, 10), 5);
        assert_eq!(wave.due_spawns(45, 10), 1);
        assert_eq!(wave.due_spawns(45, 11), 0);
        assert_eq!(wave.due_spawns(45, 55), 1);
        assert_eq!(wave.left_to_spawn, 3);
    }

    #[test]
    fn zero_delay_releases_everything() {
        let config = WaveConfig {
            formula: WaveFormula::Fibonacci { base: 3 },
            ..WaveConfig::default()
        };
        let mut wave = WaveState::default();
        wave.start(&config, 4, 0);
        assert_eq!(wave.due_spawns(0, 0), 6);
        assert!(wave.all_spawned());
        assert_eq!(wave.due_spawns(0, 1), 0);
    }

    #[test]
    fn auto_start_waits_for_delay() {
        let config = WaveConfig {
            auto_start_delay_frames: Some(100),
            ..WaveConfig::default()
        };
        let mut wave = WaveState::default();
        wave.finish(50);
        assert!(!wave.auto_start_due(&config, 149));
        assert!(wave.auto_start_due(&config, 150));
        assert!(!wave.auto_start_due(&WaveConfig::default(), 10_000));
    }
}
