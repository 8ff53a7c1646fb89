//! Scripted player that produces intents from the latest snapshot.

use std::f32::consts::{PI, TAU};

use drift_core::commands::PlayerIntent;
use drift_core::config::{DefenseConfig, GameConfig, Rules};
use drift_core::enums::{EntityKind, GamePhase};
use drift_core::state::GameStateSnapshot;
use drift_core::types::Position;
use drift_sim::path::Path;

/// Heading error (radians) tolerated before the ship turns.
const AIM_TOLERANCE: f32 = 0.1;

/// Beyond this distance to the nearest hazard the ship closes in.
const THRUST_DISTANCE: f32 = 0.6;

/// Spacing of the candidate grid for tower placement.
const GRID_STEP: f32 = 50.0;

pub enum Autopilot {
    Arcade,
    Defense(Builder),
}

/// Defense strategy state: the cheapest tower type and the remaining
/// placement candidates, nearest to the path first.
pub struct Builder {
    tower_type: Option<(u32, u32)>,
    candidates: Vec<Position>,
    next: usize,
    selected: bool,
}

impl Autopilot {
    pub fn new(config: &GameConfig) -> Self {
        match &config.rules {
            Rules::Arcade(_) => Autopilot::Arcade,
            Rules::Defense(defense) => Autopilot::Defense(Builder::new(defense)),
        }
    }

    pub fn intents(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerIntent> {
        match self {
            Autopilot::Arcade => arcade_intents(snapshot),
            Autopilot::Defense(builder) => builder.intents(snapshot),
        }
    }
}

fn arcade_intents(snapshot: &GameStateSnapshot) -> Vec<PlayerIntent> {
    match snapshot.phase {
        GamePhase::GameOver => return vec![PlayerIntent::Restart],
        GamePhase::Paused => return Vec::new(),
        GamePhase::Active => {}
    }
    let Some(ship) = snapshot.entities.iter().find(|e| e.kind == EntityKind::Ship) else {
        return Vec::new();
    };
    let mut intents = vec![PlayerIntent::Fire];

    let nearest = snapshot
        .entities
        .iter()
        .filter(|e| e.kind.is_hazard())
        .map(|e| (e, ship.position.distance_to(&e.position)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((hazard, distance)) = nearest {
        let wanted = (hazard.position.y - ship.position.y).atan2(hazard.position.x - ship.position.x);
        let error = wrap_angle(wanted - ship.rotation);
        if error > AIM_TOLERANCE {
            intents.push(PlayerIntent::RotateLeft);
        } else if error < -AIM_TOLERANCE {
            intents.push(PlayerIntent::RotateRight);
        }
        if distance > THRUST_DISTANCE {
            intents.push(PlayerIntent::Thrust);
        }
    }
    intents
}

/// Map an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI {
        a + TAU
    } else {
        a
    }
}

impl Builder {
    pub fn new(config: &DefenseConfig) -> Self {
        let tower_type = config
            .tower_types
            .iter()
            .min_by_key(|t| t.cost)
            .map(|t| (t.id, t.cost));
        let radius = config
            .tower_types
            .iter()
            .map(|t| t.radius)
            .fold(0.0, f32::max);

        let path = Path::new(config.path.clone(), config.world_width, config.world_height);
        let mut candidates: Vec<(Position, f32)> = Vec::new();
        let mut y = GRID_STEP;
        while y + radius <= config.world_height {
            let mut x = GRID_STEP;
            while x + radius <= config.world_width {
                let p = Position::new(x, y);
                let d = path.distance_to(p);
                if d >= config.placement.min_path_clearance {
                    candidates.push((p, d));
                }
                x += GRID_STEP;
            }
            y += GRID_STEP;
        }
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        Self {
            tower_type,
            candidates: candidates.into_iter().map(|(p, _)| p).collect(),
            next: 0,
            selected: false,
        }
    }

    pub fn intents(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerIntent> {
        if snapshot.phase != GamePhase::Active {
            return Vec::new();
        }
        let mut intents = Vec::new();
        if let Some((id, cost)) = self.tower_type {
            if !self.selected {
                intents.push(PlayerIntent::SelectTowerType { id });
                self.selected = true;
            }
            if snapshot.hud.money >= cost {
                if let Some(spot) = self.candidates.get(self.next) {
                    intents.push(PlayerIntent::PlaceTower {
                        x: spot.x,
                        y: spot.y,
                    });
                    self.next += 1;
                }
            }
        }
        if !snapshot.hud.wave_in_progress {
            intents.push(PlayerIntent::StartWave);
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::state::EntityView;
    use drift_core::components::Shape;
    use drift_core::types::Color;

    fn view(kind: EntityKind, x: f32, y: f32, rotation: f32) -> EntityView {
        EntityView {
            kind,
            position: Position::new(x, y),
            rotation,
            scale: 1.0,
            color: Color::WHITE,
            alpha: 1.0,
            shape: Shape::Circle,
        }
    }

    #[test]
    fn turns_toward_hazard() {
        let snapshot = GameStateSnapshot {
            entities: vec![
                view(EntityKind::Ship, 0.0, 0.0, 0.0),
                view(EntityKind::Asteroid, 0.0, 0.3, 0.0),
            ],
            ..Default::default()
        };
        let intents = arcade_intents(&snapshot);
        assert!(intents.contains(&PlayerIntent::Fire));
        assert!(intents.contains(&PlayerIntent::RotateLeft));
        assert!(!intents.contains(&PlayerIntent::Thrust));
    }

    #[test]
    fn restarts_after_game_over() {
        let snapshot = GameStateSnapshot {
            phase: GamePhase::GameOver,
            ..Default::default()
        };
        assert_eq!(arcade_intents(&snapshot), vec![PlayerIntent::Restart]);
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn builder_selects_cheapest_and_starts_wave() {
        let mut builder = Builder::new(&DefenseConfig::default());
        let mut snapshot = GameStateSnapshot::default();
        snapshot.hud.money = 100;
        let intents = builder.intents(&snapshot);
        assert_eq!(intents[0], PlayerIntent::SelectTowerType { id: 0 });
        assert!(matches!(intents[1], PlayerIntent::PlaceTower { .. }));
        assert_eq!(intents[2], PlayerIntent::StartWave);
        assert!(!builder.candidates.is_empty());
    }
}
