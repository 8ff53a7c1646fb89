#[cfg(test)]
mod tests {
    use crate::commands::PlayerIntent;
    use crate::components::SymbolTape;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{check_collision, Position, SimTime, Velocity};

    /// Intents are a tagged union so the input layer can send plain JSON.
    #[test]
    fn test_player_intent_serde() {
        let intents = vec![
            PlayerIntent::RotateLeft,
            PlayerIntent::Thrust,
            PlayerIntent::Fire,
            PlayerIntent::PlaceTower { x: 200.0, y: 150.0 },
            PlayerIntent::SelectTowerType { id: 2 },
            PlayerIntent::StartWave,
            PlayerIntent::Resize {
                width: 1024.0,
                height: 768.0,
            },
            PlayerIntent::Pause,
            PlayerIntent::Restart,
        ];
        for intent in &intents {
            let json = serde_json::to_string(intent).unwrap();
            let back: PlayerIntent = serde_json::from_str(&json).unwrap();
            assert_eq!(*intent, back);
        }
    }

    #[test]
    fn test_intent_wire_format() {
        let intent: PlayerIntent =
            serde_json::from_str(r#"{"type":"PlaceTower","x":10.0,"y":20.0}"#).unwrap();
        assert_eq!(intent, PlayerIntent::PlaceTower { x: 10.0, y: 20.0 });
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::Explosion {
                x: 0.1,
                y: -0.2,
                particles: 8,
            },
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Shield,
            },
            GameEvent::PlacementRejected {
                reason: "Not enough money".into(),
            },
            GameEvent::GameOver {
                won: false,
                score: 120,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_symbol_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Symbol::A).unwrap(), "\"a\"");
        let back: Symbol = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(back, Symbol::B);
    }

    /// Verify GameStateSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.frame, back.time.frame);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_entity_kind_filters() {
        assert!(EntityKind::Asteroid.is_bullet_target());
        assert!(EntityKind::Hunter.is_hazard());
        assert!(!EntityKind::PowerUp.is_hazard());
        assert!(!EntityKind::Star.is_bullet_target());
    }

    // ---- Geometry ----

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward_snaps_on_arrival() {
        let mut p = Position::new(0.0, 0.0);
        assert!(!p.step_toward(Position::new(10.0, 0.0), 4.0));
        assert!((p.x - 4.0).abs() < 1e-6);
        assert!(!p.step_toward(Position::new(10.0, 0.0), 4.0));
        assert!(p.step_toward(Position::new(10.0, 0.0), 4.0));
        assert_eq!(p, Position::new(10.0, 0.0));
    }

    #[test]
    fn test_collision_is_strict() {
        let a = Position::new(0.0, 0.0);
        let touching = Position::new(2.0, 0.0);
        assert!(!check_collision(&a, 1.0, &touching, 1.0));
        let overlapping = Position::new(1.9, 0.0);
        assert!(check_collision(&a, 1.0, &overlapping, 1.0));
    }

    #[test]
    fn test_velocity_clamp() {
        let v = Velocity::new(3.0, 4.0);
        assert!((v.speed() - 5.0).abs() < 1e-6);
        let clamped = v.clamped(1.0);
        assert!((clamped.speed() - 1.0).abs() < 1e-5);
        assert!((clamped.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_velocity_from_angle() {
        let v = Velocity::from_angle(std::f32::consts::FRAC_PI_2, 2.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.frame, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }

    // ---- Tapes ----

    #[test]
    fn test_symbol_tape_consumes_in_order() {
        let mut tape = SymbolTape::new(vec![Symbol::A, Symbol::B]);
        assert_eq!(tape.pending(), Some(Symbol::A));
        tape.consume();
        assert_eq!(tape.pending(), Some(Symbol::B));
        tape.consume();
        assert_eq!(tape.pending(), None);
        tape.consume();
        assert_eq!(tape.cursor, 2);
    }
}
