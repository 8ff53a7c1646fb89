//! Tower placement validation.

use hecs::{Entity, World};
use thiserror::Error;

use drift_core::components::Body;
use drift_core::config::DefenseConfig;
use drift_core::types::Position;

use crate::combat::Tower;
use crate::game_state::GameState;
use crate::path::Path;
use crate::world_setup;

/// Why a placement was refused. The display text is shown to the player.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("Unknown tower type {0}")]
    UnknownType(u32),
    #[error("Out of bounds")]
    OutOfBounds,
    #[error("Not enough money ({cost} needed, {available} available)")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("Too close to the path")]
    TooCloseToPath,
    #[error("Too close to another tower")]
    TooCloseToTower,
}

/// Validate and place a tower of `type_id` at `at`, charging its cost.
pub fn place_tower(
    world: &mut World,
    path: &Path,
    config: &DefenseConfig,
    state: &mut GameState,
    type_id: u32,
    at: Position,
) -> Result<Entity, PlacementError> {
    let tower_type = config
        .tower_type(type_id)
        .ok_or(PlacementError::UnknownType(type_id))?;

    let r = tower_type.radius;
    if at.x - r < 0.0 || at.y - r < 0.0 || at.x + r > path.width() || at.y + r > path.height() {
        return Err(PlacementError::OutOfBounds);
    }
    if state.money < tower_type.cost {
        return Err(PlacementError::InsufficientFunds {
            cost: tower_type.cost,
            available: state.money,
        });
    }
    if path.distance_to(at) < config.placement.min_path_clearance {
        return Err(PlacementError::TooCloseToPath);
    }
    let crowded = world
        .query::<(&Position, &Body, &Tower)>()
        .iter()
        .any(|(_, (pos, _, _))| pos.distance_to(&at) < config.placement.min_tower_spacing);
    if crowded {
        return Err(PlacementError::TooCloseToTower);
    }

    state.money -= tower_type.cost;
    state.stats.towers_built += 1;
    Ok(world_setup::spawn_tower(
        world,
        tower_type,
        at,
        config.automaton.as_ref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, Path, DefenseConfig, GameState) {
        let config = DefenseConfig::default();
        let path = Path::new(config.path.clone(), config.world_width, config.world_height);
        let state = GameState::for_defense(&config);
        (World::new(), path, config, state)
    }

    #[test]
    fn valid_placement_charges_cost() {
        let (mut world, path, config, mut state) = setup();
        let placed = place_tower(&mut world, &path, &config, &mut state, 0, Position::new(250.0, 250.0));
        assert!(placed.is_ok());
        assert_eq!(state.money, 50);
        assert_eq!(state.stats.towers_built, 1);
    }

    #[test]
    fn rejects_on_path() {
        let (mut world, path, config, mut state) = setup();
        let err = place_tower(&mut world, &path, &config, &mut state, 0, Position::new(75.0, 305.0))
            .unwrap_err();
        assert_eq!(err, PlacementError::TooCloseToPath);
        assert_eq!(state.money, 100);
    }

    #[test]
    fn rejects_out_of_bounds_and_overlap() {
        let (mut world, path, config, mut state) = setup();
        assert_eq!(
            place_tower(&mut world, &path, &config, &mut state, 0, Position::new(790.0, 500.0)),
            Err(PlacementError::OutOfBounds)
        );
        place_tower(&mut world, &path, &config, &mut state, 0, Position::new(250.0, 250.0)).unwrap();
        assert_eq!(
            place_tower(&mut world, &path, &config, &mut state, 0, Position::new(270.0, 250.0)),
            Err(PlacementError::TooCloseToTower)
        );
    }

    #[test]
    fn rejects_when_broke() {
        let (mut world, path, config, mut state) = setup();
        let err = place_tower(&mut world, &path, &config, &mut state, 1, Position::new(250.0, 250.0))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::InsufficientFunds {
                cost: 120,
                available: 100
            }
        );
        assert_eq!(err.to_string(), "Not enough money (120 needed, 100 available)");
    }
}
