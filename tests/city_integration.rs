//! Integration tests for the city layer
//!
//! These tests drive the game only through public actions:
//! - Placement workflow (select -> click -> ledger updated)
//! - Removal workflow (click occupied cell -> refund)
//! - Silent rejections leave state untouched

use city_builder::city::{BuildingType, Ledger};
use city_builder::core::config::GameConfig;
use city_builder::core::types::GridCoord;
use city_builder::simulation::{reduce, Action, GameState, Outcome, Rejection};

fn click(state: &mut GameState, x: u32, y: u32) -> Outcome {
    state.dispatch(Action::Click(GridCoord::new(x, y)))
}

// ============================================================================
// Placement Workflow
// ============================================================================

#[test]
fn test_house_at_origin_from_initial_ledger() {
    let mut state = GameState::new(&GameConfig::default());
    let before = state.ledger;

    click(&mut state, 0, 0);

    assert_eq!(state.ledger.population, before.population + 4);
    assert_eq!(state.ledger.money, before.money - 100);
    assert_eq!(state.ledger.happiness, before.happiness);
    assert_eq!(state.ledger.power, before.power);
}

#[test]
fn test_build_a_small_city() {
    let mut state = GameState::default();

    for (building_type, x) in [
        (BuildingType::House, 0),
        (BuildingType::House, 1),
        (BuildingType::Office, 2),
        (BuildingType::Factory, 3),
        (BuildingType::Shop, 4),
    ] {
        state.dispatch(Action::Select(Some(building_type)));
        assert!(click(&mut state, x, 0).is_applied());
    }

    // 1000 - 100 - 100 - (200 - 50) - 300 - (150 - 25)
    assert_eq!(
        state.ledger,
        Ledger {
            money: 225,
            population: 8,
            happiness: 55,
            power: 120,
        }
    );

    let order: Vec<BuildingType> = state.buildings.iter().map(|b| b.building_type).collect();
    assert_eq!(
        order,
        vec![
            BuildingType::House,
            BuildingType::House,
            BuildingType::Office,
            BuildingType::Factory,
            BuildingType::Shop,
        ]
    );
}

#[test]
fn test_running_out_of_money() {
    let mut state = GameState::default();
    state.dispatch(Action::Select(Some(BuildingType::Factory)));

    // 1000 buys three factories
    for x in 0..3 {
        assert!(click(&mut state, x, 0).is_applied());
    }
    assert_eq!(state.ledger.money, 100);

    let before = state.clone();
    let outcome = click(&mut state, 3, 0);
    assert_eq!(
        outcome,
        Outcome::Ignored(Rejection::InsufficientFunds {
            cost: 300,
            available: 100
        })
    );
    assert_eq!(state, before);
}

// ============================================================================
// Removal Workflow
// ============================================================================

#[test]
fn test_removal_refund_keeps_effects() {
    let mut state = GameState::default();
    state.dispatch(Action::Select(Some(BuildingType::Shop)));
    click(&mut state, 7, 7);
    let placed = state.ledger;

    state.dispatch(Action::Select(None));
    let outcome = click(&mut state, 7, 7);

    assert!(matches!(outcome, Outcome::Removed { refund: 75, .. }));
    assert_eq!(state.ledger.money, placed.money + 75);
    assert_eq!(state.ledger.happiness, placed.happiness);
    assert!(state.buildings.is_empty());
}

#[test]
fn test_rebuild_after_removal() {
    let mut state = GameState::default();
    click(&mut state, 2, 2);
    click(&mut state, 2, 2);
    assert!(click(&mut state, 2, 2).is_applied());

    assert_eq!(state.buildings.len(), 1);
    // two houses built, one refunded
    assert_eq!(state.ledger.money, 1000 - 100 + 50 - 100);
    assert_eq!(state.ledger.population, 8);
}

// ============================================================================
// Silent Rejections
// ============================================================================

#[test]
fn test_occupied_cell_place_never_changes_state() {
    let mut state = GameState::default();
    click(&mut state, 1, 1);
    let before = state.clone();

    let (after, outcome) = reduce(
        state,
        Action::Place {
            building_type: BuildingType::Office,
            cell: GridCoord::new(1, 1),
        },
    );
    assert_eq!(outcome, Outcome::Ignored(Rejection::Occupied(GridCoord::new(1, 1))));
    assert_eq!(after, before);
}

#[test]
fn test_removal_mode_click_on_empty_cell() {
    let mut state = GameState::default();
    state.dispatch(Action::Select(None));
    let before = state.clone();

    assert!(!click(&mut state, 10, 10).is_applied());
    assert_eq!(state, before);
}

#[test]
fn test_custom_grid_bounds() {
    let config = GameConfig {
        grid_size: 5,
        ..GameConfig::default()
    };
    let mut state = GameState::new(&config);

    assert!(click(&mut state, 4, 4).is_applied());
    assert_eq!(
        click(&mut state, 5, 0),
        Outcome::Ignored(Rejection::OutOfBounds(GridCoord::new(5, 0)))
    );
}
