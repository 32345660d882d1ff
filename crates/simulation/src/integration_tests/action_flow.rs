use crate::buildings::{BuildingKind, BuildingRecord};
use crate::game_actions::{ActionError, ActionQueue, ActionResult, ActionSource, GameAction};
use crate::grid_geometry::Rotation;
use crate::placement::PlacementError;
use crate::test_harness::TestCity;
use crate::tiles::PlayerId;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

fn place(player: PlayerId, template: &str, position: (f32, f32)) -> GameAction {
    GameAction::PlaceBuilding {
        player,
        template: template.into(),
        position,
        rotation: Rotation::Deg0,
    }
}

fn buy_grid(city: &mut TestCity, player: PlayerId) {
    for y in 0..2 {
        for x in 0..2 {
            city.queue(GameAction::PurchaseTile {
                player,
                tile: (x, y),
            });
        }
    }
}

#[test]
fn test_build_a_street_through_the_queue() {
    let mut city = TestCity::small();
    buy_grid(&mut city, ALICE);
    city.queue(GameAction::PlaceRoad {
        start: (-2, 1),
        end: (7, 1),
    })
    .queue(place(ALICE, "House", (0.0, 0.0)))
    .queue(place(ALICE, "Shop", (0.2, 0.0)));

    city.tick(1);

    let results = city.last_results(7);
    assert_eq!(results.len(), 7);
    for (action, result) in &results {
        assert!(result.is_success(), "{action:?} failed: {result:?}");
    }
    let house = results[5].1.placed().expect("house id");
    assert_eq!(city.building(house).unwrap().kind, BuildingKind::Residential);
    city.assert_tile_owner(1, 1, Some(ALICE));
    city.assert_treasury(1000.0 - 400.0 - 250.0);

    // One fixed tick already ran; the economy fires on the tenth.
    city.tick(9);
    city.assert_happy_residents(house, 10);
    city.assert_treasury(351.0);
}

#[test]
fn test_snapped_position_from_action() {
    let mut city = TestCity::small();
    buy_grid(&mut city, ALICE);
    city.queue(GameAction::PlaceRoad {
        start: (-2, 1),
        end: (7, 1),
    })
    .queue(place(ALICE, "House", (0.43, 0.07)));
    city.tick(1);

    let id = city.last_result().and_then(|r| r.placed()).expect("placed");
    assert_eq!(city.building(id).unwrap().anchor, bevy::math::IVec2::new(2, 0));
}

#[test]
fn test_land_already_sold_cannot_be_bought() {
    let mut city = TestCity::small();
    city.queue(GameAction::PurchaseTile {
        player: ALICE,
        tile: (0, 0),
    })
    .queue(GameAction::PurchaseTile {
        player: BOB,
        tile: (0, 0),
    })
    .queue(GameAction::PurchaseTile {
        player: ALICE,
        tile: (0, 0),
    })
    .queue(GameAction::PurchaseTile {
        player: BOB,
        tile: (9, 9),
    });
    city.tick(1);

    let results = city.last_results(4);
    assert_eq!(results[0].1, ActionResult::Success);
    assert_eq!(
        results[1].1.error(),
        Some(&ActionError::AlreadyOwnedByOther)
    );
    assert!(results[2].1.warning().is_some());
    assert!(matches!(results[3].1, ActionResult::Error(_)));
    city.assert_tile_owner(0, 0, Some(ALICE));
    city.assert_treasury(900.0);
}

#[test]
fn test_rejected_placement_is_logged_not_applied() {
    let mut city = TestCity::small();
    city.queue(place(ALICE, "House", (0.0, 0.0)))
        .queue(place(ALICE, "Skyscraper", (0.0, 0.0)));
    city.tick(1);

    let results = city.last_results(2);
    assert_eq!(
        results[0].1.error(),
        Some(&ActionError::Placement(PlacementError::NotOwned))
    );
    assert_eq!(
        results[1].1.error(),
        Some(&ActionError::UnknownTemplate("Skyscraper".into()))
    );
    city.assert_building_count(0);
    city.assert_treasury(1000.0);
}

#[test]
fn test_demolish_frees_the_spot() {
    let mut city = TestCity::small();
    buy_grid(&mut city, ALICE);
    city.queue(GameAction::PlaceRoad {
        start: (-2, 1),
        end: (7, 1),
    })
    .queue(place(ALICE, "House", (0.0, 0.0)));
    city.tick(1);
    let id = city.last_result().and_then(|r| r.placed()).unwrap();

    city.queue(GameAction::Demolish { building: id });
    city.tick(1);
    assert_eq!(city.last_result(), Some(ActionResult::Success));
    city.assert_building_count(0);

    city.queue(GameAction::Demolish { building: id });
    city.tick(1);
    assert_eq!(
        city.last_result().and_then(|r| r.error().cloned()),
        Some(ActionError::NotFound)
    );

    city.queue(place(ALICE, "House", (0.0, 0.0)));
    city.tick(1);
    assert!(city.last_result().is_some_and(|r| r.placed().is_some()));
    city.assert_building_count(1);
}

#[test]
fn test_ledger_record_skips_validation_and_counts_in_economy() {
    let mut city = TestCity::small();
    let record = BuildingRecord {
        kind_id: BuildingKind::Residential.id(),
        x: 30,
        y: 30,
        rotation_index: 0,
        width: 1,
        length: 1,
        residents: 10,
        jobs: 0,
        shopping_space: 0,
        owner: BOB,
    };
    city.queue(GameAction::RegisterBuilding { record });
    city.queue(GameAction::RegisterBuilding {
        record: BuildingRecord {
            kind_id: 9,
            ..record
        },
    });
    city.queue(GameAction::RegisterBuilding {
        record: BuildingRecord {
            x: -30,
            width: 70_000,
            length: 70_000,
            ..record
        },
    });
    city.tick(1);

    let results = city.last_results(3);
    assert!(results[0].1.placed().is_some());
    assert_eq!(
        results[1].1.error(),
        Some(&ActionError::Placement(PlacementError::UnknownBuildingKind))
    );
    assert_eq!(
        results[2].1.error(),
        Some(&ActionError::Placement(PlacementError::InvalidFootprint))
    );
    city.assert_building_count(1);

    city.tick(9);
    city.assert_treasury(1000.5);
}

#[test]
fn test_scheduled_action_waits_for_its_tick() {
    let mut city = TestCity::small();
    let due = city.tick_count() + 5;
    city.app().world_mut().resource_mut::<ActionQueue>().push(
        due,
        ActionSource::Ledger,
        GameAction::PurchaseTile {
            player: BOB,
            tile: (1, 1),
        },
    );

    city.tick(4);
    city.assert_tile_owner(1, 1, None);
    assert!(city.last_result().is_none());

    city.tick(1);
    city.assert_tile_owner(1, 1, Some(BOB));
    assert_eq!(city.last_result(), Some(ActionResult::Success));
}
