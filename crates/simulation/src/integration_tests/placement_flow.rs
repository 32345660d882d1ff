use bevy::prelude::*;

use crate::grid_geometry::Rotation;
use crate::placement::PlacementError;
use crate::test_harness::TestCity;
use crate::tiles::PlayerId;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

fn owned_city() -> TestCity {
    TestCity::small()
        .with_owned_rect(ALICE, 0, 0, 1, 1)
        .with_road_row(1, -2, 7)
}

#[test]
fn test_second_building_on_same_spot_is_rejected() {
    let mut city = owned_city();
    city.place(ALICE, "House", IVec2::ZERO, Rotation::Deg0)
        .expect("first house");
    city.assert_treasury(900.0);

    let second = city.place(ALICE, "House", IVec2::ZERO, Rotation::Deg0);
    assert_eq!(second, Err(PlacementError::Overlap));
    city.assert_building_count(1);
    city.assert_treasury(900.0);
}

#[test]
fn test_houses_fill_a_street() {
    let mut city = owned_city();
    for x in 0..8 {
        city.place(ALICE, "House", IVec2::new(x, 0), Rotation::Deg0)
            .unwrap_or_else(|e| panic!("house {x}: {e}"));
    }
    city.assert_building_count(8);
    city.assert_treasury(200.0);
    city.assert_placement_invariants();
}

#[test]
fn test_running_out_of_money_stops_placement() {
    let mut city = owned_city().with_budget(250.0);
    city.place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .unwrap();
    city.place(ALICE, "House", IVec2::new(1, 0), Rotation::Deg0)
        .unwrap();
    assert_eq!(
        city.place(ALICE, "House", IVec2::new(2, 0), Rotation::Deg0),
        Err(PlacementError::InsufficientFunds)
    );
    city.assert_treasury(50.0);
    city.assert_building_count(2);
}

#[test]
fn test_other_players_land_is_off_limits() {
    let mut city = TestCity::small()
        .with_owned_rect(ALICE, 0, 0, 0, 1)
        .with_owned_rect(BOB, 1, 0, 1, 1)
        .with_road_row(1, -2, 7);
    assert_eq!(
        city.place(ALICE, "House", IVec2::new(5, 0), Rotation::Deg0),
        Err(PlacementError::NotOwned)
    );
    assert!(city
        .place(BOB, "House", IVec2::new(5, 0), Rotation::Deg0)
        .is_ok());
    city.assert_placement_invariants();
}

#[test]
fn test_intersection_zone_blocks_building() {
    let mut city = owned_city().with_intersection(IVec2::new(4, 0));
    assert_eq!(
        city.place(ALICE, "House", IVec2::new(4, 0), Rotation::Deg0),
        Err(PlacementError::OnIntersection)
    );
}

#[test]
fn test_apartment_sits_behind_the_road() {
    // An even footprint has its edges on lattice points. Anchored on (1, -1)
    // the apartment covers y in [-0.4, 0.0] and its front edge is 0.1 short
    // of road row 1.
    let mut city = owned_city().with_budget(5000.0);
    let id = city
        .place(ALICE, "Apartment", IVec2::new(1, -1), Rotation::Deg0)
        .expect("apartment faces the road");
    let cells = city.building(id).unwrap().occupied_cells();
    assert_eq!(cells.len(), 4);
    assert!(cells.contains(&IVec2::new(0, -2)));
    assert!(cells.contains(&IVec2::new(1, -1)));

    assert_eq!(
        city.place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0),
        Err(PlacementError::Overlap)
    );
    assert!(city
        .place(ALICE, "House", IVec2::new(3, 0), Rotation::Deg0)
        .is_ok());
    city.assert_placement_invariants();
}

#[test]
fn test_apartment_on_top_of_road_has_no_access() {
    let mut city = owned_city().with_budget(5000.0);
    assert_eq!(
        city.place(ALICE, "Apartment", IVec2::new(1, 0), Rotation::Deg0),
        Err(PlacementError::NoRoadAccess)
    );
    city.assert_treasury(5000.0);
}
