use bevy::prelude::*;

use crate::buildings::BuildingId;
use crate::game_params::{EconomyParams, GameParams};
use crate::grid_geometry::Rotation;
use crate::test_harness::TestCity;
use crate::tiles::PlayerId;

const ALICE: PlayerId = PlayerId(1);

fn street() -> TestCity {
    TestCity::small()
        .with_owned_rect(ALICE, 0, 0, 1, 1)
        .with_road_row(1, -2, 7)
}

fn house_and_shop(city: &mut TestCity) -> (BuildingId, BuildingId) {
    let house = city
        .place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .expect("house");
    let shop = city
        .place(ALICE, "Shop", IVec2::new(1, 0), Rotation::Deg0)
        .expect("shop");
    (house, shop)
}

#[test]
fn test_house_next_to_shop_earns_full_income() {
    let mut city = street();
    let (house, shop) = house_and_shop(&mut city);
    city.assert_treasury(750.0);

    city.tick_economy(1);

    city.assert_happy_residents(house, 10);
    city.assert_treasury(751.0);
    let shop = city.building(shop).unwrap();
    assert_eq!(shop.available_jobs, 0);
    assert_eq!(shop.available_shopping, 0);
    let report = city.economy().last_report().expect("one tick ran");
    assert!((report.total_income - 1.0).abs() < 1e-9);
    assert_eq!(report.happy_residents, 10);
}

#[test]
fn test_lone_house_earns_unhappy_income() {
    let mut city = street();
    let house = city
        .place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .unwrap();
    city.tick_economy(1);
    city.assert_happy_residents(house, 0);
    city.assert_treasury(900.5);
}

#[test]
fn test_no_income_before_the_interval_elapses() {
    let mut city = street();
    house_and_shop(&mut city);
    let per = city.ticks_per_economy_tick();
    city.tick(per - 1);
    assert_eq!(city.economy().ticks_run(), 0);
    city.assert_treasury(750.0);
    city.tick(1);
    assert_eq!(city.economy().ticks_run(), 1);
    city.assert_treasury(751.0);
}

#[test]
fn test_repeated_ticks_reach_the_same_allocation() {
    let mut city = street();
    let (house, _) = house_and_shop(&mut city);
    city.tick_economy(3);
    assert_eq!(city.economy().ticks_run(), 3);
    city.assert_happy_residents(house, 10);
    city.assert_treasury(753.0);
}

#[test]
fn test_shop_beyond_search_radius_does_not_help() {
    let mut city = street();
    let house = city
        .place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .unwrap();
    city.place(ALICE, "Shop", IVec2::new(3, 0), Rotation::Deg0)
        .unwrap();
    city.tick_economy(1);
    city.assert_happy_residents(house, 0);
    city.assert_treasury(750.5);
}

#[test]
fn test_longer_interval_pays_proportionally() {
    let params = GameParams {
        economy: EconomyParams {
            update_interval_secs: 2.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut city = street().with_params(params);
    house_and_shop(&mut city);

    // The engine picks up the new interval on the first fixed tick.
    city.tick(10);
    assert_eq!(city.economy().ticks_run(), 0);
    city.tick(10);
    assert_eq!(city.economy().ticks_run(), 1);
    city.assert_treasury(752.0);
}

#[test]
fn test_invalid_interval_keeps_the_running_one() {
    for interval in [-1.0, 0.0] {
        let params = GameParams {
            economy: EconomyParams {
                update_interval_secs: interval,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut city = street().with_params(params);
        house_and_shop(&mut city);

        city.tick(10);
        assert_eq!(city.economy().ticks_run(), 1, "interval {interval}");
        assert_eq!(city.economy().interval().as_secs_f32(), 1.0);
        city.assert_treasury(751.0);
    }
}

#[test]
fn test_two_houses_share_one_shop() {
    let mut city = street();
    let first = city
        .place(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .unwrap();
    city.place(ALICE, "Shop", IVec2::new(1, 0), Rotation::Deg0)
        .unwrap();
    let second = city
        .place(ALICE, "House", IVec2::new(2, 0), Rotation::Deg0)
        .unwrap();

    city.tick_economy(1);

    // First house registered takes everything the shop offers.
    city.assert_happy_residents(first, 10);
    city.assert_happy_residents(second, 0);
    city.assert_treasury(650.0 + 1.0 + 0.5);
    city.assert_placement_invariants();
}
