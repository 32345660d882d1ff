use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::buildings::BuildingCatalog;
use crate::grid_geometry::Rotation;
use crate::test_harness::TestCity;
use crate::tiles::PlayerId;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

/// 4x4 tiles split between two players, with a few road rows and columns
/// laid across the whole grid.
fn contested_city() -> TestCity {
    let mut city = TestCity::new(4, 4)
        .with_budget(1.0e9)
        .with_owned_rect(ALICE, 0, 0, 1, 3)
        .with_owned_rect(BOB, 2, 0, 3, 3);
    for row in [1, 6, 11, 16] {
        city = city.with_road_row(row, -2, 17);
    }
    for column in [4, 12] {
        city = city.with_road_column(column, -2, 17);
    }
    city
}

#[test]
fn test_random_placements_never_break_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut city = contested_city()
        .with_building(ALICE, "House", IVec2::new(0, 0), Rotation::Deg0)
        .with_building(BOB, "Shop", IVec2::new(15, 0), Rotation::Deg0);
    let names: Vec<String> = city_catalog_names();

    for _ in 0..300 {
        let name = &names[rng.gen_range(0..names.len())];
        let cell = IVec2::new(rng.gen_range(-3..19), rng.gen_range(-3..19));
        let rotation = Rotation::from_index(rng.gen_range(0..4));
        let player = if rng.gen_bool(0.5) { ALICE } else { BOB };
        let before = city.building_count();
        match city.place(player, name, cell, rotation) {
            Ok(id) => {
                assert_eq!(city.building_count(), before + 1);
                assert_eq!(city.building(id).unwrap().owner, player);
            }
            Err(_) => assert_eq!(city.building_count(), before),
        }
    }

    city.assert_placement_invariants();
    city.tick_economy(2);
    city.assert_placement_invariants();
    city.assert_budget_above(0.0);
}

#[test]
fn test_same_seed_builds_the_same_city() {
    let build = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut city = contested_city();
        let names = city_catalog_names();
        for _ in 0..100 {
            let name = &names[rng.gen_range(0..names.len())];
            let cell = IVec2::new(rng.gen_range(-3..19), rng.gen_range(-3..19));
            let rotation = Rotation::from_index(rng.gen_range(0..4));
            let _ = city.place(ALICE, name, cell, rotation);
        }
        city.buildings()
            .iter()
            .map(|(_, b)| b.to_record())
            .collect::<Vec<_>>()
    };
    assert_eq!(build(7), build(7));
}

fn city_catalog_names() -> Vec<String> {
    BuildingCatalog::default()
        .buildings
        .iter()
        .map(|t| t.name.clone())
        .collect()
}
