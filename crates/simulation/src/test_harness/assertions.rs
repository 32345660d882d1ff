//! Assertion helpers for `TestCity` integration tests.

use crate::buildings::BuildingId;
use crate::tiles::PlayerId;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert the treasury is within `1e-6` of `expected`.
    pub fn assert_treasury(&self, expected: f64) {
        let treasury = self.budget().treasury;
        assert!(
            (treasury - expected).abs() < 1e-6,
            "Expected treasury {expected}, got {treasury}"
        );
    }

    pub fn assert_budget_above(&self, amount: f64) {
        let treasury = self.budget().treasury;
        assert!(
            treasury > amount,
            "Expected treasury > {amount}, got {treasury}"
        );
    }

    pub fn assert_building_count(&self, expected: usize) {
        let count = self.building_count();
        assert_eq!(count, expected, "Expected {expected} buildings, got {count}");
    }

    pub fn assert_happy_residents(&self, id: BuildingId, expected: u32) {
        let Some(building) = self.building(id) else {
            panic!("Expected building #{} to exist", id.0);
        };
        assert_eq!(
            building.happy_residents, expected,
            "Expected {expected} happy residents in #{}, got {}",
            id.0, building.happy_residents
        );
    }

    pub fn assert_tile_owner(&self, x: i32, y: i32, expected: Option<PlayerId>) {
        let owner = self.tiles().owner(x, y);
        assert_eq!(
            owner,
            Ok(expected),
            "Expected tile ({x}, {y}) owner {expected:?}, got {owner:?}"
        );
    }

    /// No two placed footprints share interior area (edge contact within float
    /// noise is fine) and every building sits on land its owner holds.
    pub fn assert_placement_invariants(&self) {
        let buildings: Vec<_> = self.buildings().iter().collect();
        for (i, (id_a, a)) in buildings.iter().enumerate() {
            for (id_b, b) in &buildings[i + 1..] {
                let shared = a.rect().intersect(b.rect());
                assert!(
                    shared.is_empty() || shared.width().min(shared.height()) < 1e-4,
                    "Buildings #{} and #{} overlap",
                    id_a.0,
                    id_b.0
                );
            }
            for sample in a.footprint.ownership_samples(a.position(), a.rotation) {
                let owner = self.tiles().tile_at_world(sample).and_then(|t| t.owner);
                assert_eq!(
                    owner,
                    Some(a.owner),
                    "Building #{} has a corner on land it does not own",
                    id_a.0
                );
            }
            assert!(
                a.happy_residents <= a.residents,
                "Building #{} has more happy residents than residents",
                id_a.0
            );
        }
    }
}
