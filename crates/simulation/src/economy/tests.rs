#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::buildings::{BuildingId, BuildingKind, BuildingRegistry, BuildingTemplate, PlacedBuilding};
    use crate::economy::engine::allocate_residents;
    use crate::economy::{allocate_and_collect, CityBudget, EconomyEngine, EconomyPhase, Treasury};
    use crate::config::MAX_ECONOMY_TICKS_PER_STEP;
    use crate::game_params::EconomyParams;
    use crate::grid_geometry::{sub_tile_to_world, Footprint, Rotation};
    use crate::tiles::PlayerId;

    fn place(
        registry: &mut BuildingRegistry,
        kind: BuildingKind,
        cell: IVec2,
        (residents, jobs, shopping): (u32, u32, u32),
    ) -> BuildingId {
        let template = BuildingTemplate {
            name: kind.label().to_string(),
            kind,
            footprint: Footprint::new(1, 1),
            cost: 0.0,
            residents,
            jobs,
            shopping_space: shopping,
            description: String::new(),
        };
        let building =
            PlacedBuilding::from_template(&template, sub_tile_to_world(cell), Rotation::Deg0, PlayerId(1));
        registry.insert(building).expect("free cell")
    }

    fn happy(registry: &BuildingRegistry, id: BuildingId) -> u32 {
        registry.get(id).map(|b| b.happy_residents).unwrap_or_default()
    }

    #[test]
    fn test_house_next_to_shop_is_fully_happy() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::new(0, 0), (10, 0, 0));
        let shop = place(&mut registry, BuildingKind::Commercial, IVec2::new(1, 0), (0, 5, 5));

        let report = allocate_and_collect(&mut registry, &EconomyParams::default());
        assert_eq!(happy(&registry, house), 10);
        assert_eq!(report.happy_residents, 10);
        assert_eq!(report.total_residents, 10);
        assert!((report.total_income - 1.0).abs() < 1e-9, "got {}", report.total_income);

        let shop = registry.get(shop).unwrap();
        assert_eq!((shop.available_jobs, shop.available_shopping), (0, 0));
    }

    #[test]
    fn test_isolated_house_earns_unhappy_rate() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (10, 0, 0));
        let report = allocate_and_collect(&mut registry, &EconomyParams::default());
        assert_eq!(happy(&registry, house), 0);
        assert!((report.total_income - 0.5).abs() < 1e-9, "got {}", report.total_income);
    }

    #[test]
    fn test_jobs_are_taken_before_shopping() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (6, 0, 0));
        let shop = place(&mut registry, BuildingKind::Commercial, IVec2::new(1, 0), (0, 4, 5));

        allocate_and_collect(&mut registry, &EconomyParams::default());
        assert_eq!(happy(&registry, house), 6);
        let shop = registry.get(shop).unwrap();
        assert_eq!((shop.available_jobs, shop.available_shopping), (0, 3));
    }

    #[test]
    fn test_earlier_homes_get_first_pick() {
        let mut registry = BuildingRegistry::default();
        let first = place(&mut registry, BuildingKind::Residential, IVec2::new(-1, 0), (8, 0, 0));
        let second = place(&mut registry, BuildingKind::Residential, IVec2::new(1, 0), (8, 0, 0));
        place(&mut registry, BuildingKind::Industrial, IVec2::ZERO, (0, 10, 0));

        let report = allocate_and_collect(&mut registry, &EconomyParams::default());
        assert_eq!(happy(&registry, first), 8);
        assert_eq!(happy(&registry, second), 2);
        // 10 happy, 6 unhappy.
        assert!((report.total_income - 1.3).abs() < 1e-9, "got {}", report.total_income);
    }

    #[test]
    fn test_search_radius_limits_neighbours() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (5, 0, 0));
        place(&mut registry, BuildingKind::Commercial, IVec2::new(3, 0), (0, 5, 5));

        allocate_and_collect(&mut registry, &EconomyParams::default());
        assert_eq!(happy(&registry, house), 0);

        let wide = EconomyParams {
            search_radius: 3.0,
            ..Default::default()
        };
        allocate_and_collect(&mut registry, &wide);
        assert_eq!(happy(&registry, house), 5);
    }

    #[test]
    fn test_ticks_are_idempotent() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (10, 0, 0));
        place(&mut registry, BuildingKind::Commercial, IVec2::new(0, 1), (0, 3, 2));

        let params = EconomyParams::default();
        let first = allocate_and_collect(&mut registry, &params);
        let second = allocate_and_collect(&mut registry, &params);
        assert_eq!(first, second);
        assert_eq!(happy(&registry, house), 5);
    }

    #[test]
    fn test_happy_never_exceeds_residents() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (3, 0, 0));
        place(&mut registry, BuildingKind::Commercial, IVec2::new(1, 0), (0, 50, 50));
        allocate_and_collect(&mut registry, &EconomyParams::default());
        let b = registry.get(house).unwrap();
        assert_eq!(b.happy_residents, 3);
        assert_eq!(b.unhappy_residents(), 0);
    }

    #[test]
    fn test_missing_neighbour_is_skipped() {
        let mut registry = BuildingRegistry::default();
        let house = place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (4, 0, 0));
        let shop = place(&mut registry, BuildingKind::Commercial, IVec2::new(1, 0), (0, 2, 2));

        let allocation = allocate_residents(&mut registry, house, &[BuildingId(999), shop]);
        assert_eq!(allocation.skipped, 1);
        assert_eq!(allocation.happy, 4);
        assert_eq!(happy(&registry, house), 4);
    }

    #[test]
    fn test_engine_pays_positive_income_only() {
        let mut registry = BuildingRegistry::default();
        let mut budget = CityBudget::with_starting_money(100.0);
        let mut engine = EconomyEngine::default();

        let report = engine
            .run_tick(&mut registry, &EconomyParams::default(), &mut budget)
            .expect("idle engine runs");
        assert_eq!(report.total_income, 0.0);
        assert!((budget.balance() - 100.0).abs() < f64::EPSILON);
        assert_eq!(budget.total_income, 0.0);

        place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (10, 0, 0));
        engine.run_tick(&mut registry, &EconomyParams::default(), &mut budget);
        assert!((budget.balance() - 100.5).abs() < 1e-9);
        assert_eq!(engine.ticks_run(), 2);
        assert_eq!(engine.phase(), EconomyPhase::Idle);
        assert!(engine.last_report().is_some());
    }

    #[test]
    fn test_engine_advance_counts_due_ticks() {
        let mut engine = EconomyEngine::new(1.0);
        assert_eq!(engine.advance(Duration::from_millis(400)), 0);
        assert_eq!(engine.advance(Duration::from_millis(700)), 1);
        assert_eq!(engine.advance(Duration::from_millis(2000)), 2);

        engine.set_interval(0.5);
        assert_eq!(engine.interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_engine_ignores_invalid_intervals() {
        for bad in [0.0, -1.0, f32::NAN] {
            let engine = EconomyEngine::new(bad);
            assert_eq!(engine.interval(), Duration::from_secs(1), "new({bad})");
        }

        let mut engine = EconomyEngine::new(0.5);
        engine.set_interval(-1.0);
        engine.set_interval(0.0);
        assert_eq!(engine.interval(), Duration::from_millis(500));
        assert_eq!(engine.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_engine_caps_due_ticks_per_step() {
        let mut engine = EconomyEngine::new(0.001);
        assert_eq!(engine.advance(Duration::from_secs(10)), MAX_ECONOMY_TICKS_PER_STEP);
        assert_eq!(engine.advance(Duration::from_millis(2)), 2);
    }

    #[test]
    fn test_run_tick_scales_income_by_engine_interval_when_params_are_invalid() {
        let mut registry = BuildingRegistry::default();
        place(&mut registry, BuildingKind::Residential, IVec2::ZERO, (10, 0, 0));
        let mut engine = EconomyEngine::new(2.0);
        let mut budget = CityBudget::with_starting_money(0.0);
        let params = EconomyParams {
            update_interval_secs: -3.0,
            ..Default::default()
        };
        let report = engine.run_tick(&mut registry, &params, &mut budget).unwrap();
        assert!((report.total_income - 1.0).abs() < 1e-9);
    }
}
