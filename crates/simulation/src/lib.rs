use bevy::prelude::*;

pub mod buildings;
pub mod config;
pub mod economy;
pub mod game_actions;
pub mod game_params;
pub mod grid_geometry;
pub mod placement;
pub mod roads;
pub mod simulation_sets;
pub mod spatial_grid;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;
pub mod tiles;
pub mod world_init;

pub use simulation_sets::SimulationSet;

use buildings::{BuildingCatalog, BuildingRegistry};
use game_params::GameParams;
use roads::RoadNetwork;
use tiles::TileRegistry;

/// Fixed-update rate of the simulation schedule.
pub const FIXED_TICK_HZ: f64 = 10.0;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Wires the registries, the action executor and the economy into a
/// headless `App`. Everything simulation-related runs in `FixedUpdate`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            .init_resource::<TickCounter>()
            .init_resource::<GameParams>()
            .init_resource::<BuildingCatalog>()
            .init_resource::<TileRegistry>()
            .init_resource::<RoadNetwork>()
            .init_resource::<BuildingRegistry>()
            .configure_sets(
                FixedUpdate,
                (SimulationSet::PreSim, SimulationSet::Simulation).chain(),
            )
            .add_systems(Startup, world_init::init_world)
            .add_systems(
                FixedUpdate,
                advance_tick_counter.in_set(SimulationSet::PreSim),
            );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            economy::EconomyPlugin,
        ));
    }
}
