use bevy::prelude::*;

use crate::buildings::BuildingRegistry;
use crate::game_params::GameParams;
use crate::SimulationSet;

use super::budget::CityBudget;
use super::engine::EconomyEngine;

/// Advance the economy timer by one fixed step and run every tick that fell
/// due, paying income into the city budget.
pub fn economy_tick(
    time: Res<Time<Fixed>>,
    params: Res<GameParams>,
    mut engine: ResMut<EconomyEngine>,
    mut buildings: ResMut<BuildingRegistry>,
    mut budget: ResMut<CityBudget>,
) {
    engine.set_interval(params.economy.update_interval_secs);
    let due = engine.advance(time.timestep());
    for _ in 0..due {
        engine.run_tick(&mut buildings, &params.economy, &mut *budget);
    }
}

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityBudget>()
            .init_resource::<EconomyEngine>()
            .add_systems(FixedUpdate, economy_tick.in_set(SimulationSet::Simulation));
    }
}
