use bevy::prelude::*;

use super::executor::execute_queued_actions;
use super::result_log::ActionResultLog;
use super::ActionQueue;
use crate::{advance_tick_counter, SimulationSet};

/// Registers the action queue, result log and executor. Actions run at the
/// start of a fixed tick, before anything in `SimulationSet::Simulation`
/// reads the registries.
pub struct GameActionsPlugin;

impl Plugin for GameActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionQueue>()
            .init_resource::<ActionResultLog>()
            .add_systems(
                FixedUpdate,
                execute_queued_actions
                    .after(advance_tick_counter)
                    .in_set(SimulationSet::PreSim),
            );
    }
}
