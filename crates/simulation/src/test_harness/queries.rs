//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingRegistry, PlacedBuilding};
use crate::economy::{CityBudget, EconomyEngine};
use crate::game_actions::{ActionQueue, ActionResult, ActionResultLog, ActionSource, GameAction};
use crate::game_params::GameParams;
use crate::roads::RoadNetwork;
use crate::tiles::TileRegistry;
use crate::TickCounter;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. Each run counts as one `Time<Fixed>` timestep regardless of
    /// wall-clock time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Fixed ticks that make up one economy interval.
    pub fn ticks_per_economy_tick(&self) -> u32 {
        let interval = self.app.world().resource::<EconomyEngine>().interval();
        let step = self.app.world().resource::<Time<Fixed>>().timestep();
        (interval.as_nanos() / step.as_nanos()).max(1) as u32
    }

    /// Run exactly enough fixed ticks for `n` economy ticks.
    pub fn tick_economy(&mut self, n: u32) {
        let per = self.ticks_per_economy_tick();
        self.tick(per * n);
    }

    /// Queue an action as the player; it runs on the next tick.
    pub fn queue(&mut self, action: GameAction) -> &mut Self {
        let world = self.app.world_mut();
        let tick = world.resource::<TickCounter>().0;
        world
            .resource_mut::<ActionQueue>()
            .push(tick, ActionSource::Player, action);
        self
    }

    // -----------------------------------------------------------------------
    // Resource queries
    // -----------------------------------------------------------------------

    pub fn budget(&self) -> &CityBudget {
        self.app.world().resource::<CityBudget>()
    }

    pub fn tiles(&self) -> &TileRegistry {
        self.app.world().resource::<TileRegistry>()
    }

    pub fn roads(&self) -> &RoadNetwork {
        self.app.world().resource::<RoadNetwork>()
    }

    pub fn buildings(&self) -> &BuildingRegistry {
        self.app.world().resource::<BuildingRegistry>()
    }

    pub fn building(&self, id: BuildingId) -> Option<&PlacedBuilding> {
        self.buildings().get(id)
    }

    pub fn building_count(&self) -> usize {
        self.buildings().len()
    }

    pub fn economy(&self) -> &EconomyEngine {
        self.app.world().resource::<EconomyEngine>()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    /// The last `n` executed actions and their results, oldest first.
    pub fn last_results(&self, n: usize) -> Vec<(GameAction, ActionResult)> {
        self.app
            .world()
            .resource::<ActionResultLog>()
            .last_n(n)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn last_result(&self) -> Option<ActionResult> {
        self.app
            .world()
            .resource::<ActionResultLog>()
            .last()
            .map(|(_, r)| r.clone())
    }
}
