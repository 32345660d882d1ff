//! Action executor system: each fixed tick it takes the due entries from the
//! [`ActionQueue`], applies them and records results in the
//! [`ActionResultLog`].

use bevy::prelude::*;

use crate::buildings::{BuildingCatalog, BuildingId, BuildingRecord, BuildingRegistry};
use crate::economy::{CityBudget, Treasury};
use crate::game_params::GameParams;
use crate::grid_geometry::Rotation;
use crate::placement::{confirm_placement, register_building, unregister_building, PlacementError};
use crate::roads::RoadNetwork;
use crate::tiles::{PlayerId, TileRegistry};
use crate::TickCounter;

use super::result_log::ActionResultLog;
use super::{ActionError, ActionQueue, ActionResult, GameAction};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Runs every queued action that is due on this tick, in order.
#[allow(clippy::too_many_arguments)]
pub fn execute_queued_actions(
    tick: Res<TickCounter>,
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    params: Res<GameParams>,
    catalog: Res<BuildingCatalog>,
    mut tiles: ResMut<TileRegistry>,
    mut roads: ResMut<RoadNetwork>,
    mut buildings: ResMut<BuildingRegistry>,
    mut budget: ResMut<CityBudget>,
) {
    let actions = queue.drain_due(tick.0);
    for queued in actions {
        let mut world = ActionWorld {
            params: &params,
            catalog: &catalog,
            tiles: &mut tiles,
            roads: &mut roads,
            buildings: &mut buildings,
            budget: &mut budget,
        };
        let result = world.execute(&queued.action);
        if let ActionResult::Error(e) = &result {
            debug!("{:?} action failed: {e}", queued.source);
        }
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub(crate) struct ActionWorld<'a> {
    pub params: &'a GameParams,
    pub catalog: &'a BuildingCatalog,
    pub tiles: &'a mut TileRegistry,
    pub roads: &'a mut RoadNetwork,
    pub buildings: &'a mut BuildingRegistry,
    pub budget: &'a mut CityBudget,
}

impl ActionWorld<'_> {
    pub(crate) fn execute(&mut self, action: &GameAction) -> ActionResult {
        let outcome = match action {
            GameAction::PurchaseTile { player, tile } => self.purchase_tile(*player, *tile),
            GameAction::PlaceBuilding {
                player,
                template,
                position,
                rotation,
            } => self.place_building(*player, template, *position, *rotation),
            GameAction::Demolish { building } => self.demolish(*building),
            GameAction::PlaceRoad { start, end } => {
                let placed = self
                    .roads
                    .place_road_line(IVec2::from(*start), IVec2::from(*end));
                debug!("Placed {placed} road pieces");
                Ok(ActionResult::Success)
            }
            GameAction::PlaceIntersection { cell } => {
                self.roads.place_intersection(IVec2::from(*cell));
                Ok(ActionResult::Success)
            }
            GameAction::RegisterBuilding { record } => self.register(record),
        };
        outcome.unwrap_or_else(ActionResult::Error)
    }

    // -----------------------------------------------------------------------
    // Execution functions
    // -----------------------------------------------------------------------

    /// Buy a tile: bounds, owner and funds are checked before anything moves.
    fn purchase_tile(
        &mut self,
        player: PlayerId,
        (x, y): (i32, i32),
    ) -> Result<ActionResult, ActionError> {
        match self.tiles.owner(x, y)? {
            Some(owner) if owner == player => {
                return Ok(ActionResult::SuccessWithWarning(format!(
                    "Tile ({x}, {y}) is already yours"
                )));
            }
            Some(_) => return Err(ActionError::AlreadyOwnedByOther),
            None => {}
        }

        let cost = self.params.land.tile_cost;
        if !self.budget.deduct(cost) {
            return Err(PlacementError::InsufficientFunds.into());
        }
        self.tiles.set_owner(x, y, player)?;
        info!("Player {} bought tile ({x}, {y}) for {cost}", player.0);
        Ok(ActionResult::Success)
    }

    fn place_building(
        &mut self,
        player: PlayerId,
        name: &str,
        (x, y): (f32, f32),
        rotation: Rotation,
    ) -> Result<ActionResult, ActionError> {
        let template = self
            .catalog
            .get(name)
            .ok_or_else(|| ActionError::UnknownTemplate(name.to_string()))?;
        let id = confirm_placement(
            &*self.tiles,
            &*self.roads,
            self.buildings,
            self.budget,
            template,
            Vec2::new(x, y),
            rotation,
            player,
        )?;
        Ok(ActionResult::Placed(id))
    }

    fn demolish(&mut self, id: BuildingId) -> Result<ActionResult, ActionError> {
        if unregister_building(self.buildings, id) {
            Ok(ActionResult::Success)
        } else {
            Err(ActionError::NotFound)
        }
    }

    fn register(&mut self, record: &BuildingRecord) -> Result<ActionResult, ActionError> {
        let id = register_building(self.buildings, record)?;
        Ok(ActionResult::Placed(id))
    }
}
