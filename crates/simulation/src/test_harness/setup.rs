//! Builder methods for land, road, and building setup in integration tests.

use bevy::prelude::*;

use crate::buildings::{BuildingCatalog, BuildingId, BuildingRegistry};
use crate::economy::CityBudget;
use crate::game_params::GameParams;
use crate::grid_geometry::{sub_tile_to_world, Rotation};
use crate::placement::{confirm_placement, PlacementError};
use crate::roads::RoadNetwork;
use crate::tiles::{PlayerId, TileRegistry};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Budget, land, roads
    // -----------------------------------------------------------------------

    /// Set the city treasury to the given amount.
    pub fn with_budget(mut self, treasury: f64) -> Self {
        self.app.world_mut().resource_mut::<CityBudget>().treasury = treasury;
        self
    }

    pub fn with_params(mut self, params: GameParams) -> Self {
        self.app.world_mut().insert_resource(params);
        self
    }

    pub fn with_catalog(mut self, catalog: BuildingCatalog) -> Self {
        self.app.world_mut().insert_resource(catalog);
        self
    }

    /// Give `player` every tile in `[x0, x1] x [y0, y1]`, free of charge.
    pub fn with_owned_rect(
        mut self,
        player: PlayerId,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Self {
        let mut tiles = self.app.world_mut().resource_mut::<TileRegistry>();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Err(e) = tiles.set_owner(x, y, player) {
                    panic!("with_owned_rect: tile ({x}, {y}): {e}");
                }
            }
        }
        self
    }

    /// Straight road along sub-tile row `y` from column `x0` to `x1`.
    pub fn with_road_row(mut self, y: i32, x0: i32, x1: i32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<RoadNetwork>()
            .place_road_line(IVec2::new(x0, y), IVec2::new(x1, y));
        self
    }

    /// Straight road along sub-tile column `x` from row `y0` to `y1`.
    pub fn with_road_column(mut self, x: i32, y0: i32, y1: i32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<RoadNetwork>()
            .place_road_line(IVec2::new(x, y0), IVec2::new(x, y1));
        self
    }

    pub fn with_intersection(mut self, cell: IVec2) -> Self {
        self.app
            .world_mut()
            .resource_mut::<RoadNetwork>()
            .place_intersection(cell);
        self
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    /// Place a catalog building anchored on a sub-tile cell, panicking if the
    /// placement is rejected.
    pub fn with_building(
        mut self,
        player: PlayerId,
        template: &str,
        cell: IVec2,
        rotation: Rotation,
    ) -> Self {
        if let Err(e) = self.place(player, template, cell, rotation) {
            panic!("with_building: {template} at {cell:?}: {e}");
        }
        self
    }

    /// Place a catalog building through `confirm_placement`, paying from the
    /// city budget.
    pub fn place(
        &mut self,
        player: PlayerId,
        template: &str,
        cell: IVec2,
        rotation: Rotation,
    ) -> Result<BuildingId, PlacementError> {
        let world = self.app.world_mut();
        let Some(template) = world.resource::<BuildingCatalog>().get(template).cloned() else {
            panic!("no catalog template named {template}");
        };
        let position = sub_tile_to_world(cell);
        world.resource_scope(|world, mut buildings: Mut<BuildingRegistry>| {
            world.resource_scope(|world, mut budget: Mut<CityBudget>| {
                confirm_placement(
                    world.resource::<TileRegistry>(),
                    world.resource::<RoadNetwork>(),
                    &mut buildings,
                    &mut *budget,
                    &template,
                    position,
                    rotation,
                    player,
                )
            })
        })
    }
}
