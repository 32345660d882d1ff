// =============================================================================
// New-game setup: tile grid and starting treasury from `GameParams`.
// =============================================================================

use bevy::prelude::*;

use crate::economy::CityBudget;
use crate::game_params::GameParams;
use crate::tiles::TileRegistry;

/// Marker resource that, when present, causes `init_world` to leave the
/// registries alone. Used when the caller seeds the world itself.
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(
    params: Res<GameParams>,
    mut tiles: ResMut<TileRegistry>,
    mut budget: ResMut<CityBudget>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        return;
    }
    if tiles.width() > 0 {
        debug!("Tile grid already present, keeping it");
        return;
    }
    tiles.initialize(params.land.grid_width, params.land.grid_height);
    *budget = CityBudget::with_starting_money(params.land.starting_money);
    info!(
        "New city: {}x{} tiles, treasury {}",
        params.land.grid_width, params.land.grid_height, params.land.starting_money
    );
}
