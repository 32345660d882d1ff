use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingRecord, BuildingRegistry, BuildingTemplate, PlacedBuilding};
use crate::economy::Treasury;
use crate::grid_geometry::{snap_to_sub_tile, Rotation};
use crate::roads::RoadQuery;
use crate::tiles::{PlayerId, TileRegistry};

use super::error::PlacementError;
use super::validator::{validate_placement, PlacementRequest};

/// Validate, charge and register a building in one step.
///
/// Nothing is modified unless every step succeeds. If the registry refuses
/// the insert, the placement is validated again so the caller gets the
/// geometric reason instead of a bare `SlotOccupied`.
#[allow(clippy::too_many_arguments)]
pub fn confirm_placement<R: RoadQuery + ?Sized, T: Treasury + ?Sized>(
    tiles: &TileRegistry,
    roads: &R,
    buildings: &mut BuildingRegistry,
    treasury: &mut T,
    template: &BuildingTemplate,
    position: Vec2,
    rotation: Rotation,
    player: PlayerId,
) -> Result<BuildingId, PlacementError> {
    let request = PlacementRequest {
        footprint: template.footprint,
        position: snap_to_sub_tile(position),
        rotation,
        player,
    };
    validate_placement(tiles, roads, buildings, &request).into_result()?;

    if !treasury.can_afford(template.cost) {
        debug!(
            "Cannot afford {} ({} > {})",
            template.name,
            template.cost,
            treasury.balance()
        );
        return Err(PlacementError::InsufficientFunds);
    }

    let building = PlacedBuilding::from_template(template, request.position, rotation, player);
    let id = match buildings.insert(building) {
        Ok(id) => id,
        Err(PlacementError::SlotOccupied) => {
            validate_placement(tiles, roads, buildings, &request).into_result()?;
            return Err(PlacementError::SlotOccupied);
        }
        Err(e) => return Err(e),
    };

    if !treasury.deduct(template.cost) {
        buildings.remove(id);
        return Err(PlacementError::InsufficientFunds);
    }

    info!(
        "Placed {} #{} at ({:.1}, {:.1}) for {}",
        template.name, id.0, request.position.x, request.position.y, template.cost
    );
    Ok(id)
}

/// Register a building described by an external record, bypassing
/// validation and payment.
pub fn register_building(
    buildings: &mut BuildingRegistry,
    record: &BuildingRecord,
) -> Result<BuildingId, PlacementError> {
    let building = PlacedBuilding::from_record(record)?;
    buildings.insert(building)
}

/// Remove a building. Unknown ids are ignored.
pub fn unregister_building(buildings: &mut BuildingRegistry, id: BuildingId) -> bool {
    buildings.remove(id).is_some()
}
