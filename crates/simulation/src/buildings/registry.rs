use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use crate::placement::PlacementError;
use crate::spatial_grid::SpatialGrid;

use super::types::{BuildingId, BuildingKind, PlacedBuilding};

/// Every building standing on the map, keyed by insertion-ordered id.
///
/// Keeps two indices in step with the building map: a cell → id map covering
/// each footprint cell and anchor, and a [`SpatialGrid`] of anchors for
/// neighbourhood queries.
#[derive(Resource, Debug, Clone, Default)]
pub struct BuildingRegistry {
    buildings: BTreeMap<BuildingId, PlacedBuilding>,
    cells: HashMap<IVec2, BuildingId>,
    spatial: SpatialGrid,
    next_id: u64,
}

impl BuildingRegistry {
    fn claimed_cells(building: &PlacedBuilding) -> Vec<IVec2> {
        let mut cells = building.occupied_cells();
        if !cells.contains(&building.anchor) {
            cells.push(building.anchor);
        }
        cells
    }

    /// Register a building. Fails with `SlotOccupied`, leaving the registry
    /// untouched, if its anchor or any footprint cell is already claimed, and
    /// with `InvalidFootprint` if the footprint is empty or oversized.
    pub fn insert(&mut self, building: PlacedBuilding) -> Result<BuildingId, PlacementError> {
        if !building.footprint.is_supported() {
            warn!(
                "Rejecting {} at {:?}: unsupported footprint {}x{}",
                building.kind.label(),
                building.anchor,
                building.footprint.width,
                building.footprint.length
            );
            return Err(PlacementError::InvalidFootprint);
        }
        let cells = Self::claimed_cells(&building);
        if let Some(cell) = cells.iter().find(|c| self.cells.contains_key(c)) {
            debug!(
                "Rejecting {} at {:?}: cell {:?} already claimed",
                building.kind.label(),
                building.anchor,
                cell
            );
            return Err(PlacementError::SlotOccupied);
        }

        let id = BuildingId(self.next_id);
        self.next_id += 1;
        for cell in cells {
            self.cells.insert(cell, id);
        }
        self.spatial.insert(id, building.anchor);
        debug!(
            "Registered {} #{} at {:?} ({:?})",
            building.kind.label(),
            id.0,
            building.anchor,
            building.rotation
        );
        self.buildings.insert(id, building);
        Ok(id)
    }

    /// Remove a building and free its cells. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: BuildingId) -> Option<PlacedBuilding> {
        let building = self.buildings.remove(&id)?;
        for cell in Self::claimed_cells(&building) {
            if self.cells.get(&cell) == Some(&id) {
                self.cells.remove(&cell);
            }
        }
        self.spatial.remove(id, building.anchor);
        debug!("Removed building #{}", id.0);
        Some(building)
    }

    pub fn get(&self, id: BuildingId) -> Option<&PlacedBuilding> {
        self.buildings.get(&id)
    }

    pub fn get_mut(&mut self, id: BuildingId) -> Option<&mut PlacedBuilding> {
        self.buildings.get_mut(&id)
    }

    pub fn id_at_cell(&self, cell: IVec2) -> Option<BuildingId> {
        self.cells.get(&cell).copied()
    }

    /// Buildings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BuildingId, &PlacedBuilding)> {
        self.buildings.iter().map(|(id, b)| (*id, b))
    }

    pub fn ids_of_kind(&self, kind: BuildingKind) -> Vec<BuildingId> {
        self.iter()
            .filter(|(_, b)| b.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Buildings whose anchor is within `radius` sub-tiles of `center`, in
    /// insertion order.
    pub fn find_within_radius(&self, center: IVec2, radius: f32) -> Vec<BuildingId> {
        let mut ids = self.spatial.query_radius(center, radius);
        ids.sort_unstable();
        ids
    }

    /// Full world rects of every placed footprint, in insertion order.
    pub fn footprint_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.buildings.values().map(PlacedBuilding::rect)
    }

    pub fn reset_allocations(&mut self) {
        for building in self.buildings.values_mut() {
            building.reset_allocation();
        }
    }

    pub fn total_residents(&self) -> u32 {
        self.buildings.values().map(|b| b.residents).sum()
    }

    pub fn total_happy_residents(&self) -> u32 {
        self.buildings.values().map(|b| b.happy_residents).sum()
    }
}
