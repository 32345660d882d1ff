use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid_geometry::{snap_to_sub_tile, sub_tile_to_world, world_to_sub_tile, Footprint, Rotation};
use crate::placement::PlacementError;
use crate::tiles::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
}

impl BuildingKind {
    /// Stable numeric id used by external records.
    pub fn id(self) -> u32 {
        match self {
            BuildingKind::Residential => 0,
            BuildingKind::Commercial => 1,
            BuildingKind::Industrial => 2,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, PlacementError> {
        match id {
            0 => Ok(BuildingKind::Residential),
            1 => Ok(BuildingKind::Commercial),
            2 => Ok(BuildingKind::Industrial),
            _ => Err(PlacementError::UnknownBuildingKind),
        }
    }

    pub fn has_residents(self) -> bool {
        matches!(self, BuildingKind::Residential)
    }

    pub fn has_jobs(self) -> bool {
        matches!(self, BuildingKind::Commercial | BuildingKind::Industrial)
    }

    pub fn has_shopping(self) -> bool {
        matches!(self, BuildingKind::Commercial)
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Residential => "Residential",
            BuildingKind::Commercial => "Commercial",
            BuildingKind::Industrial => "Industrial",
        }
    }
}

/// Static catalog entry a building is placed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingTemplate {
    pub name: String,
    pub kind: BuildingKind,
    #[serde(default)]
    pub footprint: Footprint,
    pub cost: f64,
    #[serde(default)]
    pub residents: u32,
    #[serde(default)]
    pub jobs: u32,
    #[serde(default)]
    pub shopping_space: u32,
    #[serde(default)]
    pub description: String,
}

/// Insertion-ordered handle into the [`BuildingRegistry`](super::BuildingRegistry).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct BuildingId(pub u64);

/// A building standing on the map.
///
/// `residents`, `jobs` and `shopping_space` are nominal capacities; only the
/// ones meaningful for `kind` are non-zero. `happy_residents`,
/// `available_jobs` and `available_shopping` are rewritten by every economy
/// tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBuilding {
    pub anchor: IVec2,
    pub rotation: Rotation,
    pub footprint: Footprint,
    pub kind: BuildingKind,
    pub owner: PlayerId,
    pub residents: u32,
    pub jobs: u32,
    pub shopping_space: u32,
    pub happy_residents: u32,
    pub available_jobs: u32,
    pub available_shopping: u32,
}

impl PlacedBuilding {
    pub fn from_template(
        template: &BuildingTemplate,
        position: Vec2,
        rotation: Rotation,
        owner: PlayerId,
    ) -> Self {
        Self::with_capacities(
            template.kind,
            world_to_sub_tile(snap_to_sub_tile(position)),
            rotation,
            template.footprint,
            owner,
            (template.residents, template.jobs, template.shopping_space),
        )
    }

    /// Rebuild a building from an externally stored record.
    pub fn from_record(record: &BuildingRecord) -> Result<Self, PlacementError> {
        let kind = BuildingKind::from_id(record.kind_id)?;
        let footprint = Footprint::new(record.width, record.length);
        if !footprint.is_supported() {
            return Err(PlacementError::InvalidFootprint);
        }
        Ok(Self::with_capacities(
            kind,
            IVec2::new(record.x, record.y),
            Rotation::from_index(record.rotation_index),
            footprint,
            record.owner,
            (record.residents, record.jobs, record.shopping_space),
        ))
    }

    fn with_capacities(
        kind: BuildingKind,
        anchor: IVec2,
        rotation: Rotation,
        footprint: Footprint,
        owner: PlayerId,
        (residents, jobs, shopping): (u32, u32, u32),
    ) -> Self {
        let residents = if kind.has_residents() { residents } else { 0 };
        let jobs = if kind.has_jobs() { jobs } else { 0 };
        let shopping_space = if kind.has_shopping() { shopping } else { 0 };
        Self {
            anchor,
            rotation,
            footprint,
            kind,
            owner,
            residents,
            jobs,
            shopping_space,
            happy_residents: 0,
            available_jobs: jobs,
            available_shopping: shopping_space,
        }
    }

    pub fn position(&self) -> Vec2 {
        sub_tile_to_world(self.anchor)
    }

    /// Full world-space footprint rect.
    pub fn rect(&self) -> Rect {
        self.footprint.rect(self.position(), self.rotation, 1.0)
    }

    pub fn occupied_cells(&self) -> Vec<IVec2> {
        self.footprint.occupied_cells(self.anchor, self.rotation)
    }

    pub fn unhappy_residents(&self) -> u32 {
        self.residents - self.happy_residents
    }

    /// Start-of-tick state: nobody matched, all capacity free.
    pub fn reset_allocation(&mut self) {
        self.happy_residents = 0;
        self.available_jobs = self.jobs;
        self.available_shopping = self.shopping_space;
    }

    pub fn to_record(&self) -> BuildingRecord {
        BuildingRecord {
            kind_id: self.kind.id(),
            x: self.anchor.x,
            y: self.anchor.y,
            rotation_index: self.rotation.index(),
            width: self.footprint.width,
            length: self.footprint.length,
            residents: self.residents,
            jobs: self.jobs,
            shopping_space: self.shopping_space,
            owner: self.owner,
        }
    }
}

/// Building description exchanged with external systems (e.g. a ledger
/// mirror). Anchors are sub-tile cells, kinds and rotations are numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct BuildingRecord {
    pub kind_id: u32,
    pub x: i32,
    pub y: i32,
    pub rotation_index: u32,
    pub width: u32,
    pub length: u32,
    pub residents: u32,
    pub jobs: u32,
    pub shopping_space: u32,
    pub owner: PlayerId,
}
