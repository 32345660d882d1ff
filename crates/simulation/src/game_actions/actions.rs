use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::{BuildingId, BuildingRecord};
use crate::grid_geometry::Rotation;
use crate::tiles::PlayerId;

/// A world mutation requested by a player, a ledger mirror or a replay.
/// Tile coordinates are grid tiles, road coordinates are sub-tile cells and
/// building positions are world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum GameAction {
    PurchaseTile {
        player: PlayerId,
        tile: (i32, i32),
    },
    PlaceBuilding {
        player: PlayerId,
        template: String,
        position: (f32, f32),
        rotation: Rotation,
    },
    Demolish {
        building: BuildingId,
    },
    PlaceRoad {
        start: (i32, i32),
        end: (i32, i32),
    },
    PlaceIntersection {
        cell: (i32, i32),
    },
    RegisterBuilding {
        record: BuildingRecord,
    },
}
