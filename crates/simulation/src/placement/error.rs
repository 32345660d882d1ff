// ---------------------------------------------------------------------------
// PlacementError: why a building could not be validated, confirmed or
// registered
// ---------------------------------------------------------------------------

use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::tiles::TileError;

/// Reasons the validator can reject a candidate placement, in the order the
/// checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum InvalidReason {
    NotOwned,
    Overlap,
    OnIntersection,
    NoRoadAccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ValidationResult {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(r) => Some(*r),
        }
    }

    pub fn into_result(self) -> Result<(), PlacementError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(r) => Err(r.into()),
        }
    }
}

/// Every recoverable failure of the placement pipeline. All of them are
/// surfaced to the caller; none of them leave the registries modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum PlacementError {
    /// A coordinate outside the tile grid.
    OutOfBounds,
    /// Part of the footprint is off-grid or on a tile the player does not own.
    NotOwned,
    /// The footprint collides with an existing building.
    Overlap,
    /// The footprint covers a road intersection.
    OnIntersection,
    /// No straight road faces the building front.
    NoRoadAccess,
    /// The treasury cannot cover the building cost.
    InsufficientFunds,
    /// A footprint cell is already registered to another building.
    SlotOccupied,
    /// An external record carried a building kind id this build does not know.
    UnknownBuildingKind,
    /// A footprint side was zero or larger than the supported maximum.
    InvalidFootprint,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Position is outside the grid"),
            PlacementError::NotOwned => write!(f, "Building must sit entirely on owned tiles"),
            PlacementError::Overlap => write!(f, "Building overlaps an existing building"),
            PlacementError::OnIntersection => write!(f, "Building cannot cover a road intersection"),
            PlacementError::NoRoadAccess => write!(f, "Building front must face an adjacent road"),
            PlacementError::InsufficientFunds => write!(f, "Not enough money"),
            PlacementError::SlotOccupied => write!(f, "Footprint cells are already registered"),
            PlacementError::UnknownBuildingKind => write!(f, "Unknown building kind"),
            PlacementError::InvalidFootprint => write!(f, "Unsupported building footprint size"),
        }
    }
}

impl std::error::Error for PlacementError {}

impl From<InvalidReason> for PlacementError {
    fn from(reason: InvalidReason) -> Self {
        match reason {
            InvalidReason::NotOwned => PlacementError::NotOwned,
            InvalidReason::Overlap => PlacementError::Overlap,
            InvalidReason::OnIntersection => PlacementError::OnIntersection,
            InvalidReason::NoRoadAccess => PlacementError::NoRoadAccess,
        }
    }
}

impl From<TileError> for PlacementError {
    fn from(e: TileError) -> Self {
        match e {
            TileError::OutOfBounds => PlacementError::OutOfBounds,
            TileError::AlreadyOwnedByOther => PlacementError::NotOwned,
        }
    }
}
