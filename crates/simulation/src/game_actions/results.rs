use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::placement::PlacementError;
use crate::tiles::TileError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionResult {
    Success,
    /// The action succeeded but the caller should know something (e.g. the
    /// tile was already theirs).
    SuccessWithWarning(String),
    /// A building was placed or registered under this id.
    Placed(BuildingId),
    Error(ActionError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionResult::Error(_))
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            ActionResult::SuccessWithWarning(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn placed(&self) -> Option<BuildingId> {
        match self {
            ActionResult::Placed(id) => Some(*id),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionError {
    Placement(PlacementError),
    AlreadyOwnedByOther,
    UnknownTemplate(String),
    NotFound,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Placement(e) => write!(f, "{e}"),
            ActionError::AlreadyOwnedByOther => write!(f, "Tile belongs to another player"),
            ActionError::UnknownTemplate(name) => write!(f, "No building named '{name}'"),
            ActionError::NotFound => write!(f, "No such building"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<PlacementError> for ActionError {
    fn from(e: PlacementError) -> Self {
        ActionError::Placement(e)
    }
}

impl From<TileError> for ActionError {
    fn from(e: TileError) -> Self {
        match e {
            TileError::OutOfBounds => ActionError::Placement(PlacementError::OutOfBounds),
            TileError::AlreadyOwnedByOther => ActionError::AlreadyOwnedByOther,
        }
    }
}

impl From<ActionError> for ActionResult {
    fn from(e: ActionError) -> Self {
        ActionResult::Error(e)
    }
}
