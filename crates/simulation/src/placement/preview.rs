//! Interactive placement sessions.
//!
//! A [`PlacementPreview`] follows the cursor, re-validating on every move or
//! rotation, and can be frozen in place before confirming. It owns whatever
//! visual state the caller stashed when the session began (`S`, e.g. the
//! original materials of a ghost model) and hands it back exactly once, on
//! confirm or cancel. It holds no borrows of the registries, so dropping or
//! cancelling a session never affects them.

use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingRegistry, BuildingTemplate};
use crate::economy::Treasury;
use crate::grid_geometry::{snap_to_sub_tile, Rotation};
use crate::roads::RoadQuery;
use crate::tiles::{PlayerId, TileRegistry};

use super::confirm::confirm_placement;
use super::error::{PlacementError, ValidationResult};
use super::validator::{validate_placement, PlacementRequest};

/// Read-only view of the world a preview validates against.
pub struct PreviewWorld<'a, R: RoadQuery + ?Sized> {
    pub tiles: &'a TileRegistry,
    pub roads: &'a R,
    pub buildings: &'a BuildingRegistry,
}

/// Returned when a session cannot start; gives the saved state back.
#[derive(Debug)]
pub struct PreviewRejected<S> {
    pub error: PlacementError,
    pub saved_state: S,
}

#[derive(Debug)]
pub struct PlacementPreview<S> {
    template: BuildingTemplate,
    player: PlayerId,
    position: Vec2,
    rotation: Rotation,
    locked: bool,
    last_result: Option<ValidationResult>,
    saved_state: S,
}

impl<S> PlacementPreview<S> {
    /// Start previewing `template`. Refused up front if the treasury cannot
    /// pay for it.
    pub fn begin<T: Treasury + ?Sized>(
        template: BuildingTemplate,
        player: PlayerId,
        treasury: &T,
        saved_state: S,
    ) -> Result<Self, PreviewRejected<S>> {
        if !treasury.can_afford(template.cost) {
            return Err(PreviewRejected {
                error: PlacementError::InsufficientFunds,
                saved_state,
            });
        }
        debug!("Previewing {}", template.name);
        Ok(Self {
            template,
            player,
            position: Vec2::ZERO,
            rotation: Rotation::Deg0,
            locked: false,
            last_result: None,
            saved_state,
        })
    }

    pub fn template(&self) -> &BuildingTemplate {
        &self.template
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn saved_state(&self) -> &S {
        &self.saved_state
    }

    /// Result of the latest validation, `None` before the first move.
    pub fn last_result(&self) -> Option<ValidationResult> {
        self.last_result
    }

    pub fn is_valid(&self) -> bool {
        self.last_result.is_some_and(|r| r.is_valid())
    }

    fn request(&self) -> PlacementRequest {
        PlacementRequest {
            footprint: self.template.footprint,
            position: self.position,
            rotation: self.rotation,
            player: self.player,
        }
    }

    fn revalidate<R: RoadQuery + ?Sized>(&mut self, world: &PreviewWorld<'_, R>) -> ValidationResult {
        let result = validate_placement(world.tiles, world.roads, world.buildings, &self.request());
        self.last_result = Some(result);
        result
    }

    /// Follow the cursor. Ignored while locked.
    pub fn move_to<R: RoadQuery + ?Sized>(
        &mut self,
        cursor: Vec2,
        world: &PreviewWorld<'_, R>,
    ) -> ValidationResult {
        if self.locked {
            if let Some(result) = self.last_result {
                return result;
            }
        }
        self.position = snap_to_sub_tile(cursor);
        self.revalidate(world)
    }

    /// Rotate one step. While locked this unlocks instead of rotating.
    pub fn rotate<R: RoadQuery + ?Sized>(&mut self, world: &PreviewWorld<'_, R>) -> ValidationResult {
        if self.locked {
            self.unlock();
        } else {
            self.rotation = self.rotation.rotated();
        }
        self.revalidate(world)
    }

    /// Freeze the preview in place. Only a valid placement can be locked.
    pub fn lock(&mut self) -> bool {
        if self.is_valid() {
            self.locked = true;
        }
        self.locked
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Place the building at the current position. On failure the session is
    /// handed back untouched so the player can keep adjusting it.
    pub fn confirm<R: RoadQuery + ?Sized, T: Treasury + ?Sized>(
        self,
        tiles: &TileRegistry,
        roads: &R,
        buildings: &mut BuildingRegistry,
        treasury: &mut T,
    ) -> Result<(BuildingId, S), (PlacementError, Self)> {
        match confirm_placement(
            tiles,
            roads,
            buildings,
            treasury,
            &self.template,
            self.position,
            self.rotation,
            self.player,
        ) {
            Ok(id) => Ok((id, self.saved_state)),
            Err(e) => Err((e, self)),
        }
    }

    /// Abandon the session and take back the saved state.
    pub fn cancel(self) -> S {
        debug!("Cancelled preview of {}", self.template.name);
        self.saved_state
    }
}
