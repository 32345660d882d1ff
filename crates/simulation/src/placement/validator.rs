//! Placement validation: ownership, overlap, intersection zone and road
//! access, checked in that order. The first failing check decides the reason.

use bevy::prelude::*;

use crate::buildings::BuildingRegistry;
use crate::config::{
    OVERLAP_BOX_SCALE, ROAD_ADJACENCY_TOLERANCE, ROAD_ALIGNMENT_THRESHOLD,
    ROAD_OVERLAP_BOX_SCALE, ROAD_SCAN_DISTANCE,
};
use crate::grid_geometry::{Footprint, Rotation};
use crate::roads::{RoadHit, RoadKind, RoadQuery};
use crate::tiles::{PlayerId, TileRegistry};

use super::error::{InvalidReason, ValidationResult};

/// A candidate placement. `position` is expected to be snapped already.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub footprint: Footprint,
    pub position: Vec2,
    pub rotation: Rotation,
    pub player: PlayerId,
}

/// Decide whether `request` may be placed. Pure: reads the three registries
/// and nothing else.
pub fn validate_placement<R: RoadQuery + ?Sized>(
    tiles: &TileRegistry,
    roads: &R,
    buildings: &BuildingRegistry,
    request: &PlacementRequest,
) -> ValidationResult {
    if !is_on_owned_land(tiles, request) {
        return ValidationResult::Invalid(InvalidReason::NotOwned);
    }
    if overlaps_building(buildings, request) {
        return ValidationResult::Invalid(InvalidReason::Overlap);
    }
    if overlaps_intersection(roads, request) {
        return ValidationResult::Invalid(InvalidReason::OnIntersection);
    }
    if !has_road_access(roads, request) {
        return ValidationResult::Invalid(InvalidReason::NoRoadAccess);
    }
    ValidationResult::Valid
}

pub(crate) fn is_on_owned_land(tiles: &TileRegistry, request: &PlacementRequest) -> bool {
    request
        .footprint
        .ownership_samples(request.position, request.rotation)
        .iter()
        .all(|&p| {
            tiles
                .tile_at_world(p)
                .is_some_and(|t| t.owner == Some(request.player))
        })
}

pub(crate) fn overlaps_building(buildings: &BuildingRegistry, request: &PlacementRequest) -> bool {
    let probe = request
        .footprint
        .rect(request.position, request.rotation, OVERLAP_BOX_SCALE);
    buildings
        .footprint_rects()
        .any(|rect| !probe.intersect(rect).is_empty())
}

pub(crate) fn overlaps_intersection<R: RoadQuery + ?Sized>(
    roads: &R,
    request: &PlacementRequest,
) -> bool {
    let probe = request
        .footprint
        .rect(request.position, request.rotation, OVERLAP_BOX_SCALE);
    roads
        .overlapping(probe)
        .iter()
        .any(|p| p.kind == RoadKind::Intersection)
}

pub(crate) fn has_road_access<R: RoadQuery + ?Sized>(roads: &R, request: &PlacementRequest) -> bool {
    let body = request
        .footprint
        .rect(request.position, request.rotation, ROAD_OVERLAP_BOX_SCALE);
    if roads
        .overlapping(body)
        .iter()
        .any(|p| p.kind == RoadKind::Straight)
    {
        return false;
    }

    let front = request
        .footprint
        .front_center(request.position, request.rotation);
    let Some((direction, hit)) = closest_straight_road(roads, front, request.rotation) else {
        return false;
    };
    if hit.distance > ROAD_ADJACENCY_TOLERANCE {
        return false;
    }

    let forward_dot = request.rotation.forward().dot(direction);
    let right_dot = request.rotation.right().dot(direction).abs();
    forward_dot > right_dot && forward_dot > ROAD_ALIGNMENT_THRESHOLD
}

/// Nearest straight-road hit over the four building-relative scans, with the
/// direction it was found in. Earlier scans win ties.
fn closest_straight_road<R: RoadQuery + ?Sized>(
    roads: &R,
    origin: Vec2,
    rotation: Rotation,
) -> Option<(Vec2, RoadHit)> {
    let mut closest: Option<(Vec2, RoadHit)> = None;
    for direction in rotation.scan_directions() {
        let Some(hit) = roads.scan(origin, direction, ROAD_SCAN_DISTANCE) else {
            continue;
        };
        if hit.piece.kind == RoadKind::Intersection {
            continue;
        }
        if closest.is_none_or(|(_, best)| hit.distance < best.distance) {
            closest = Some((direction, hit));
        }
    }
    closest
}
