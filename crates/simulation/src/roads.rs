//! Road layout on the sub-tile lattice.
//!
//! Every road piece fills one lattice cell (a `ROAD_WIDTH` square centred on
//! the lattice point). Pieces with three or more road neighbours, or pieces
//! placed explicitly as intersections, are intersections; everything else is
//! a straight segment. The placement validator only talks to roads through
//! the [`RoadQuery`] trait.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::ROAD_WIDTH;
use crate::grid_geometry::sub_tile_to_world;

/// Rays running this close to a piece edge do not hit it.
const GRAZE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum RoadKind {
    Straight,
    Intersection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadPiece {
    pub cell: IVec2,
    pub kind: RoadKind,
}

impl RoadPiece {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(sub_tile_to_world(self.cell), Vec2::splat(ROAD_WIDTH))
    }
}

/// Result of scanning along a direction for the nearest road piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadHit {
    pub piece: RoadPiece,
    pub point: Vec2,
    pub distance: f32,
}

/// Road layout as seen by placement validation.
pub trait RoadQuery {
    /// Nearest road piece of any kind hit by a ray from `origin` along the
    /// unit vector `direction`, no further than `max_distance`.
    fn scan(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RoadHit>;

    /// Every road piece whose area overlaps the interior of `rect`.
    fn overlapping(&self, rect: Rect) -> Vec<RoadPiece>;
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RoadNetwork {
    pub edges: HashMap<IVec2, HashSet<IVec2>>,
    pub intersections: HashSet<IVec2>,
    tagged: HashSet<IVec2>,
}

const NEIGHBORS4: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

impl RoadNetwork {
    /// Place a road piece. Returns `false` if the cell already holds one.
    pub fn place_road(&mut self, cell: IVec2) -> bool {
        if self.edges.contains_key(&cell) {
            return false;
        }
        self.edges.entry(cell).or_default();

        for offset in NEIGHBORS4 {
            let neighbor = cell + offset;
            if self.edges.contains_key(&neighbor) {
                self.edges.entry(cell).or_default().insert(neighbor);
                self.edges.entry(neighbor).or_default().insert(cell);
            }
        }

        self.update_intersection(cell);
        for offset in NEIGHBORS4 {
            let neighbor = cell + offset;
            if self.edges.contains_key(&neighbor) {
                self.update_intersection(neighbor);
            }
        }
        true
    }

    /// Place (or re-tag) a piece as an intersection regardless of how many
    /// neighbours it has.
    pub fn place_intersection(&mut self, cell: IVec2) {
        self.tagged.insert(cell);
        if !self.place_road(cell) {
            self.update_intersection(cell);
        }
    }

    /// Place a line of road pieces between two cells, inclusive. Returns the
    /// number of new pieces.
    pub fn place_road_line(&mut self, from: IVec2, to: IVec2) -> usize {
        line_cells(from, to)
            .into_iter()
            .filter(|&cell| self.place_road(cell))
            .count()
    }

    pub fn remove_road(&mut self, cell: IVec2) -> bool {
        let Some(neighbors) = self.edges.remove(&cell) else {
            return false;
        };
        for neighbor in &neighbors {
            if let Some(set) = self.edges.get_mut(neighbor) {
                set.remove(&cell);
            }
            self.update_intersection(*neighbor);
        }
        self.intersections.remove(&cell);
        self.tagged.remove(&cell);
        true
    }

    fn update_intersection(&mut self, cell: IVec2) {
        let edge_count = self.edges.get(&cell).map_or(0, |e| e.len());
        if edge_count >= 3 || self.tagged.contains(&cell) {
            self.intersections.insert(cell);
        } else {
            self.intersections.remove(&cell);
        }
    }

    pub fn is_road(&self, cell: IVec2) -> bool {
        self.edges.contains_key(&cell)
    }

    pub fn kind(&self, cell: IVec2) -> Option<RoadKind> {
        if !self.is_road(cell) {
            None
        } else if self.intersections.contains(&cell) {
            Some(RoadKind::Intersection)
        } else {
            Some(RoadKind::Straight)
        }
    }

    pub fn piece_count(&self) -> usize {
        self.edges.len()
    }

    pub fn pieces(&self) -> impl Iterator<Item = RoadPiece> + '_ {
        self.edges.keys().map(|&cell| RoadPiece {
            cell,
            kind: if self.intersections.contains(&cell) {
                RoadKind::Intersection
            } else {
                RoadKind::Straight
            },
        })
    }
}

impl RoadQuery for RoadNetwork {
    fn scan(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RoadHit> {
        let mut best: Option<RoadHit> = None;
        for piece in self.pieces() {
            let Some(t) = ray_entry(origin, direction, piece.rect()) else {
                continue;
            };
            if t > max_distance {
                continue;
            }
            // Ties go to the lowest (y, x) cell so scans are deterministic.
            let better = match &best {
                None => true,
                Some(b) => {
                    t < b.distance
                        || (t == b.distance
                            && (piece.cell.y, piece.cell.x) < (b.piece.cell.y, b.piece.cell.x))
                }
            };
            if better {
                best = Some(RoadHit {
                    piece,
                    point: origin + direction * t,
                    distance: t,
                });
            }
        }
        best
    }

    fn overlapping(&self, rect: Rect) -> Vec<RoadPiece> {
        let mut pieces: Vec<RoadPiece> = self
            .pieces()
            .filter(|p| !rect.intersect(p.rect()).is_empty())
            .collect();
        pieces.sort_by_key(|p| (p.cell.y, p.cell.x));
        pieces
    }
}

/// Distance along the ray to where it enters `rect` (0 when `origin` is
/// already inside). A ray running along an edge does not count as a hit.
fn ray_entry(origin: Vec2, direction: Vec2, rect: Rect) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        let lo = rect.min[axis];
        let hi = rect.max[axis];
        if d.abs() < f32::EPSILON {
            if o <= lo + GRAZE_EPSILON || o >= hi - GRAZE_EPSILON {
                return None;
            }
            continue;
        }
        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Bresenham rasterization of the cells between two lattice points.
fn line_cells(from: IVec2, to: IVec2) -> Vec<IVec2> {
    let mut cells = Vec::new();
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cur = from;

    loop {
        cells.push(cur);
        if cur == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cur.x += sx;
        }
        if e2 <= dx {
            err += dx;
            cur.y += sy;
        }
    }
    cells
}
