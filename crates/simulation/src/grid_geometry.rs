//! World-space <-> placement-lattice conversions.
//!
//! Buildings are anchored on a fixed sub-tile lattice (pitch
//! [`SUB_TILE_SIZE`]) and face one of four cardinal directions. The world
//! plane is `(x, y)`; rotation is clockwise viewed from above, so a building at
//! [`Rotation::Deg0`] faces `+Y` and one at [`Rotation::Deg90`] faces `+X`.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::{
    MAX_FOOTPRINT_SUB_TILES, OWNERSHIP_SAMPLE_INSET, ROTATION_STEP_DEGREES, SNAP_BIAS, SUB_TILE_SIZE,
    TILE_SIZE,
};

/// Snap a single world coordinate onto the sub-tile lattice.
#[inline]
pub fn snap_axis(coordinate: f32) -> f32 {
    ((coordinate + SNAP_BIAS) / SUB_TILE_SIZE).round() * SUB_TILE_SIZE
}

/// Snap a world position onto the sub-tile lattice. Exact half-pitch inputs
/// round toward positive infinity.
pub fn snap_to_sub_tile(world: Vec2) -> Vec2 {
    Vec2::new(snap_axis(world.x), snap_axis(world.y))
}

/// Lattice cell nearest to `world`, using the same rounding as
/// [`snap_to_sub_tile`].
pub fn world_to_sub_tile(world: Vec2) -> IVec2 {
    IVec2::new(
        ((world.x + SNAP_BIAS) / SUB_TILE_SIZE).round() as i32,
        ((world.y + SNAP_BIAS) / SUB_TILE_SIZE).round() as i32,
    )
}

pub fn sub_tile_to_world(cell: IVec2) -> Vec2 {
    cell.as_vec2() * SUB_TILE_SIZE
}

/// Tile containing `world`. Tile `(x, y)` is centred on
/// `(x * TILE_SIZE, y * TILE_SIZE)`.
pub fn world_to_tile(world: Vec2) -> IVec2 {
    IVec2::new(
        (world.x / TILE_SIZE + 0.5).floor() as i32,
        (world.y / TILE_SIZE + 0.5).floor() as i32,
    )
}

pub fn tile_to_world(tile: IVec2) -> Vec2 {
    tile.as_vec2() * TILE_SIZE
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Advance by one rotation step, wrapping 270 -> 0.
    pub fn rotated(self) -> Self {
        Self::from_degrees(self.degrees() + ROTATION_STEP_DEGREES)
    }

    pub fn degrees(self) -> u32 {
        self.index() * ROTATION_STEP_DEGREES
    }

    /// Maps any multiple of 90 degrees (mod 360) onto a cardinal state.
    /// Other angles snap to the nearest state below.
    pub fn from_degrees(degrees: u32) -> Self {
        Self::from_index((degrees % 360) / ROTATION_STEP_DEGREES)
    }

    /// Quarter-turn index (0..=3), the compact form stored by external records.
    pub fn index(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// True when the footprint's width runs along the world Y axis.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Unit vector the building front faces.
    pub fn forward(self) -> Vec2 {
        match self {
            Rotation::Deg0 => Vec2::Y,
            Rotation::Deg90 => Vec2::X,
            Rotation::Deg180 => Vec2::NEG_Y,
            Rotation::Deg270 => Vec2::NEG_X,
        }
    }

    pub fn right(self) -> Vec2 {
        self.rotated().forward()
    }

    /// Building-relative scan order: forward, right, back, left.
    pub fn scan_directions(self) -> [Vec2; 4] {
        let forward = self.forward();
        let right = self.right();
        [forward, right, -forward, -right]
    }
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// A building's occupied rectangle in sub-tile units. `width` runs along the
/// building's right axis, `length` along its forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct Footprint {
    pub width: u32,
    pub length: u32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 1,
            length: 1,
        }
    }
}

impl Footprint {
    pub fn new(width: u32, length: u32) -> Self {
        Self { width, length }
    }

    /// Both sides non-zero and at most [`MAX_FOOTPRINT_SUB_TILES`].
    pub fn is_supported(&self) -> bool {
        (1..=MAX_FOOTPRINT_SUB_TILES).contains(&self.width)
            && (1..=MAX_FOOTPRINT_SUB_TILES).contains(&self.length)
    }

    /// Extent in sub-tiles along the world X and Y axes.
    pub fn cell_extents(&self, rotation: Rotation) -> UVec2 {
        if rotation.is_quarter_turn() {
            UVec2::new(self.length, self.width)
        } else {
            UVec2::new(self.width, self.length)
        }
    }

    /// World-space size along X and Y.
    pub fn world_size(&self, rotation: Rotation) -> Vec2 {
        self.cell_extents(rotation).as_vec2() * SUB_TILE_SIZE
    }

    /// Axis-aligned world rectangle of the footprint scaled about its centre.
    pub fn rect(&self, position: Vec2, rotation: Rotation, scale: f32) -> Rect {
        Rect::from_center_size(position, self.world_size(rotation) * scale)
    }

    fn half_length(&self) -> f32 {
        self.length as f32 * SUB_TILE_SIZE * 0.5
    }

    fn half_width(&self) -> f32 {
        self.width as f32 * SUB_TILE_SIZE * 0.5
    }

    /// Centre of the forward-facing edge.
    pub fn front_center(&self, position: Vec2, rotation: Rotation) -> Vec2 {
        position + rotation.forward() * self.half_length()
    }

    /// The four corners (pulled inside by [`OWNERSHIP_SAMPLE_INSET`]) followed
    /// by the centre.
    pub fn ownership_samples(&self, position: Vec2, rotation: Rotation) -> [Vec2; 5] {
        let right = rotation.right();
        let forward = rotation.forward();
        let hw = self.half_width() - OWNERSHIP_SAMPLE_INSET;
        let hl = self.half_length() - OWNERSHIP_SAMPLE_INSET;
        let corner = |sx: f32, sy: f32| position + right * (sx * hw) + forward * (sy * hl);
        [
            corner(-1.0, -1.0),
            corner(-1.0, 1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            position,
        ]
    }

    /// Lattice cells covered by the footprint when anchored on `anchor`.
    ///
    /// A cell belongs to the footprint when its centre lies in the half-open
    /// span `[min, max)` on both axes, so a `w x l` footprint always covers
    /// exactly `w * l` cells and edge-sharing footprints never share a cell.
    pub fn occupied_cells(&self, anchor: IVec2, rotation: Rotation) -> Vec<IVec2> {
        let extents = self.cell_extents(rotation).as_ivec2();
        let span = |center: i32, extent: i32| {
            // Work in half-cell units so odd extents stay integral.
            let lo = (2 * center - extent + 1).div_euclid(2);
            let hi = (2 * center + extent + 1).div_euclid(2);
            lo..hi
        };
        let xs = span(anchor.x, extents.x);
        let ys = span(anchor.y, extents.y);
        let mut cells = Vec::with_capacity((extents.x * extents.y).max(0) as usize);
        for y in ys {
            for x in xs.clone() {
                cells.push(IVec2::new(x, y));
            }
        }
        cells
    }
}
