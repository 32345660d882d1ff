use std::fmt;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid_geometry::world_to_tile;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub struct PlayerId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub owner: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum TileError {
    OutOfBounds,
    AlreadyOwnedByOther,
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::OutOfBounds => write!(f, "tile coordinate is outside the grid"),
            TileError::AlreadyOwnedByOther => write!(f, "tile is already owned by another player"),
        }
    }
}

impl std::error::Error for TileError {}

/// Per-tile ownership state for the purchasable land grid.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileRegistry {
    tiles: Vec<Tile>,
    width: u32,
    height: u32,
}

impl TileRegistry {
    pub fn new(width: u32, height: u32) -> Self {
        let mut registry = Self::default();
        registry.initialize(width, height);
        registry
    }

    /// Allocate an ownerless tile for every `(x, y)` in `[0,width) x [0,height)`.
    /// Only takes effect on an empty registry; tiles are never destroyed
    /// during a session.
    pub fn initialize(&mut self, width: u32, height: u32) {
        if !self.tiles.is_empty() {
            warn!(
                "TileRegistry already initialized as {}x{}, ignoring {}x{}",
                self.width, self.height, width, height
            );
            return;
        }
        self.width = width;
        self.height = height;
        self.tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Tile { x, y, owner: None }))
            .collect();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Result<usize, TileError> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width as usize + x as usize)
        } else {
            Err(TileError::OutOfBounds)
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&Tile, TileError> {
        let idx = self.index(x, y)?;
        Ok(&self.tiles[idx])
    }

    pub fn is_owned(&self, x: i32, y: i32) -> Result<bool, TileError> {
        Ok(self.get(x, y)?.owner.is_some())
    }

    pub fn owner(&self, x: i32, y: i32) -> Result<Option<PlayerId>, TileError> {
        Ok(self.get(x, y)?.owner)
    }

    /// Set the tile owner. Setting the same owner again is a no-op; a tile
    /// never changes hands once owned.
    pub fn set_owner(&mut self, x: i32, y: i32, player: PlayerId) -> Result<(), TileError> {
        let idx = self.index(x, y)?;
        let tile = &mut self.tiles[idx];
        match tile.owner {
            Some(owner) if owner == player => Ok(()),
            Some(_) => Err(TileError::AlreadyOwnedByOther),
            None => {
                tile.owner = Some(player);
                debug!("Tile ({x}, {y}) now owned by player {}", player.0);
                Ok(())
            }
        }
    }

    /// Ground query: the tile under a world position, if it is on the grid.
    pub fn tile_at_world(&self, world: Vec2) -> Option<&Tile> {
        let t = world_to_tile(world);
        self.get(t.x, t.y).ok()
    }

    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.owner == Some(player))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
