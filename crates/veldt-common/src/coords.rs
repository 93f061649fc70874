//! Coordinate types for the tile grid and world space.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Side length of one tile in world units.
///
/// Every tile is a fixed-size square; the grid coordinate of a tile times
/// this constant gives the world-space position of its minimum corner.
pub const TILE_SIZE: f32 = 20.0;

/// Grid coordinate identifying a tile in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate in tile space
    pub x: i32,
    /// Y coordinate in tile space (maps to world Z)
    pub y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a world-space position to the grid coordinate containing it.
    #[must_use]
    pub fn from_world(world_x: f32, world_z: f32, tile_size: f32) -> Self {
        Self {
            x: (world_x / tile_size).floor() as i32,
            y: (world_z / tile_size).floor() as i32,
        }
    }

    /// Returns the world-space position of this tile's minimum corner.
    #[must_use]
    pub fn to_world_origin(self, tile_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * tile_size, 0.0, self.y as f32 * tile_size)
    }

    /// Chebyshev (square) distance to another grid coordinate.
    ///
    /// This is the distance metric used for the active streaming window:
    /// every tile within `radius` on both axes is in range.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy {
            dx
        } else {
            dy
        }
    }
}
