//! # Veldt Common
//!
//! Common types and shared abstractions for the Veldt world engine.
//!
//! This crate provides foundational types used across all Veldt subsystems:
//! - Grid and world coordinate types
//! - Tile and object identifiers
//! - Collider geometry (boxes, spheres, world-space bounds)
//! - Common error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod collider;
pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collider::*;
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_grid_coord_roundtrip() {
        let grid = GridCoord::new(3, -2);
        let origin = grid.to_world_origin(TILE_SIZE);
        assert_eq!(GridCoord::from_world(origin.x, origin.z, TILE_SIZE), grid);
    }

    #[test]
    fn test_tile_key_display() {
        let key = TileKey::new("forest", GridCoord::new(4, 7));
        assert_eq!(key.to_string(), "forest_4_7");
    }

    #[test]
    fn test_collider_translate() {
        let collider = Collider::solid_box(Vec3::ZERO, Vec3::ONE);
        let moved = collider.translated(Vec3::new(10.0, 0.0, 5.0));
        let bounds = moved.bounds();
        assert_eq!(bounds.min, Vec3::new(9.0, -1.0, 4.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 6.0));
    }
}
