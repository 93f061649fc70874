//! # Veldt Worldgen
//!
//! Deterministic tile content generation:
//! - Seedable RNG with reproducible derived operations
//! - Tile catalog mapping template ids to placement rules
//! - Tile generator turning (template, coordinates, seed) into placed
//!   objects and collision volumes
//!
//! Generation is a pure function of its inputs: the same template, grid
//! coordinates, and world seed always produce identical content.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod generator;
pub mod rng;

pub use catalog::{
    GroundKind, PlacementCategory, PlacementRule, TileCatalog, TileTemplate,
};
pub use generator::{GeneratorConfig, PlacedObject, TileGenerator, TileInstance};
pub use rng::{tile_seed, SeededRng};
