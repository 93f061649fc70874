//! # Veldt Assets
//!
//! Asynchronous, memoizing model loading:
//! - `ModelSource` is the seam to the external asset service
//! - `ModelCache` memoizes loaded models, coalesces concurrent requests
//!   for the same id into a single fetch, and substitutes a placeholder
//!   on failure so a bad asset never takes a tile down with it
//!
//! The cache is the only shared mutable resource in the engine; all of its
//! maps are safe for concurrent use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod cache;
pub mod model;

pub use cache::{LoadedModel, ModelCache, TileLoad};
pub use model::{MeshHandle, Model, ModelSource};
pub use veldt_common::AssetError;
