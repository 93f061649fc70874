//! # Veldt World
//!
//! World grid and tile streaming:
//! - `WorldGrid` turns an authored grid of template ids into eagerly
//!   generated tile instances
//! - `WorldComposer` maintains the active window of tiles around the
//!   observer, driving the per-tile load/unload state machine and
//!   publishing render groups and collider snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod composer;
pub mod grid;

pub use composer::{
    LoadTicket, RenderGroup, RenderInstance, SceneDiff, StreamingConfig, TileState,
    WorldComposer, WorldStats,
};
pub use grid::WorldGrid;
