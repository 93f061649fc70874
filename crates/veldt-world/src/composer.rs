//! Tile streaming composer: the active-window load/unload state machine.
//!
//! Per-tile lifecycle: **Unloaded** (not represented) → **Loading**
//! (member of the active set, asset load in flight) → **Ready** (render
//! group populated) → back to **Unloaded** on release.
//!
//! `update_position` is synchronous: it applies unloads, registers
//! newcomers as Loading, and returns load tickets for the caller to drive
//! through the model cache. `commit_load` applies a finished load, and
//! discards it when the tile has since been released or re-entered (the
//! ticket's epoch no longer matches), so a late-arriving result can never
//! resurrect an unloaded tile.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use veldt_assets::{Model, TileLoad};
use veldt_common::{Collider, GridCoord, ObjectId, TileKey, WorldError, TILE_SIZE};
use veldt_worldgen::{TileCatalog, TileGenerator, TileInstance};

use crate::grid::WorldGrid;

/// Streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Radius of the active window in tiles (Chebyshev distance); the
    /// window is a square of `2 * radius + 1` tiles, clamped to the grid
    pub load_radius: i32,
    /// When false, the unchanged-center short-circuit is off and every
    /// position update recomputes the window
    pub streaming_enabled: bool,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            load_radius: 2,
            streaming_enabled: true,
        }
    }
}

/// Streaming state of an active tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Registered in the active set, asset load in flight
    Loading,
    /// Render group populated
    Ready,
}

/// One renderable placement inside a render group.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstance {
    /// Model to render (real asset or placeholder)
    pub model: Model,
    /// Absolute world-space position
    pub position: Vec3,
    /// Rotation in radians per axis
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

/// Named group of renderable placements for one tile.
///
/// The external rendering driver owns scene membership; it adds groups
/// that appear in the composer's output and removes groups whose name no
/// longer appears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGroup {
    /// Group name, `{template}_{x}_{y}`
    pub name: String,
    /// Positioned instances
    pub instances: Vec<RenderInstance>,
}

/// A pending asset load for a newly activated tile.
///
/// The epoch is the tile's liveness token: `commit_load` rejects the
/// result if the tile has been released or re-activated since the ticket
/// was issued.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    /// Tile the load is for
    pub key: TileKey,
    /// Liveness token captured at activation
    pub epoch: u64,
    /// Objects the tile needs, placement order preserved
    pub objects: Vec<ObjectId>,
}

/// Scene synchronization delta produced by [`WorldComposer::diff_scene`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDiff {
    /// Group names present in the composer but absent from the scene
    pub add: Vec<String>,
    /// Scene group names that no longer appear in the composer's output
    pub remove: Vec<String>,
}

/// Diagnostic counters for health monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Tiles in the active set
    pub active_tiles: usize,
    /// Active tiles with a populated render group
    pub ready_tiles: usize,
    /// Active tiles still waiting on assets
    pub loading_tiles: usize,
    /// Total generated tiles in the grid
    pub generated_tiles: usize,
}

/// One member of the active set.
#[derive(Debug)]
struct ActiveTile {
    instance: Arc<TileInstance>,
    state: TileState,
    epoch: u64,
    group: RenderGroup,
}

/// Owns the logical tile grid and runs the streaming state machine.
pub struct WorldComposer {
    grid: WorldGrid,
    config: StreamingConfig,
    active: AHashMap<GridCoord, ActiveTile>,
    last_center: Option<GridCoord>,
    next_epoch: u64,
}

impl WorldComposer {
    /// Creates a composer over a generated world grid.
    #[must_use]
    pub fn new(grid: WorldGrid, config: StreamingConfig) -> Self {
        Self {
            grid,
            config,
            active: AHashMap::new(),
            last_center: None,
            next_epoch: 0,
        }
    }

    /// Validates and generates an authored id grid, then wraps it in a
    /// composer.
    pub fn load_world_grid(
        catalog: &TileCatalog,
        generator: &TileGenerator,
        rows: &[Vec<String>],
        world_seed: u32,
        config: StreamingConfig,
    ) -> Result<Self, WorldError> {
        let grid = WorldGrid::generate(catalog, generator, rows, world_seed)?;
        Ok(Self::new(grid, config))
    }

    /// Updates the observer position and recomputes the active window.
    ///
    /// Unloads are applied before loads are issued. Returns a load ticket
    /// for every newly activated tile; tickets must be driven through the
    /// model cache and handed back to [`commit_load`](Self::commit_load).
    pub fn update_position(&mut self, world_x: f32, world_z: f32) -> Vec<LoadTicket> {
        let center = GridCoord::from_world(world_x, world_z, TILE_SIZE);
        if self.config.streaming_enabled && self.last_center == Some(center) {
            return Vec::new();
        }
        self.last_center = Some(center);

        let desired = self.desired_window(center);

        // Unload first: a tile id can never be simultaneously pending
        // removal and pending addition.
        let stale: Vec<GridCoord> = self
            .active
            .keys()
            .filter(|coord| !desired.contains(coord))
            .copied()
            .collect();
        for coord in stale {
            if let Some(tile) = self.active.remove(&coord) {
                info!(tile = %tile.instance.key, "tile unloaded");
            }
        }

        let mut tickets = Vec::new();
        for coord in desired {
            if self.active.contains_key(&coord) {
                continue;
            }
            let Some(instance) = self.grid.get(coord) else {
                continue;
            };
            let instance = Arc::clone(instance);

            self.next_epoch += 1;
            let epoch = self.next_epoch;
            let ticket = LoadTicket {
                key: instance.key.clone(),
                epoch,
                objects: instance.objects.iter().map(|o| o.object.clone()).collect(),
            };

            debug!(tile = %instance.key, epoch, "tile activated");
            self.active.insert(
                coord,
                ActiveTile {
                    group: RenderGroup {
                        name: instance.name(),
                        instances: Vec::new(),
                    },
                    instance,
                    state: TileState::Loading,
                    epoch,
                },
            );
            tickets.push(ticket);
        }

        tickets
    }

    /// Applies a finished tile load.
    ///
    /// Returns false (and changes nothing) when the result is stale: the
    /// tile left the active window, or was released and re-activated with
    /// a newer epoch, after the ticket was issued.
    pub fn commit_load(&mut self, ticket: &LoadTicket, load: &TileLoad) -> bool {
        let Some(tile) = self.active.get_mut(&ticket.key.grid) else {
            warn!(tile = %ticket.key, "discarding load for released tile");
            return false;
        };
        if tile.epoch != ticket.epoch || tile.instance.key != ticket.key {
            warn!(tile = %ticket.key, "discarding stale load (tile re-activated)");
            return false;
        }

        tile.group.instances = tile
            .instance
            .objects
            .iter()
            .zip(&load.entries)
            .map(|(placed, entry)| RenderInstance {
                model: entry.model.clone(),
                position: placed.position,
                rotation: placed.rotation,
                scale: placed.scale,
            })
            .collect();
        tile.state = TileState::Ready;

        let failed = load.failed_count();
        if failed > 0 {
            warn!(tile = %ticket.key, failed, "tile ready with placeholder objects");
        } else {
            debug!(tile = %ticket.key, "tile ready");
        }
        true
    }

    /// Returns the union of every active tile's collider list.
    ///
    /// The returned snapshot is owned: the collision manager can query it
    /// while the composer keeps streaming.
    #[must_use]
    pub fn active_colliders(&self) -> Vec<Collider> {
        self.active
            .values()
            .flat_map(|tile| tile.instance.colliders.iter().copied())
            .collect()
    }

    /// Returns the render groups of all active tiles.
    ///
    /// Groups for tiles still Loading are present but empty, so their
    /// names already participate in scene diffing.
    #[must_use]
    pub fn tile_groups(&self) -> Vec<&RenderGroup> {
        self.active.values().map(|tile| &tile.group).collect()
    }

    /// Diffs the composer's output against the scene's current group names.
    #[must_use]
    pub fn diff_scene(&self, scene_groups: &HashSet<String>) -> SceneDiff {
        let current: HashSet<&str> = self
            .active
            .values()
            .map(|tile| tile.group.name.as_str())
            .collect();

        let mut diff = SceneDiff {
            add: current
                .iter()
                .filter(|name| !scene_groups.contains(**name))
                .map(|&name| name.to_owned())
                .collect(),
            remove: scene_groups
                .iter()
                .filter(|name| !current.contains(name.as_str()))
                .cloned()
                .collect(),
        };
        diff.add.sort();
        diff.remove.sort();
        diff
    }

    /// Streaming state of a tile, or `None` when it is not active.
    #[must_use]
    pub fn tile_state(&self, coord: GridCoord) -> Option<TileState> {
        self.active.get(&coord).map(|tile| tile.state)
    }

    /// Returns true when the tile is a member of the active set.
    #[must_use]
    pub fn is_active(&self, coord: GridCoord) -> bool {
        self.active.contains_key(&coord)
    }

    /// Diagnostic counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        let ready = self
            .active
            .values()
            .filter(|tile| tile.state == TileState::Ready)
            .count();
        WorldStats {
            active_tiles: self.active.len(),
            ready_tiles: ready,
            loading_tiles: self.active.len() - ready,
            generated_tiles: self.grid.tile_count(),
        }
    }

    /// The underlying world grid.
    #[must_use]
    pub const fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    /// The streaming configuration.
    #[must_use]
    pub const fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Clears all active state. External systems keep whatever scene nodes
    /// they hold; the caller detaches them.
    pub fn dispose(&mut self) {
        self.active.clear();
        self.last_center = None;
        info!("composer disposed");
    }

    /// Computes the desired active window around a center, clamped to the
    /// grid bounds.
    fn desired_window(&self, center: GridCoord) -> Vec<GridCoord> {
        let radius = self.config.load_radius;
        let mut window = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = GridCoord::new(center.x + dx, center.y + dy);
                if self.grid.contains(coord) {
                    window.push(coord);
                }
            }
        }
        window
    }
}
