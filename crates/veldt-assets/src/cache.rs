//! Memoizing model cache with request coalescing.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use veldt_common::{AssetError, ObjectId, TileKey};

use crate::model::{Model, ModelSource};

/// Result of loading one object through the cache.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// The model to render: the cached clone, or the placeholder
    pub model: Model,
    /// True when the real asset was delivered
    pub loaded: bool,
    /// The failure that forced the placeholder, if any
    pub error: Option<AssetError>,
}

/// Per-tile load report. Entries are in the same order as the requested
/// object list, so callers can pair them with their placements by index.
#[derive(Debug, Clone)]
pub struct TileLoad {
    /// Tile the load was issued for
    pub tile: TileKey,
    /// Per-object results, request order preserved
    pub entries: Vec<LoadedModel>,
}

impl TileLoad {
    /// Number of objects that loaded successfully.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.loaded).count()
    }

    /// Number of objects that fell back to the placeholder.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.loaded).count()
    }
}

/// Asynchronous memoizing loader over a [`ModelSource`].
///
/// At most one fetch is in flight per object id: concurrent callers share
/// the pending load and each receives a clone of its result. A failed
/// fetch is not cached; the caller gets a placeholder and a later request
/// may retry.
pub struct ModelCache<S> {
    source: S,
    entries: DashMap<ObjectId, Arc<OnceCell<Model>>>,
}

impl<S: ModelSource> ModelCache<S> {
    /// Creates a cache over an asset source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: DashMap::new(),
        }
    }

    /// Loads one object, memoized.
    ///
    /// Never fails: a load error is reported in the result alongside a
    /// placeholder model.
    pub async fn load_object(&self, id: &ObjectId) -> LoadedModel {
        let cell = Arc::clone(
            &self
                .entries
                .entry(id.clone())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        );

        match cell.get_or_try_init(|| self.source.load_model(id)).await {
            Ok(model) => LoadedModel {
                model: model.clone(),
                loaded: true,
                error: None,
            },
            Err(error) => {
                warn!(object = %id, %error, "model load failed, substituting placeholder");
                LoadedModel {
                    model: Model::placeholder(id.clone()),
                    loaded: false,
                    error: Some(error),
                }
            }
        }
    }

    /// Loads every object a tile needs.
    ///
    /// Never fails as a whole: partial failures are reported per entry so
    /// the caller can still render everything that succeeded.
    pub async fn load_tile(&self, tile: &TileKey, objects: &[ObjectId]) -> TileLoad {
        let mut entries = Vec::with_capacity(objects.len());
        for id in objects {
            entries.push(self.load_object(id).await);
        }

        let load = TileLoad {
            tile: tile.clone(),
            entries,
        };
        debug!(
            tile = %load.tile,
            loaded = load.loaded_count(),
            failed = load.failed_count(),
            "tile assets loaded"
        );
        load
    }

    /// The underlying asset source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Number of models resident in the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Returns true if no models are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases all cached models and pending bookkeeping.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
