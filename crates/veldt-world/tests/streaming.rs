//! End-to-end streaming: authored grid through generation, the model
//! cache, and the composer's state machine.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use futures::future::BoxFuture;

use veldt_assets::{AssetError, MeshHandle, Model, ModelCache, ModelSource};
use veldt_common::{GridCoord, ObjectId, TILE_SIZE};
use veldt_world::{StreamingConfig, TileState, WorldComposer};
use veldt_worldgen::{TileCatalog, TileGenerator};

/// In-memory asset service handing out sequential mesh handles.
#[derive(Default)]
struct MemorySource {
    fetches: AtomicUsize,
    next_handle: AtomicU64,
    fail_ids: Vec<ObjectId>,
}

impl ModelSource for MemorySource {
    fn load_model(&self, id: &ObjectId) -> BoxFuture<'_, Result<Model, AssetError>> {
        let id = id.clone();
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_ids.contains(&id) {
                return Err(AssetError::LoadFailed {
                    id: id.to_string(),
                    reason: "missing from store".to_owned(),
                });
            }
            let handle = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Model::new(id, MeshHandle(handle)))
        })
    }
}

fn forest_world(width: usize, height: usize, radius: i32) -> WorldComposer {
    let catalog = TileCatalog::builtin();
    let generator = TileGenerator::default();
    let rows: Vec<Vec<String>> = (0..height)
        .map(|_| vec!["forest".to_owned(); width])
        .collect();
    WorldComposer::load_world_grid(
        &catalog,
        &generator,
        &rows,
        2024,
        StreamingConfig {
            load_radius: radius,
            streaming_enabled: true,
        },
    )
    .expect("valid grid")
}

fn tile_center(coord: GridCoord) -> (f32, f32) {
    let origin = coord.to_world_origin(TILE_SIZE);
    (origin.x + TILE_SIZE * 0.5, origin.z + TILE_SIZE * 0.5)
}

#[tokio::test]
async fn world_streams_and_renders_around_observer() {
    let mut composer = forest_world(5, 5, 1);
    let cache = ModelCache::new(MemorySource::default());

    let (x, z) = tile_center(GridCoord::new(2, 2));
    let tickets = composer.update_position(x, z);
    assert_eq!(tickets.len(), 9);

    for ticket in &tickets {
        let load = cache.load_tile(&ticket.key, &ticket.objects).await;
        assert!(composer.commit_load(ticket, &load));
    }

    let stats = composer.stats();
    assert_eq!(stats.active_tiles, 9);
    assert_eq!(stats.ready_tiles, 9);
    assert_eq!(stats.loading_tiles, 0);

    // Every group carries one instance per generated placement, and every
    // resolved model is real.
    for group in composer.tile_groups() {
        assert!(!group.instances.is_empty());
        for instance in &group.instances {
            assert!(!instance.model.is_placeholder());
        }
    }

    // Forest tiles generate colliders (pines and mossy rocks).
    assert!(!composer.active_colliders().is_empty());
}

#[tokio::test]
async fn cache_coalesces_repeated_objects_across_tiles() {
    let mut composer = forest_world(5, 5, 1);
    let source = MemorySource::default();
    let cache = ModelCache::new(source);

    let (x, z) = tile_center(GridCoord::new(2, 2));
    let tickets = composer.update_position(x, z);

    let mut distinct: HashSet<ObjectId> = HashSet::new();
    let mut total = 0;
    for ticket in &tickets {
        distinct.extend(ticket.objects.iter().cloned());
        total += ticket.objects.len();
        let load = cache.load_tile(&ticket.key, &ticket.objects).await;
        composer.commit_load(ticket, &load);
    }

    // Nine forest tiles reuse the same handful of object ids.
    assert!(total > distinct.len());
    assert_eq!(cache.source().fetches.load(Ordering::SeqCst), distinct.len());
    assert_eq!(cache.len(), distinct.len());
}

#[tokio::test]
async fn failed_assets_degrade_to_placeholders() {
    let mut composer = forest_world(3, 3, 0);
    let cache = ModelCache::new(MemorySource {
        fail_ids: vec![ObjectId::from("tree_pine")],
        ..MemorySource::default()
    });

    let (x, z) = tile_center(GridCoord::new(1, 1));
    let tickets = composer.update_position(x, z);
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];

    let load = cache.load_tile(&ticket.key, &ticket.objects).await;
    assert!(load.failed_count() > 0);
    assert!(composer.commit_load(ticket, &load));

    // The tile is Ready despite failures; failed objects render the
    // placeholder at their generated positions.
    assert_eq!(
        composer.tile_state(GridCoord::new(1, 1)),
        Some(TileState::Ready)
    );
    let groups = composer.tile_groups();
    let placeholders = groups[0]
        .instances
        .iter()
        .filter(|i| i.model.is_placeholder())
        .count();
    assert_eq!(placeholders, load.failed_count());
}

#[tokio::test]
async fn movement_during_inflight_load_discards_stale_result() {
    let mut composer = forest_world(9, 9, 0);
    let cache = ModelCache::new(MemorySource::default());

    let (x, z) = tile_center(GridCoord::new(1, 1));
    let tickets = composer.update_position(x, z);
    let stale = tickets[0].clone();

    // Observer crosses the world before the first load is committed.
    let (x, z) = tile_center(GridCoord::new(7, 7));
    let fresh = composer.update_position(x, z);

    let late = cache.load_tile(&stale.key, &stale.objects).await;
    assert!(!composer.commit_load(&stale, &late));
    assert!(!composer.is_active(GridCoord::new(1, 1)));

    for ticket in &fresh {
        let load = cache.load_tile(&ticket.key, &ticket.objects).await;
        assert!(composer.commit_load(ticket, &load));
    }
    assert_eq!(composer.stats().ready_tiles, 1);
}

#[tokio::test]
async fn scene_diff_tracks_window_movement() {
    let mut composer = forest_world(9, 9, 1);
    let cache = ModelCache::new(MemorySource::default());
    let mut scene: HashSet<String> = HashSet::new();

    let (x, z) = tile_center(GridCoord::new(1, 1));
    for ticket in composer.update_position(x, z) {
        let load = cache.load_tile(&ticket.key, &ticket.objects).await;
        composer.commit_load(&ticket, &load);
    }
    let diff = composer.diff_scene(&scene);
    assert_eq!(diff.add.len(), 9);
    assert!(diff.remove.is_empty());
    for name in diff.add {
        scene.insert(name);
    }
    assert_eq!(composer.diff_scene(&scene), veldt_world::SceneDiff::default());

    // Move one tile east: a column enters, a column leaves.
    let (x, z) = tile_center(GridCoord::new(2, 1));
    for ticket in composer.update_position(x, z) {
        let load = cache.load_tile(&ticket.key, &ticket.objects).await;
        composer.commit_load(&ticket, &load);
    }
    let diff = composer.diff_scene(&scene);
    assert_eq!(diff.add.len(), 3);
    assert_eq!(diff.remove.len(), 3);
    assert!(diff.remove.iter().all(|name| name.ends_with("_0_0")
        || name.ends_with("_0_1")
        || name.ends_with("_0_2")));
}
