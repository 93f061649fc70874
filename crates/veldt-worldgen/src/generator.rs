//! Deterministic tile content generation.
//!
//! `generate` is a pure function of (template, grid coordinates, world
//! seed): it derives the tile seed with a fixed prime mix, allocates
//! non-overlapping placement slots on per-category coarse grids, and emits
//! placed objects plus the tile's absolute collision volumes.

use glam::Vec3;
use std::f32::consts::TAU;
use tracing::debug;

use veldt_common::{Aabb, Collider, GridCoord, ObjectId, TileKey, TILE_SIZE};

use crate::catalog::{PlacementCategory, PlacementRule, TileTemplate};
use crate::rng::{tile_seed, SeededRng};

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Tile side length in world units
    pub tile_size: f32,
    /// Inset from the tile edges within which no slot is placed
    pub edge_margin: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            edge_margin: 1.5,
        }
    }
}

/// One concrete object placed on a generated tile.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    /// Object to render at this placement
    pub object: ObjectId,
    /// Category the placement rule carried
    pub category: PlacementCategory,
    /// Absolute world-space position
    pub position: Vec3,
    /// Rotation in radians per axis (pitch, yaw, roll)
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
    /// Derived collision volume, absolute world space
    pub collider: Option<Collider>,
}

/// One generated realization of a template at specific grid coordinates.
///
/// Immutable once generated: the seed, object list, and collider list never
/// change. Regenerating the same coordinates with the same world seed
/// yields identical content.
#[derive(Debug, Clone, PartialEq)]
pub struct TileInstance {
    /// Tile identity (template id + grid coordinates)
    pub key: TileKey,
    /// Derived tile seed
    pub seed: u32,
    /// Generated object placements
    pub objects: Vec<PlacedObject>,
    /// Object-level plus tile-level colliders, absolute world space
    pub colliders: Vec<Collider>,
    /// Absolute world-space bounds of the tile
    pub bounds: Aabb,
}

impl TileInstance {
    /// Returns the tile's render-group name, `{template}_{x}_{y}`.
    #[must_use]
    pub fn name(&self) -> String {
        self.key.to_string()
    }
}

/// Deterministic tile content generator.
#[derive(Debug, Clone, Default)]
pub struct TileGenerator {
    config: GeneratorConfig,
}

impl TileGenerator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the tile instance for a template at grid coordinates.
    #[must_use]
    pub fn generate(
        &self,
        template: &TileTemplate,
        grid: GridCoord,
        world_seed: u32,
    ) -> TileInstance {
        let seed = tile_seed(grid.x, grid.y, world_seed);
        let mut rng = SeededRng::new(seed);
        let origin = grid.to_world_origin(self.config.tile_size);

        let mut objects = Vec::new();
        let mut colliders = Vec::new();

        // Fixed category order keeps the RNG call sequence stable.
        for category in PlacementCategory::ALL {
            let rules: Vec<&PlacementRule> = template
                .rules
                .iter()
                .filter(|r| r.category == category)
                .collect();
            if rules.is_empty() {
                continue;
            }

            // Sibling categories draw from forked streams so adding a rule
            // to one category cannot shift another category's output.
            let mut category_rng = rng.fork();
            let mut slots = self.slot_grid(category.slot_spacing());
            category_rng.shuffle(&mut slots);

            for rule in rules {
                let count =
                    category_rng.int_range(rule.count_min as i32, rule.count_max as i32);
                for _ in 0..count {
                    let Some(slot) = slots.pop() else {
                        // Candidate pool exhausted: place what fits, stop.
                        break;
                    };
                    objects.push(self.place_object(
                        rule,
                        category,
                        slot,
                        origin,
                        &mut category_rng,
                    ));
                }
            }
        }

        for placed in &objects {
            if let Some(collider) = placed.collider {
                colliders.push(collider);
            }
        }
        for boundary in &template.boundary_colliders {
            colliders.push(boundary.translated(origin));
        }

        let bounds = Aabb::new(
            origin,
            origin + Vec3::new(self.config.tile_size, self.config.tile_size, self.config.tile_size),
        );

        debug!(
            template = %template.id,
            x = grid.x,
            y = grid.y,
            seed,
            objects = objects.len(),
            colliders = colliders.len(),
            "generated tile"
        );

        TileInstance {
            key: TileKey::new(template.id.clone(), grid),
            seed,
            objects,
            colliders,
            bounds,
        }
    }

    /// Places one object at a slot: jitter, rotation, scale, collider.
    fn place_object(
        &self,
        rule: &PlacementRule,
        category: PlacementCategory,
        slot: (f32, f32),
        origin: Vec3,
        rng: &mut SeededRng,
    ) -> PlacedObject {
        let margin = self.config.edge_margin;
        let max_local = self.config.tile_size - margin;
        let jitter = category.jitter();

        let local_x = (slot.0 + rng.range(-jitter, jitter)).clamp(margin, max_local);
        let local_z = (slot.1 + rng.range(-jitter, jitter)).clamp(margin, max_local);
        let position = origin + Vec3::new(local_x, 0.0, local_z);

        let yaw = rng.range(0.0, TAU);
        let tilt = category.tilt();
        let pitch = rng.range(-tilt, tilt);
        let roll = rng.range(-tilt, tilt);

        let scale = rng.range(rule.scale_min, rule.scale_max);

        let collider = rule.collider_half_extents.and_then(|half_extents| {
            let attach = rule
                .collider_scale_threshold
                .map_or(true, |threshold| scale >= threshold);
            attach.then(|| {
                Collider::solid_box(
                    position + Vec3::Y * half_extents.y * scale,
                    half_extents * scale,
                )
            })
        });

        PlacedObject {
            object: rule.object.clone(),
            category,
            position,
            rotation: Vec3::new(pitch, yaw, roll),
            scale,
            collider,
        }
    }

    /// Builds the candidate slot grid for a category: evenly spaced
    /// positions inset from the tile edges, centered within the usable area.
    fn slot_grid(&self, spacing: f32) -> Vec<(f32, f32)> {
        let margin = self.config.edge_margin;
        let usable = self.config.tile_size - 2.0 * margin;
        if usable <= 0.0 || spacing <= 0.0 {
            return Vec::new();
        }

        let per_axis = (usable / spacing).floor() as usize + 1;
        let offset = margin + (usable - (per_axis as f32 - 1.0) * spacing) * 0.5;

        let mut slots = Vec::with_capacity(per_axis * per_axis);
        for iz in 0..per_axis {
            for ix in 0..per_axis {
                slots.push((
                    offset + ix as f32 * spacing,
                    offset + iz as f32 * spacing,
                ));
            }
        }
        slots
    }
}
