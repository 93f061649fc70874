//! Tile catalog: templates, placement rules, and the read-only registry.
//!
//! A template is pure authoring data: what may be placed on a tile of this
//! type, how densely, and which fixed boundary colliders the tile carries.
//! The catalog is constructed once and injected wherever lookups are needed;
//! there is no global registry.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use veldt_common::{Collider, ObjectId, TILE_SIZE};

/// Base ground category of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundKind {
    /// Grassland
    Grass,
    /// Bare dirt
    Dirt,
    /// Sand
    Sand,
    /// Exposed stone
    Stone,
}

/// Explicit category tag carried on every placement rule and placed object.
///
/// Categories control slot-grid density and rotation behavior, and replace
/// any classification by object-id naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementCategory {
    /// Large obstacles: trees, pillars. Sparse slot grid.
    TallObstacle,
    /// Small obstacles: rocks, stumps. Medium slot grid.
    SmallObstacle,
    /// Decorative clutter: flowers, tufts. Dense slot grid, subtle tilt.
    Decorative,
}

impl PlacementCategory {
    /// All categories in generation order.
    pub const ALL: [Self; 3] = [Self::TallObstacle, Self::SmallObstacle, Self::Decorative];

    /// Spacing between candidate slots for this category, in world units.
    #[must_use]
    pub const fn slot_spacing(self) -> f32 {
        match self {
            Self::TallObstacle => 4.0,
            Self::SmallObstacle => 3.0,
            Self::Decorative => 2.0,
        }
    }

    /// Maximum positional jitter applied after a slot is chosen.
    #[must_use]
    pub const fn jitter(self) -> f32 {
        match self {
            Self::TallObstacle => 1.2,
            Self::SmallObstacle => 0.9,
            Self::Decorative => 0.6,
        }
    }

    /// Maximum random pitch/roll in radians; zero keeps the object upright.
    #[must_use]
    pub const fn tilt(self) -> f32 {
        match self {
            Self::TallObstacle | Self::SmallObstacle => 0.0,
            Self::Decorative => 0.12,
        }
    }
}

/// One placement rule: which object, how many, at what scale, and whether
/// instances carry collision geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Object to place
    pub object: ObjectId,
    /// Category controlling slot density and rotation
    pub category: PlacementCategory,
    /// Minimum instance count (inclusive)
    pub count_min: u32,
    /// Maximum instance count (inclusive)
    pub count_max: u32,
    /// Minimum uniform scale (inclusive)
    pub scale_min: f32,
    /// Maximum uniform scale (inclusive)
    pub scale_max: f32,
    /// Collider half-extents in object-local units; `None` means instances
    /// of this rule never produce collision geometry
    pub collider_half_extents: Option<Vec3>,
    /// Minimum rolled scale at which the collider is actually attached;
    /// sub-threshold instances of a colliding rule stay non-solid
    pub collider_scale_threshold: Option<f32>,
}

impl PlacementRule {
    /// Creates a rule with no collision geometry.
    #[must_use]
    pub fn decorative(
        object: impl Into<ObjectId>,
        category: PlacementCategory,
        count: (u32, u32),
        scale: (f32, f32),
    ) -> Self {
        Self {
            object: object.into(),
            category,
            count_min: count.0,
            count_max: count.1,
            scale_min: scale.0,
            scale_max: scale.1,
            collider_half_extents: None,
            collider_scale_threshold: None,
        }
    }

    /// Creates a rule whose instances carry a box collider.
    #[must_use]
    pub fn with_collider(
        object: impl Into<ObjectId>,
        category: PlacementCategory,
        count: (u32, u32),
        scale: (f32, f32),
        half_extents: Vec3,
        scale_threshold: Option<f32>,
    ) -> Self {
        Self {
            object: object.into(),
            category,
            count_min: count.0,
            count_max: count.1,
            scale_min: scale.0,
            scale_max: scale.1,
            collider_half_extents: Some(half_extents),
            collider_scale_threshold: scale_threshold,
        }
    }
}

/// Authoring-time description of one tile type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTemplate {
    /// Template identifier used in authored world grids
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Base ground category
    pub ground: GroundKind,
    /// Placement rules, grouped into categories by their tag
    pub rules: Vec<PlacementRule>,
    /// Fixed colliders in tile-local coordinates (walls, rails)
    pub boundary_colliders: Vec<Collider>,
}

impl TileTemplate {
    /// Side length of every tile in world units.
    pub const SIDE: f32 = TILE_SIZE;
}

/// Read-only registry mapping template ids to templates.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    templates: Vec<TileTemplate>,
    index: HashMap<String, usize>,
}

impl TileCatalog {
    /// Builds a catalog from a list of templates.
    ///
    /// Later templates with a duplicate id replace earlier ones.
    #[must_use]
    pub fn from_templates(templates: Vec<TileTemplate>) -> Self {
        let mut catalog = Self {
            templates: Vec::with_capacity(templates.len()),
            index: HashMap::with_capacity(templates.len()),
        };
        for template in templates {
            if let Some(&slot) = catalog.index.get(&template.id) {
                catalog.templates[slot] = template;
            } else {
                catalog.index.insert(template.id.clone(), catalog.templates.len());
                catalog.templates.push(template);
            }
        }
        catalog
    }

    /// Builds the catalog of built-in templates.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_templates(builtin_templates())
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TileTemplate> {
        self.index.get(id).map(|&slot| &self.templates[slot])
    }

    /// Returns all templates in registration order.
    #[must_use]
    pub fn all(&self) -> &[TileTemplate] {
        &self.templates
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Built-in template set exercising every rule feature.
fn builtin_templates() -> Vec<TileTemplate> {
    let side = TileTemplate::SIDE;
    let half = side * 0.5;
    let wall_height = 2.5;
    let wall_thickness = 0.4;

    vec![
        TileTemplate {
            id: "meadow".into(),
            name: "Open Meadow".into(),
            ground: GroundKind::Grass,
            rules: vec![
                PlacementRule::decorative(
                    "grass_tuft",
                    PlacementCategory::Decorative,
                    (8, 16),
                    (0.6, 1.3),
                ),
                PlacementRule::decorative(
                    "flower_white",
                    PlacementCategory::Decorative,
                    (3, 9),
                    (0.7, 1.1),
                ),
            ],
            boundary_colliders: Vec::new(),
        },
        TileTemplate {
            id: "forest".into(),
            name: "Pine Forest".into(),
            ground: GroundKind::Grass,
            rules: vec![
                PlacementRule::with_collider(
                    "tree_pine",
                    PlacementCategory::TallObstacle,
                    (4, 8),
                    (0.6, 1.6),
                    Vec3::new(0.5, 2.6, 0.5),
                    Some(0.8),
                ),
                PlacementRule::with_collider(
                    "rock_mossy",
                    PlacementCategory::SmallObstacle,
                    (1, 4),
                    (0.4, 1.2),
                    Vec3::new(0.6, 0.5, 0.6),
                    Some(0.7),
                ),
                PlacementRule::decorative(
                    "fern",
                    PlacementCategory::Decorative,
                    (5, 12),
                    (0.5, 1.2),
                ),
            ],
            boundary_colliders: Vec::new(),
        },
        TileTemplate {
            id: "rock_field".into(),
            name: "Rock Field".into(),
            ground: GroundKind::Stone,
            rules: vec![
                PlacementRule::with_collider(
                    "boulder_large",
                    PlacementCategory::TallObstacle,
                    (2, 5),
                    (0.8, 1.8),
                    Vec3::new(1.0, 1.0, 1.0),
                    None,
                ),
                PlacementRule::decorative(
                    "pebbles",
                    PlacementCategory::Decorative,
                    (6, 14),
                    (0.5, 1.0),
                ),
            ],
            boundary_colliders: Vec::new(),
        },
        TileTemplate {
            id: "walled_yard".into(),
            name: "Walled Yard".into(),
            ground: GroundKind::Dirt,
            rules: vec![PlacementRule::decorative(
                "crate_old",
                PlacementCategory::SmallObstacle,
                (1, 3),
                (0.8, 1.0),
            )],
            boundary_colliders: vec![
                // Four walls inset on the tile edges, tile-local coordinates.
                Collider::solid_box(
                    Vec3::new(half, wall_height * 0.5, wall_thickness * 0.5),
                    Vec3::new(half, wall_height * 0.5, wall_thickness * 0.5),
                ),
                Collider::solid_box(
                    Vec3::new(half, wall_height * 0.5, side - wall_thickness * 0.5),
                    Vec3::new(half, wall_height * 0.5, wall_thickness * 0.5),
                ),
                Collider::solid_box(
                    Vec3::new(wall_thickness * 0.5, wall_height * 0.5, half),
                    Vec3::new(wall_thickness * 0.5, wall_height * 0.5, half),
                ),
                Collider::solid_box(
                    Vec3::new(side - wall_thickness * 0.5, wall_height * 0.5, half),
                    Vec3::new(wall_thickness * 0.5, wall_height * 0.5, half),
                ),
                // Gate marker on the south wall; informational only.
                Collider::trigger_box(
                    Vec3::new(half, 1.0, wall_thickness),
                    Vec3::new(1.5, 1.0, wall_thickness),
                ),
            ],
        },
    ]
}
