//! Collision geometry: axis-aligned boxes, spheres, and world-space bounds.
//!
//! Colliders are simplified volumes distinct from visual models. A collider
//! marked as a trigger is non-solid: it never blocks movement and is skipped
//! by collision resolution and ray casts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a bounding box from min/max corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from a center and half-extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns the point on or inside the box closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Checks whether a point lies on or inside the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Geometric shape of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderShape {
    /// Axis-aligned box given by center and half-extents.
    Box {
        /// Center of the box
        center: Vec3,
        /// Half-extent along each axis
        half_extents: Vec3,
    },
    /// Sphere given by center and radius.
    Sphere {
        /// Center of the sphere
        center: Vec3,
        /// Radius of the sphere
        radius: f32,
    },
}

/// A collision volume, optionally flagged as a non-solid trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Shape of the volume
    pub shape: ColliderShape,
    /// Non-solid trigger flag; triggers never block movement
    pub trigger: bool,
}

impl Collider {
    /// Creates a solid box collider.
    #[must_use]
    pub const fn solid_box(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Box {
                center,
                half_extents,
            },
            trigger: false,
        }
    }

    /// Creates a solid sphere collider.
    #[must_use]
    pub const fn solid_sphere(center: Vec3, radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { center, radius },
            trigger: false,
        }
    }

    /// Creates a non-solid trigger box.
    #[must_use]
    pub const fn trigger_box(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Box {
                center,
                half_extents,
            },
            trigger: true,
        }
    }

    /// Returns the collider's center.
    #[must_use]
    pub const fn center(&self) -> Vec3 {
        match self.shape {
            ColliderShape::Box { center, .. } | ColliderShape::Sphere { center, .. } => center,
        }
    }

    /// Returns a copy translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        let shape = match self.shape {
            ColliderShape::Box {
                center,
                half_extents,
            } => ColliderShape::Box {
                center: center + offset,
                half_extents,
            },
            ColliderShape::Sphere { center, radius } => ColliderShape::Sphere {
                center: center + offset,
                radius,
            },
        };
        Self {
            shape,
            trigger: self.trigger,
        }
    }

    /// Returns a copy with the shape's extents scaled by `factor`.
    ///
    /// The center is left untouched; only half-extents or radius scale.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        let shape = match self.shape {
            ColliderShape::Box {
                center,
                half_extents,
            } => ColliderShape::Box {
                center,
                half_extents: half_extents * factor,
            },
            ColliderShape::Sphere { center, radius } => ColliderShape::Sphere {
                center,
                radius: radius * factor,
            },
        };
        Self {
            shape,
            trigger: self.trigger,
        }
    }

    /// Returns the world-space bounds of the collider.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self.shape {
            ColliderShape::Box {
                center,
                half_extents,
            } => Aabb::from_center_half_extents(center, half_extents),
            ColliderShape::Sphere { center, radius } => {
                Aabb::from_center_half_extents(center, Vec3::splat(radius))
            }
        }
    }
}
