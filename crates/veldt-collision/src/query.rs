//! Sphere queries, sliding resolution, and ray casts over a collider set.

use glam::Vec3;
use tracing::warn;

use veldt_common::{Collider, ColliderShape};

/// Small separation added when pushing out of a contact, so a resolved
/// position re-tests as clear.
const CONTACT_SKIN: f32 = 1e-3;

/// Result of a sphere-vs-world collision test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether any non-trigger collider overlaps the sphere
    pub collided: bool,
    /// Contact point on the colliding geometry
    pub point: Option<Vec3>,
    /// Push-out direction (unit length)
    pub normal: Option<Vec3>,
    /// Penetration depth of the deepest contact
    pub penetration: f32,
    /// Distance from the sphere surface to the nearest obstacle when clear
    pub nearest_distance: f32,
}

impl CollisionResult {
    /// Creates a no-collision result carrying the nearest obstacle distance.
    #[must_use]
    pub const fn clear(nearest_distance: f32) -> Self {
        Self {
            collided: false,
            point: None,
            normal: None,
            penetration: 0.0,
            nearest_distance,
        }
    }

    /// Creates a collision result.
    #[must_use]
    pub const fn hit(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            collided: true,
            point: Some(point),
            normal: Some(normal),
            penetration,
            nearest_distance: 0.0,
        }
    }
}

/// Result of a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
}

/// Contact with a single collider, used while scanning the set.
struct Contact {
    point: Vec3,
    normal: Vec3,
    penetration: f32,
}

/// Stateless query engine over the current collider snapshot.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
}

impl CollisionWorld {
    /// Creates an empty collision world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collider set with a new snapshot.
    pub fn update_colliders(&mut self, colliders: Vec<Collider>) {
        self.colliders = colliders;
    }

    /// Returns the current collider snapshot.
    #[must_use]
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Number of colliders in the current snapshot.
    #[must_use]
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Tests a sphere against every active non-trigger collider.
    ///
    /// Returns the deepest contact, or a clear result carrying the distance
    /// to the nearest obstacle.
    #[must_use]
    pub fn check_collision(&self, position: Vec3, radius: f32) -> CollisionResult {
        let mut deepest: Option<Contact> = None;
        let mut nearest = f32::INFINITY;

        for collider in &self.colliders {
            if collider.trigger {
                continue;
            }
            match sphere_contact(collider, position, radius) {
                Ok(contact) => {
                    let replace = deepest
                        .as_ref()
                        .map_or(true, |d| contact.penetration > d.penetration);
                    if replace {
                        deepest = Some(contact);
                    }
                }
                Err(distance) => nearest = nearest.min(distance),
            }
        }

        match deepest {
            Some(contact) => CollisionResult::hit(contact.point, contact.normal, contact.penetration),
            None => CollisionResult::clear(nearest),
        }
    }

    /// Convenience wrapper: true when no non-trigger collider overlaps.
    #[must_use]
    pub fn is_position_clear(&self, position: Vec3, radius: f32) -> bool {
        !self.check_collision(position, radius).collided
    }

    /// Resolves desired movement into a validated position.
    ///
    /// Iteratively slides the target along the contact normal by the
    /// penetration depth; if no clear position is found within the
    /// iteration bound, falls back to the last known-good `current`
    /// position. Never teleports past geometry.
    #[must_use]
    pub fn find_valid_position(
        &self,
        target: Vec3,
        current: Vec3,
        radius: f32,
        max_iterations: u32,
    ) -> Vec3 {
        let mut candidate = target;

        for _ in 0..max_iterations {
            let result = self.check_collision(candidate, radius);
            if !result.collided {
                return candidate;
            }
            let normal = result.normal.unwrap_or(Vec3::Y);
            candidate += normal * (result.penetration + CONTACT_SKIN);
        }

        if self.is_position_clear(candidate, radius) {
            candidate
        } else {
            warn!(
                iterations = max_iterations,
                "sliding resolution exhausted, reverting to last good position"
            );
            current
        }
    }

    /// Casts a ray and returns the nearest hit within `max_distance`.
    ///
    /// Box colliders use the slab method, sphere colliders the quadratic
    /// intersection; only positive-distance roots count. A degenerate
    /// (zero-length) direction reports no hit.
    #[must_use]
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let length = direction.length();
        if length < f32::EPSILON || max_distance <= 0.0 {
            return None;
        }
        let dir = direction / length;

        let mut nearest: Option<RayHit> = None;
        for collider in &self.colliders {
            if collider.trigger {
                continue;
            }
            let hit = match collider.shape {
                ColliderShape::Box {
                    center,
                    half_extents,
                } => ray_box(origin, dir, center, half_extents),
                ColliderShape::Sphere { center, radius } => ray_sphere(origin, dir, center, radius),
            };
            if let Some(hit) = hit {
                if hit.distance <= max_distance
                    && nearest.map_or(true, |n| hit.distance < n.distance)
                {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }
}

/// Tests one collider against a sphere.
///
/// `Ok` carries the contact when overlapping; `Err` carries the clearance
/// from the sphere surface to the collider.
fn sphere_contact(collider: &Collider, position: Vec3, radius: f32) -> Result<Contact, f32> {
    match collider.shape {
        ColliderShape::Box {
            center,
            half_extents,
        } => {
            let bounds =
                veldt_common::Aabb::from_center_half_extents(center, half_extents);
            let closest = bounds.closest_point(position);
            let delta = position - closest;
            let distance = delta.length();

            if distance < radius && radius > 0.0 {
                let normal = if distance > f32::EPSILON {
                    delta / distance
                } else {
                    // Sphere center inside the box: push away from its center.
                    let out = position - center;
                    if out.length() > f32::EPSILON {
                        out.normalize()
                    } else {
                        Vec3::Y
                    }
                };
                Ok(Contact {
                    point: closest,
                    normal,
                    penetration: radius - distance,
                })
            } else {
                Err(distance - radius)
            }
        }
        ColliderShape::Sphere {
            center,
            radius: other_radius,
        } => {
            let delta = position - center;
            let distance = delta.length();
            let combined = radius + other_radius;

            if distance < combined && radius > 0.0 {
                let normal = if distance > f32::EPSILON {
                    delta / distance
                } else {
                    Vec3::Y
                };
                Ok(Contact {
                    point: center + normal * other_radius,
                    normal,
                    penetration: combined - distance,
                })
            } else {
                Err(distance - combined)
            }
        }
    }
}

/// Slab-method ray-vs-AABB intersection.
fn ray_box(origin: Vec3, dir: Vec3, center: Vec3, half_extents: Vec3) -> Option<RayHit> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;
    let mut exit_axis = 0;

    for axis in 0..3 {
        let d = dir[axis];
        let o = origin[axis];
        if d.abs() < f32::EPSILON {
            // Ray parallel to this slab: must start inside it.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - o) / d;
        let mut t1 = (max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            enter_axis = axis;
        }
        if t1 < t_exit {
            t_exit = t1;
            exit_axis = axis;
        }
        if t_enter > t_exit {
            return None;
        }
    }

    // Nearest positive root: the entry face, or the exit face when the
    // origin is inside the box. The exit face's normal points with the
    // ray, not against it.
    let (distance, axis, sign) = if t_enter > f32::EPSILON {
        (t_enter, enter_axis, -1.0)
    } else if t_exit > f32::EPSILON {
        (t_exit, exit_axis, 1.0)
    } else {
        return None;
    };

    let point = origin + dir * distance;
    let mut normal = Vec3::ZERO;
    normal[axis] = sign * dir[axis].signum();
    Some(RayHit {
        distance,
        point,
        normal,
    })
}

/// Quadratic ray-vs-sphere intersection.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<RayHit> {
    if radius <= 0.0 {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    let distance = if t_near > f32::EPSILON {
        t_near
    } else if t_far > f32::EPSILON {
        t_far
    } else {
        return None;
    };

    let point = origin + dir * distance;
    Some(RayHit {
        distance,
        point,
        normal: (point - center) / radius,
    })
}
