//! # Veldt Collision
//!
//! Collision queries for the observer against the active collider set:
//! - Sphere-vs-box and sphere-vs-sphere overlap tests
//! - Iterative sliding resolution of desired movement
//! - Ray casts (slab method for boxes, quadratic roots for spheres)
//!
//! The collision world holds no knowledge beyond the collider snapshot
//! handed to it; colliders for unloaded tiles stop affecting queries the
//! moment the composer publishes a snapshot without them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod query;

pub use query::{CollisionResult, CollisionWorld, RayHit};
