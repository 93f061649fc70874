//! Renderable model handles and the external asset service seam.

use futures::future::BoxFuture;
use veldt_common::{AssetError, ObjectId};

/// Opaque handle to a mesh resident in the external renderer.
///
/// The core never interprets the underlying resource; it only caches and
/// clones handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

impl MeshHandle {
    /// Handle of the locally constructed placeholder primitive.
    pub const PLACEHOLDER: Self = Self(0);
}

/// A renderable model: an object id bound to a mesh handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Object this model renders
    pub object: ObjectId,
    /// Mesh handle from the asset service, or the placeholder
    pub mesh: MeshHandle,
}

impl Model {
    /// Creates a model from a loaded mesh handle.
    #[must_use]
    pub const fn new(object: ObjectId, mesh: MeshHandle) -> Self {
        Self { object, mesh }
    }

    /// Creates the placeholder model substituted when a load fails.
    #[must_use]
    pub const fn placeholder(object: ObjectId) -> Self {
        Self {
            object,
            mesh: MeshHandle::PLACEHOLDER,
        }
    }

    /// Returns true if this model is the failure placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.mesh == MeshHandle::PLACEHOLDER
    }
}

/// External asset retrieval service.
///
/// Implementations resolve an object id to a renderable model, failing
/// with an opaque error. Loads may take arbitrarily long; the cache layers
/// memoization and coalescing on top.
pub trait ModelSource: Send + Sync {
    /// Loads the model for an object id.
    fn load_model(&self, id: &ObjectId) -> BoxFuture<'_, Result<Model, AssetError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        let placeholder = Model::placeholder(ObjectId::from("tree_pine"));
        assert!(placeholder.is_placeholder());

        let loaded = Model::new(ObjectId::from("tree_pine"), MeshHandle(7));
        assert!(!loaded.is_placeholder());
    }
}
