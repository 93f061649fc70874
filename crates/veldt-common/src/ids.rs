//! Identifier types for tiles and placeable objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::GridCoord;

/// Identifier for a placeable object type (a model in the asset library).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Creates an object id from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Identity of one concrete tile instance: template plus grid coordinates.
///
/// Rendered as `{template}_{x}_{y}`, which is also the name of the tile's
/// render group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    /// Template the tile was generated from
    pub template: String,
    /// Grid coordinate of the tile
    pub grid: GridCoord,
}

impl TileKey {
    /// Creates a new tile key.
    #[must_use]
    pub fn new(template: impl Into<String>, grid: GridCoord) -> Self {
        Self {
            template: template.into(),
            grid,
        }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.template, self.grid.x, self.grid.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_from_str() {
        let id = ObjectId::from("tree_pine");
        assert_eq!(id.as_str(), "tree_pine");
        assert_eq!(id.to_string(), "tree_pine");
    }

    #[test]
    fn test_tile_key_negative_coords() {
        let key = TileKey::new("meadow", GridCoord::new(-1, -3));
        assert_eq!(key.to_string(), "meadow_-1_-3");
    }
}
