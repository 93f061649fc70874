//! Error types for Veldt operations.

use thiserror::Error;

/// Top-level error type for Veldt operations.
#[derive(Debug, Error)]
pub enum VeldtError {
    /// World/grid errors
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Asset loading errors
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// World and tile grid errors.
#[derive(Debug, Error)]
pub enum WorldError {
    /// An authored grid referenced a template id the catalog does not know.
    ///
    /// Configuration errors are fatal for the whole grid load.
    #[error("Unknown tile template '{template}' at grid ({x}, {y})")]
    UnknownTemplate {
        /// Offending template id
        template: String,
        /// Grid X coordinate
        x: i32,
        /// Grid Y coordinate
        y: i32,
    },

    /// The authored grid was empty.
    #[error("World grid is empty")]
    EmptyGrid,

    /// The authored grid rows had inconsistent lengths.
    #[error("World grid row {row} has {actual} columns, expected {expected}")]
    RaggedGrid {
        /// Row index with the wrong length
        row: usize,
        /// Expected column count (from row 0)
        expected: usize,
        /// Actual column count
        actual: usize,
    },
}

/// Asset loading errors.
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    /// The external asset service failed to deliver a model.
    ///
    /// The underlying cause is opaque to the core; only its message is
    /// carried for diagnostics.
    #[error("Failed to load model '{id}': {reason}")]
    LoadFailed {
        /// Object id that failed
        id: String,
        /// Opaque failure description from the asset service
        reason: String,
    },
}

/// Result type alias for Veldt operations.
pub type VeldtResult<T> = Result<T, VeldtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_message_names_coordinates() {
        let err = WorldError::UnknownTemplate {
            template: "swamp".into(),
            x: 3,
            y: -1,
        };
        let msg = err.to_string();
        assert!(msg.contains("swamp"));
        assert!(msg.contains("(3, -1)"));
    }

    #[test]
    fn test_error_conversion() {
        let err: VeldtError = WorldError::EmptyGrid.into();
        assert!(matches!(err, VeldtError::World(_)));
    }
}
