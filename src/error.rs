//! Error types shared by the map and analytics core.
//!
//! None of these are fatal: callers log them and keep the previous state so
//! the map stays interactive with partial data.

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable failures raised by the projection, filtering and viewport code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtlasError {
    /// Coordinate that cannot be projected (non-finite, out of range, or at a pole).
    #[error("coordinate (lon {longitude}, lat {latitude}) cannot be projected")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    /// Route endpoint that is missing from the airport table.
    #[error("route #{route_index} references unknown airport {identifier:?}")]
    DanglingReference {
        route_index: usize,
        identifier: String,
    },

    /// Zoom factor that is zero, negative or not finite.
    #[error("zoom factor {0} must be positive and finite")]
    InvalidZoomFactor(f64),
}

/// Failures while reading a dataset or settings document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = AtlasError::InvalidZoomFactor(-2.0);
        assert_eq!(err.to_string(), "zoom factor -2 must be positive and finite");

        let err = AtlasError::DanglingReference {
            route_index: 3,
            identifier: "XXX".to_string(),
        };
        assert!(err.to_string().contains("\"XXX\""));
    }
}
