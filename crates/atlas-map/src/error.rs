//! Error types for the map view

use atlas_profile::ProfileId;

/// Map errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Viewport configuration is inconsistent
    #[error("invalid viewport configuration: {0}")]
    InvalidViewport(String),

    /// Interaction targeted a marker that is not on the map
    #[error("no marker for profile {0}")]
    UnknownMarker(ProfileId),
}
