//! Error types for the application layer

use crate::geolocation::GeolocationError;
use atlas_map::MapError;
use atlas_profile::FieldErrors;
use atlas_registry::RegistryError;
use atlas_store::StoreError;
use std::path::PathBuf;

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Admin operation attempted without a session
    #[error("admin login required")]
    Unauthorized,

    /// Login rejected
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Form submission failed validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file did not parse
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl AppError {
    /// Check if the caller can fix the problem by changing its input
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Unauthorized | Self::InvalidCredentials | Self::Validation(_) => true,
            Self::Registry(e) => e.is_caller_error(),
            Self::Map(MapError::UnknownMarker(_)) => true,
            _ => false,
        }
    }

    /// Field errors, when this is a validation failure
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
