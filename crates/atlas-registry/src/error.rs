//! Error types for the profile registry

use atlas_profile::ProfileId;
use atlas_store::StoreError;

/// Registry errors
///
/// Unknown ids on update/remove are not errors; those calls are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A profile with this id is already registered
    #[error("profile id already exists: {0}")]
    DuplicateId(ProfileId),

    /// Store could not be read
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Stored collection is not a valid profile array
    #[error("stored profiles are malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RegistryError {
    /// Whether the caller can correct the request and retry
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }
}
