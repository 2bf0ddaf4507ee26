//! Error types for profile stores

use std::path::PathBuf;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing storage cannot be reached at all
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Key contains characters the backend cannot address
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// Filesystem failure
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes are not UTF-8 text
    #[error("value for key {key:?} is not valid UTF-8")]
    NotText { key: String },
}

impl StoreError {
    /// Create an io error for a path
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the store as a whole should be treated as gone
    ///
    /// Callers fall back to memory-only operation on these.
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
            Self::InvalidKey(_) | Self::NotText { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_classification() {
        assert!(StoreError::Unavailable("quota".into()).is_unavailable());
        assert!(!StoreError::InvalidKey("../x".into()).is_unavailable());

        let denied = StoreError::io(
            "/data/profiles.json",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(denied.is_unavailable());
        assert!(denied.to_string().contains("profiles.json"));
    }
}
