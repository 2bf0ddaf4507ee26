//! Application configuration
//!
//! Loaded from TOML; every section and field has a default, so an empty file
//! is a valid configuration.
//!
//! ```toml
//! [storage]
//! backend = "file"
//! path = "./atlas-data"
//!
//! [map]
//! focus_zoom = 11
//!
//! [admin]
//! username = "admin"
//! salt = "profile-atlas"
//! password_sha256 = "..."
//!
//! [geolocation]
//! timeout_ms = 10000
//! ```

use crate::error::AppError;
use atlas_map::ViewportConfig;
use atlas_store::{FileStore, MemoryStore, ProfileStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where the profile collection is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on exit
    Memory,
    /// One JSON file per key under `path`
    #[default]
    File,
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("atlas-data"),
        }
    }
}

impl StorageConfig {
    /// Open the configured backend
    #[must_use]
    pub fn open(&self) -> Arc<dyn ProfileStore> {
        match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&self.path)),
        }
    }
}

/// `[admin]`
///
/// Without `password_sha256` no login can succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub salt: String,
    /// Hex SHA-256 of `salt` followed by the password
    pub password_sha256: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            salt: "profile-atlas".to_string(),
            password_sha256: None,
        }
    }
}

/// `[geolocation]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// Ceiling for one position request
    pub timeout_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

impl GeolocationConfig {
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub map: ViewportConfig,
    pub admin: AdminConfig,
    pub geolocation: GeolocationConfig,
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns [`AppError::ConfigParse`] for malformed TOML and
    /// [`AppError::Config`] when [`Self::validate`] fails
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`AppError::ConfigRead`] if the file cannot be read, otherwise
    /// as [`Self::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check cross-field consistency
    ///
    /// # Errors
    /// Returns [`AppError::Config`] for an invalid map section, a malformed
    /// password digest, an empty admin username or a zero geolocation timeout
    pub fn validate(&self) -> Result<(), AppError> {
        self.map
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.admin.username.trim().is_empty() {
            return Err(AppError::Config("admin.username is empty".to_string()));
        }
        if let Some(digest) = &self.admin.password_sha256 {
            let valid = digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(AppError::Config(
                    "admin.password_sha256 must be 64 hex characters".to_string(),
                ));
            }
        }
        if self.geolocation.timeout_ms == 0 {
            return Err(AppError::Config(
                "geolocation.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// With storage backend and location
    #[inline]
    #[must_use]
    pub fn with_storage(mut self, backend: StorageBackend, path: impl Into<PathBuf>) -> Self {
        self.storage = StorageConfig {
            backend,
            path: path.into(),
        };
        self
    }

    /// In-memory storage, nothing survives the process
    #[inline]
    #[must_use]
    pub fn in_memory(mut self) -> Self {
        self.storage.backend = StorageBackend::Memory;
        self
    }

    /// With map viewport configuration
    #[inline]
    #[must_use]
    pub fn with_map(mut self, map: ViewportConfig) -> Self {
        self.map = map;
        self
    }

    /// With admin credentials given as a password; only the digest is kept
    #[must_use]
    pub fn with_admin_password(
        mut self,
        username: impl Into<String>,
        salt: impl Into<String>,
        password: &str,
    ) -> Self {
        let salt = salt.into();
        self.admin = AdminConfig {
            username: username.into(),
            password_sha256: Some(crate::admin::hash_password(&salt, password)),
            salt,
        };
        self
    }

    /// With geolocation ceiling
    #[inline]
    #[must_use]
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }
}
