//! Atlas Core
//!
//! Application layer of the profile directory: configuration, the admin
//! session, device geolocation and the wiring that ties store, registry and
//! map together.
//!
//! # Example
//!
//! ```rust
//! use atlas_core::{AppConfig, ProfileDirectory, Resolved};
//!
//! let config = AppConfig::new()
//!     .in_memory()
//!     .with_admin_password("admin", "pepper", "s3cret");
//! let directory = ProfileDirectory::open(config).unwrap();
//!
//! assert!(matches!(directory.resolve_route("/profile/1"), Resolved::Profile(_)));
//!
//! let panel = directory.admin_panel();
//! assert!(panel.delete(&"1".into()).is_err());
//! directory.session().login("admin", "s3cret").unwrap();
//! assert!(panel.delete(&"1".into()).unwrap());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod admin;
pub mod config;
pub mod directory;
pub mod error;
pub mod geolocation;

// Re-exports
pub use admin::{
    authenticator_from_config, generate_salt, hash_password, AdminPanel, AdminSession,
    Authenticator, DenyAll, HashedCredentials,
};
pub use config::{AdminConfig, AppConfig, GeolocationConfig, StorageBackend, StorageConfig};
pub use directory::{ProfileDirectory, Resolved};
pub use error::AppError;
pub use geolocation::{
    fill_draft_location, request_location, FixedGeolocation, GeolocationError,
    GeolocationProvider, NoGeolocation,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the directory
    pub use crate::{AdminPanel, AppConfig, AppError, ProfileDirectory, Resolved};
    pub use atlas_map::{MapSurface, MapView, Navigator, Route};
    pub use atlas_profile::{Location, Profile, ProfileDraft, ProfileId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
