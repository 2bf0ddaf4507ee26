//! Atlas Profile
//!
//! Profile records for the profile directory.
//!
//! # Overview
//!
//! - **Profile**: one directory entry, serialized in the stored JSON shape
//! - **ProfileDraft**: admin form state with lenient field parsing
//! - **FieldErrors**: per-field validation messages
//! - **sample_profiles**: the built-in seed set
//!
//! # Example
//!
//! ```rust
//! use atlas_profile::{ProfileDraft, ProfileField};
//!
//! let mut draft = ProfileDraft::new();
//! draft.set_field("name", "Ada Lovelace").unwrap();
//!
//! let errors = draft.validate();
//! assert_eq!(errors.get(ProfileField::Email), Some("Email is required"));
//! ```

#![allow(missing_docs)]

pub mod draft;
pub mod error;
pub mod profile;
pub mod seed;
pub mod validation;

// Re-exports
pub use draft::{parse_coordinate, split_interests, DraftMode, ProfileDraft};
pub use error::ProfileError;
pub use profile::{Location, Profile, ProfileId, SearchField, SocialHandles, PLACEHOLDER_PHOTO};
pub use seed::{sample_profiles, SAMPLE_PROFILE_COUNT};
pub use validation::{is_valid_email, validate_profile, FieldErrors, ProfileField};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for profile handling
    pub use crate::{Location, Profile, ProfileDraft, ProfileId, FieldErrors, ProfileField};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
