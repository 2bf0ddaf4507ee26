//! Atlas Registry
//!
//! The single source of truth for the profile collection and the current
//! selection.
//!
//! # Overview
//!
//! - **ProfileRegistry**: CRUD plus selection, written through to a
//!   [`atlas_store::ProfileStore`] on every mutation
//! - **RegistryObserver**: synchronous change notification with a snapshot
//! - **SearchScope**: list-view filtering
//!
//! # Example
//!
//! ```rust
//! use atlas_registry::ProfileRegistry;
//! use atlas_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let registry = ProfileRegistry::open(Arc::new(MemoryStore::new()));
//! assert_eq!(registry.len(), 8);
//!
//! registry.select(Some("3".into()));
//! assert!(registry.remove(&"3".into()));
//! assert_eq!(registry.selected_id(), None);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod codec;
pub mod error;
pub mod event;
pub mod registry;
pub mod search;

// Re-exports
pub use codec::{decode_profiles, encode_profiles, PROFILES_KEY};
pub use error::RegistryError;
pub use event::{
    LoadOutcome, RegistryEvent, RegistryObserver, RegistrySnapshot, SeedReason, SubscriptionId,
};
pub use registry::{Persistence, ProfileRegistry};
pub use search::{filter_profiles, results_label, SearchScope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
