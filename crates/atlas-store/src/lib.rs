//! Atlas Store
//!
//! Key-value persistence boundary for the profile directory.
//!
//! The directory keeps its whole collection as one serialized value under a
//! fixed key. This crate only knows about keys and text values:
//! - [`ProfileStore`]: get/set/subscribe contract
//! - [`MemoryStore`]: process-local map
//! - [`FileStore`]: one file per key, atomically replaced on write

#![warn(unreachable_pub)]

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

// Re-exports
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{validate_key, ProfileStore, StoreChange, CHANGE_CHANNEL_CAPACITY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
