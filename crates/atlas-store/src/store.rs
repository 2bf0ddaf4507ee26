//! The key-value store contract

use crate::error::StoreError;
use tokio::sync::broadcast;

/// Capacity of change notification channels
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Notification that a key was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// Key that changed
    pub key: String,
}

/// Durable string key-value store
///
/// Values are opaque serialized text. Implementations must be usable behind
/// an `Arc` and shared between the registry and anything observing the store.
pub trait ProfileStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Change notifications, when the backend supports them
    fn subscribe(&self) -> Option<broadcast::Receiver<StoreChange>> {
        None
    }
}

/// Keys are restricted so every backend can address them (file names included)
///
/// # Errors
/// Returns [`StoreError::InvalidKey`] for empty keys or keys with characters
/// outside `[A-Za-z0-9_-.]`, and for keys starting with `.`
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let well_formed = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if well_formed {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
