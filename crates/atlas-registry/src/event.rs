//! Change notification contract
//!
//! Observers are called synchronously after every mutation or selection
//! change, once the registry's own lock has been released. They receive the
//! event plus a snapshot of the collection and selection as of that change,
//! so derived views can recompute from (collection, selection) alone.

use atlas_profile::{Profile, ProfileId};
use std::sync::Arc;

/// Subscription handle returned by [`crate::ProfileRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// How the registry obtained its initial contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Collection read back from the store
    Restored { count: usize },
    /// Store had nothing usable; sample profiles were written
    Seeded { reason: SeedReason },
}

/// Why the sample set was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// Key absent
    Missing,
    /// Stored text did not parse
    Malformed,
    /// Store could not be read at all
    StoreUnavailable,
}

/// A change to the registry
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// Initial load finished
    Loaded(LoadOutcome),
    /// Profile appended
    Added(ProfileId),
    /// Profile replaced in place
    Updated(ProfileId),
    /// Profile deleted; `selection_cleared` when it was the selected one
    Removed {
        id: ProfileId,
        selection_cleared: bool,
    },
    /// Selection pointer moved
    SelectionChanged {
        previous: Option<ProfileId>,
        current: Option<ProfileId>,
    },
    /// Collection re-read after an external write
    Reloaded,
}

impl RegistryEvent {
    /// Whether the profile collection (not just selection) changed
    #[inline]
    #[must_use]
    pub fn changes_collection(&self) -> bool {
        !matches!(self, Self::SelectionChanged { .. })
    }
}

/// Collection and selection at the time of an event
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    pub profiles: Arc<Vec<Profile>>,
    pub selected: Option<ProfileId>,
}

impl RegistrySnapshot {
    /// Look up a profile in the snapshot
    #[must_use]
    pub fn get(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    /// Selected profile, if the selection points at an existing entry
    #[must_use]
    pub fn selected_profile(&self) -> Option<&Profile> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }
}

/// Receiver of registry change notifications
pub trait RegistryObserver: Send + Sync {
    /// Called after each change
    fn on_registry_event(&self, event: &RegistryEvent, snapshot: &RegistrySnapshot);
}
