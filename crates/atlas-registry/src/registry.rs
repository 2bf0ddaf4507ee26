//! The authoritative profile collection
//!
//! [`ProfileRegistry`] owns the in-memory profiles and the selection pointer.
//! Every mutation writes the full collection back to the store before the
//! registry lock is released, so the store never lags behind memory while
//! persistence is available. If the store fails, the registry keeps working
//! in memory for the rest of the session.

use crate::codec::{decode_profiles, encode_profiles, PROFILES_KEY};
use crate::error::RegistryError;
use crate::event::{
    LoadOutcome, RegistryEvent, RegistryObserver, RegistrySnapshot, SeedReason, SubscriptionId,
};
use crate::search::{filter_profiles, SearchScope};
use atlas_profile::{sample_profiles, Profile, ProfileId};
use atlas_store::{ProfileStore, StoreError};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Whether mutations reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Every mutation is written through
    Durable,
    /// Store failed; changes live only in memory for this session
    MemoryOnly,
}

#[derive(Debug)]
struct RegistryState {
    profiles: Arc<Vec<Profile>>,
    selected: Option<ProfileId>,
    persistence: Persistence,
}

impl RegistryState {
    fn position(&self, id: &ProfileId) -> Option<usize> {
        self.profiles.iter().position(|p| &p.id == id)
    }

    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            profiles: Arc::clone(&self.profiles),
            selected: self.selected.clone(),
        }
    }
}

type ObserverList = Vec<(SubscriptionId, Weak<dyn RegistryObserver>)>;

/// Profile collection with selection, persistence and observers
pub struct ProfileRegistry {
    store: Arc<dyn ProfileStore>,
    state: RwLock<RegistryState>,
    observers: RwLock<ObserverList>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for ProfileRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ProfileRegistry")
            .field("profiles", &state.profiles.len())
            .field("selected", &state.selected)
            .field("persistence", &state.persistence)
            .field("observers", &self.observers.read().len())
            .finish_non_exhaustive()
    }
}

impl ProfileRegistry {
    /// Create an empty registry over `store`; call [`Self::load`] next
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            state: RwLock::new(RegistryState {
                profiles: Arc::new(Vec::new()),
                selected: None,
                persistence: Persistence::Durable,
            }),
            observers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Create and load in one step
    #[must_use]
    pub fn open(store: Arc<dyn ProfileStore>) -> Arc<Self> {
        let registry = Arc::new(Self::new(store));
        registry.load();
        registry
    }

    // ========== Loading ==========

    /// Read the collection from the store, seeding the sample set when the
    /// stored value is absent or unusable
    ///
    /// Never fails: read problems are logged and answered with seeding.
    pub fn load(&self) -> LoadOutcome {
        let outcome = {
            let mut state = self.state.write();
            let outcome = match self.store.get(PROFILES_KEY) {
                Ok(Some(text)) => match decode_profiles(&text) {
                    Ok(profiles) => {
                        let (profiles, dropped) = dedupe(profiles);
                        let count = profiles.len();
                        state.profiles = Arc::new(profiles);
                        if dropped > 0 {
                            tracing::warn!(dropped, "stored profiles contained duplicate ids");
                            self.persist(&mut state);
                        }
                        LoadOutcome::Restored { count }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stored profiles are malformed, reseeding");
                        self.seed(&mut state, SeedReason::Malformed)
                    }
                },
                Ok(None) => {
                    tracing::info!("no stored profiles, seeding sample set");
                    self.seed(&mut state, SeedReason::Missing)
                }
                Err(e) if e.is_unavailable() => {
                    tracing::warn!(error = %e, "profile store unavailable, running in memory");
                    state.persistence = Persistence::MemoryOnly;
                    self.seed(&mut state, SeedReason::StoreUnavailable)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored profiles unreadable, reseeding");
                    self.seed(&mut state, SeedReason::Malformed)
                }
            };
            tracing::info!(count = state.profiles.len(), ?outcome, "profiles loaded");
            outcome
        };

        self.notify(&RegistryEvent::Loaded(outcome));
        outcome
    }

    /// Discard the collection and write the sample set
    pub fn reset_to_samples(&self) {
        {
            let mut state = self.state.write();
            state.selected = None;
            self.seed(&mut state, SeedReason::Missing);
        }
        tracing::info!("profiles reset to sample set");
        self.notify(&RegistryEvent::Loaded(LoadOutcome::Seeded {
            reason: SeedReason::Missing,
        }));
    }

    /// Re-read the store after an external write
    ///
    /// Returns `true` when the collection changed. Selection is kept as is,
    /// even if it now points at a missing profile.
    ///
    /// # Errors
    /// Returns [`RegistryError`] if the store cannot be read or the stored
    /// value does not parse; the in-memory collection is left untouched
    pub fn reload(&self) -> Result<bool, RegistryError> {
        let changed = {
            let mut state = self.state.write();
            if state.persistence == Persistence::MemoryOnly {
                return Ok(false);
            }
            let Some(text) = self.store.get(PROFILES_KEY)? else {
                return Ok(false);
            };
            let (profiles, _) = dedupe(decode_profiles(&text)?);
            if *state.profiles == profiles {
                false
            } else {
                state.profiles = Arc::new(profiles);
                true
            }
        };

        if changed {
            tracing::info!("profiles reloaded after external change");
            self.notify(&RegistryEvent::Reloaded);
        }
        Ok(changed)
    }

    // ========== Mutations ==========

    /// Append a profile
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateId`] if the id is taken; nothing is
    /// changed in that case
    pub fn add(&self, profile: Profile) -> Result<(), RegistryError> {
        let id = profile.id.clone();
        {
            let mut state = self.state.write();
            if state.position(&id).is_some() {
                tracing::warn!(%id, "rejected duplicate profile id");
                return Err(RegistryError::DuplicateId(id));
            }
            Arc::make_mut(&mut state.profiles).push(profile.normalized());
            self.persist(&mut state);
        }

        tracing::info!(%id, "profile added");
        self.notify(&RegistryEvent::Added(id));
        Ok(())
    }

    /// Replace the profile with the same id; returns `false` if there is none
    pub fn update(&self, profile: Profile) -> bool {
        let id = profile.id.clone();
        {
            let mut state = self.state.write();
            let Some(idx) = state.position(&id) else {
                tracing::debug!(%id, "update for unknown profile ignored");
                return false;
            };
            Arc::make_mut(&mut state.profiles)[idx] = profile.normalized();
            self.persist(&mut state);
        }

        tracing::info!(%id, "profile updated");
        self.notify(&RegistryEvent::Updated(id));
        true
    }

    /// Delete a profile, clearing the selection if it pointed there;
    /// returns `false` if there is no such profile
    pub fn remove(&self, id: &ProfileId) -> bool {
        let selection_cleared = {
            let mut state = self.state.write();
            let Some(idx) = state.position(id) else {
                tracing::debug!(%id, "remove for unknown profile ignored");
                return false;
            };
            Arc::make_mut(&mut state.profiles).remove(idx);
            let cleared = state.selected.as_ref() == Some(id);
            if cleared {
                state.selected = None;
            }
            self.persist(&mut state);
            cleared
        };

        tracing::info!(%id, selection_cleared, "profile removed");
        self.notify(&RegistryEvent::Removed {
            id: id.clone(),
            selection_cleared,
        });
        true
    }

    /// Move the selection pointer; the id is not checked against the
    /// collection
    pub fn select(&self, id: Option<ProfileId>) {
        let previous = {
            let mut state = self.state.write();
            if state.selected == id {
                return;
            }
            std::mem::replace(&mut state.selected, id.clone())
        };

        tracing::debug!(?previous, current = ?id, "selection changed");
        self.notify(&RegistryEvent::SelectionChanged {
            previous,
            current: id,
        });
    }

    // ========== Queries ==========

    /// All profiles in insertion order
    #[must_use]
    pub fn profiles(&self) -> Arc<Vec<Profile>> {
        Arc::clone(&self.state.read().profiles)
    }

    /// Look up one profile
    #[must_use]
    pub fn get(&self, id: &ProfileId) -> Option<Profile> {
        self.state.read().profiles.iter().find(|p| &p.id == id).cloned()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ProfileId) -> bool {
        self.state.read().position(id).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().profiles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().profiles.is_empty()
    }

    /// Current selection pointer, possibly stale
    #[must_use]
    pub fn selected_id(&self) -> Option<ProfileId> {
        self.state.read().selected.clone()
    }

    /// Selected profile if the pointer resolves
    #[must_use]
    pub fn selected(&self) -> Option<Profile> {
        self.snapshot().selected_profile().cloned()
    }

    /// Collection and selection as one consistent view
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.state.read().snapshot()
    }

    /// Whether mutations are still reaching the store
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        self.state.read().persistence
    }

    /// Profiles matching a search term in the given scope
    #[must_use]
    pub fn search(&self, term: &str, scope: SearchScope) -> Vec<Profile> {
        let profiles = self.profiles();
        filter_profiles(&profiles, term, scope)
            .into_iter()
            .cloned()
            .collect()
    }

    // ========== Observers ==========

    /// Register an observer; the registry holds it weakly
    pub fn subscribe(&self, observer: Weak<dyn RegistryObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Drop a subscription; returns `false` if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    /// Number of live observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    // ========== Internals ==========

    fn seed(&self, state: &mut RegistryState, reason: SeedReason) -> LoadOutcome {
        state.profiles = Arc::new(sample_profiles());
        self.persist(state);
        LoadOutcome::Seeded { reason }
    }

    /// Write the full collection; on failure switch to memory-only mode
    fn persist(&self, state: &mut RegistryState) {
        if state.persistence == Persistence::MemoryOnly {
            return;
        }
        let result = encode_profiles(&state.profiles)
            .map_err(|e| StoreError::Unavailable(format!("encode failed: {e}")))
            .and_then(|text| self.store.set(PROFILES_KEY, &text));

        if let Err(e) = result {
            tracing::warn!(error = %e, "profile store write failed, continuing in memory");
            state.persistence = Persistence::MemoryOnly;
        }
    }

    fn notify(&self, event: &RegistryEvent) {
        let live: Vec<Arc<dyn RegistryObserver>> = {
            let mut observers = self.observers.write();
            observers.retain(|(_, weak)| weak.strong_count() > 0);
            observers.iter().filter_map(|(_, weak)| weak.upgrade()).collect()
        };
        if live.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for observer in live {
            observer.on_registry_event(event, &snapshot);
        }
    }
}

/// Keep the first occurrence of every id
fn dedupe(profiles: Vec<Profile>) -> (Vec<Profile>, usize) {
    let before = profiles.len();
    let mut seen = HashSet::new();
    let kept: Vec<Profile> = profiles
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .map(Profile::normalized)
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
