//! Testing utilities for the Profile Atlas workspace
//!
//! Shared fixtures and recording doubles for the store, registry observer,
//! map surface and navigator seams.

#![allow(missing_docs)]

use atlas_map::{MapSurface, Marker, Navigator, PopupContent, Route, SurfaceCommand, Viewport};
use atlas_profile::{Location, Profile, ProfileId};
use atlas_registry::{ProfileRegistry, RegistryEvent, RegistryObserver, RegistrySnapshot};
use atlas_store::{FileStore, MemoryStore, ProfileStore, StoreError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tempfile::TempDir;

// ========== Fixtures ==========

/// Minimal valid profile at a location
pub fn profile_at(id: &str, name: &str, lat: f64, lng: f64) -> Profile {
    Profile::new(id, name)
        .with_email(format!("{id}@example.com"))
        .with_address(format!("{name} Street"))
        .with_location(lat, lng)
}

/// Profile without any location
pub fn profile_without_location(id: &str, name: &str) -> Profile {
    Profile::new(id, name)
        .with_email(format!("{id}@example.com"))
        .with_address(format!("{name} Street"))
}

/// Registry over a fresh memory store, seeded with the samples
pub fn seeded_registry() -> (Arc<ProfileRegistry>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);
    (registry, store)
}

/// File store in a temporary directory; keep the `TempDir` alive
pub fn temp_file_store() -> (FileStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    (store, dir)
}

// ========== Store doubles ==========

/// Store that works until told to fail, then rejects every call
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every operation fails
    pub fn broken() -> Self {
        let store = Self::new();
        store.fail_reads(true);
        store.fail_writes(true);
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Value held by the backing memory store, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl ProfileStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        self.inner.set(key, value)
    }
}

// ========== Observer doubles ==========

/// Observer that records every event with the snapshot it came with
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(RegistryEvent, RegistrySnapshot)>>,
}

impl RecordingObserver {
    /// Create and subscribe; the caller keeps the returned `Arc` alive
    pub fn attach(registry: &ProfileRegistry) -> Arc<Self> {
        let observer = Arc::new(Self::default());
        registry.subscribe(Arc::downgrade(&observer) as Weak<dyn RegistryObserver>);
        observer
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().iter().map(|(e, _)| e.clone()).collect()
    }

    pub fn last_snapshot(&self) -> Option<RegistrySnapshot> {
        self.events.lock().last().map(|(_, s)| s.clone())
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl RegistryObserver for RecordingObserver {
    fn on_registry_event(&self, event: &RegistryEvent, snapshot: &RegistrySnapshot) {
        self.events.lock().push((event.clone(), snapshot.clone()));
    }
}

// ========== Map doubles ==========

/// Surface that records commands into a shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<Vec<SurfaceCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the command log that outlives the boxed surface
    pub fn log(&self) -> Arc<Mutex<Vec<SurfaceCommand>>> {
        Arc::clone(&self.log)
    }

    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.log.lock().clone()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }

    fn push(&self, command: SurfaceCommand) {
        self.log.lock().push(command);
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: &Marker) {
        self.push(SurfaceCommand::AddMarker(marker.clone()));
    }

    fn remove_marker(&mut self, id: &ProfileId) {
        self.push(SurfaceCommand::RemoveMarker(id.clone()));
    }

    fn move_marker(&mut self, id: &ProfileId, position: Location) {
        self.push(SurfaceCommand::MoveMarker(id.clone(), position));
    }

    fn set_popup(&mut self, id: &ProfileId, popup: &PopupContent) {
        self.push(SurfaceCommand::SetPopup(id.clone(), popup.clone()));
    }

    fn open_popup(&mut self, id: &ProfileId) {
        self.push(SurfaceCommand::OpenPopup(id.clone()));
    }

    fn set_view(&mut self, viewport: Viewport) {
        self.push(SurfaceCommand::SetView(viewport));
    }
}

/// Navigator that records requested routes
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}
