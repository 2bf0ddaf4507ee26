//! Registry-driven map view
//!
//! [`MapView`] renders one marker per plottable profile and keeps the map
//! in step with the registry selection in both directions: selecting a
//! profile focuses its marker, clicking a marker selects its profile.
//!
//! The view subscribes to the registry weakly and re-derives the marker set
//! from the collection whenever it changes; selection-only events just move
//! the focus. Its own lock is never held while calling back into the
//! registry.

use crate::error::MapError;
use crate::marker::Marker;
use crate::navigation::{Navigator, Route};
use crate::reconcile::{reconcile, MarkerSet};
use crate::surface::MapSurface;
use crate::viewport::{Viewport, ViewportConfig};
use atlas_profile::{Location, ProfileId};
use atlas_registry::{
    ProfileRegistry, RegistryEvent, RegistryObserver, RegistrySnapshot, SubscriptionId,
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

struct MapState {
    surface: Box<dyn MapSurface>,
    markers: MarkerSet,
    viewport: Viewport,
    open_popup: Option<ProfileId>,
}

impl MapState {
    fn set_view(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.set_view(viewport);
    }

    fn focus(&mut self, id: &ProfileId, location: Location, config: &ViewportConfig) {
        self.surface.open_popup(id);
        self.open_popup = Some(id.clone());
        self.set_view(config.focus_on(location));
    }
}

/// Map of all geolocated profiles, bound to a registry
pub struct MapView {
    registry: Arc<ProfileRegistry>,
    navigator: Arc<dyn Navigator>,
    config: ViewportConfig,
    subscription: SubscriptionId,
    state: Mutex<MapState>,
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MapView")
            .field("markers", &state.markers.len())
            .field("viewport", &state.viewport)
            .field("open_popup", &state.open_popup)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl MapView {
    /// Bind a map to `registry`, render the initial view and markers
    ///
    /// # Errors
    /// Returns [`MapError::InvalidViewport`] if `config` is inconsistent
    pub fn attach(
        registry: Arc<ProfileRegistry>,
        mut surface: Box<dyn MapSurface>,
        navigator: Arc<dyn Navigator>,
        config: ViewportConfig,
    ) -> Result<Arc<Self>, MapError> {
        config.validate()?;

        let viewport = config.initial();
        surface.set_view(viewport);

        let view = Arc::new_cyclic(|weak: &Weak<Self>| {
            let observer: Weak<dyn RegistryObserver> = weak.clone();
            let subscription = registry.subscribe(observer);
            Self {
                registry,
                navigator,
                config,
                subscription,
                state: Mutex::new(MapState {
                    surface,
                    markers: MarkerSet::new(),
                    viewport,
                    open_popup: None,
                }),
            }
        });

        view.sync();
        tracing::debug!(markers = view.marker_count(), "map view attached");
        Ok(view)
    }

    /// Re-derive markers and focus from the registry's current state
    pub fn sync(&self) {
        let snapshot = self.registry.snapshot();
        self.apply(&snapshot, true);
    }

    // ========== Interaction ==========

    /// A marker was clicked: select its profile
    ///
    /// # Errors
    /// Returns [`MapError::UnknownMarker`] if no marker exists for `id`
    pub fn handle_marker_click(&self, id: &ProfileId) -> Result<(), MapError> {
        let location = self.marker_position(id)?;

        if self.registry.selected_id().as_ref() == Some(id) {
            // no selection event will follow, focus directly
            self.state.lock().focus(id, location, &self.config);
        } else {
            self.registry.select(Some(id.clone()));
        }
        Ok(())
    }

    /// The "View Details" popup action: navigate to the profile page
    ///
    /// Map state and selection are left as they are.
    ///
    /// # Errors
    /// Returns [`MapError::UnknownMarker`] if no marker exists for `id`
    pub fn handle_view_details(&self, id: &ProfileId) -> Result<(), MapError> {
        self.marker_position(id)?;
        self.navigator.navigate(Route::ProfileDetail(id.clone()));
        Ok(())
    }

    /// Move the camera, keeping the zoom; clamped to the configured bounds
    pub fn pan_to(&self, center: Location) {
        let mut state = self.state.lock();
        let target = self.config.clamp(Viewport::new(center, state.viewport.zoom));
        state.set_view(target);
    }

    /// Change the zoom, keeping the center; clamped to the configured range
    pub fn zoom_to(&self, zoom: u8) {
        let mut state = self.state.lock();
        let target = self.config.clamp(Viewport::new(state.viewport.center, zoom));
        state.set_view(target);
    }

    // ========== Queries ==========

    /// Markers currently on the map, ordered by profile id
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.state.lock().markers.values().cloned().collect()
    }

    #[must_use]
    pub fn marker_ids(&self) -> Vec<ProfileId> {
        self.state.lock().markers.keys().cloned().collect()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.state.lock().markers.len()
    }

    #[must_use]
    pub fn marker(&self, id: &ProfileId) -> Option<Marker> {
        self.state.lock().markers.get(id).cloned()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    /// Profile whose popup was last opened, if its marker still exists
    #[must_use]
    pub fn open_popup(&self) -> Option<ProfileId> {
        self.state.lock().open_popup.clone()
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    // ========== Internals ==========

    fn marker_position(&self, id: &ProfileId) -> Result<Location, MapError> {
        self.state
            .lock()
            .markers
            .get(id)
            .map(|m| m.position)
            .ok_or_else(|| MapError::UnknownMarker(id.clone()))
    }

    fn apply(&self, snapshot: &RegistrySnapshot, collection_changed: bool) {
        let mut state = self.state.lock();
        let state = &mut *state;

        if collection_changed {
            let diff = reconcile(&state.markers, &snapshot.profiles);
            if !diff.is_empty() {
                tracing::debug!(
                    added = diff.added.len(),
                    removed = diff.removed.len(),
                    moved = diff.moved.len(),
                    relabeled = diff.relabeled.len(),
                    "reconciling markers"
                );
                diff.apply(&mut state.markers, state.surface.as_mut());
            }
        }
        if state
            .open_popup
            .as_ref()
            .is_some_and(|id| !state.markers.contains_key(id))
        {
            state.open_popup = None;
        }

        // stale or unplottable selections leave the map alone
        let focus = snapshot
            .selected_profile()
            .and_then(|p| p.plottable_location().map(|loc| (p.id.clone(), loc)));
        if let Some((id, location)) = focus {
            state.focus(&id, location, &self.config);
        }
    }
}

impl RegistryObserver for MapView {
    fn on_registry_event(&self, event: &RegistryEvent, snapshot: &RegistrySnapshot) {
        tracing::trace!(?event, "map view notified");
        self.apply(snapshot, event.changes_collection());
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.registry.unsubscribe(self.subscription);
    }
}
