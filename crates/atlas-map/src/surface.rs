//! Rendering backend seam
//!
//! [`MapSurface`] receives imperative commands; all decisions about which
//! commands to issue live in [`crate::MapView`].

use crate::marker::{Marker, PopupContent};
use crate::viewport::Viewport;
use atlas_profile::{Location, ProfileId};

/// Command issued to a map surface, for logging and inspection
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    AddMarker(Marker),
    RemoveMarker(ProfileId),
    MoveMarker(ProfileId, Location),
    SetPopup(ProfileId, PopupContent),
    OpenPopup(ProfileId),
    SetView(Viewport),
}

/// Map rendering backend
pub trait MapSurface: Send {
    /// Place a new marker with its popup bound (closed)
    fn add_marker(&mut self, marker: &Marker);

    /// Remove a marker and its popup
    fn remove_marker(&mut self, id: &ProfileId);

    /// Reposition an existing marker
    fn move_marker(&mut self, id: &ProfileId, position: Location);

    /// Replace an existing marker's popup content
    fn set_popup(&mut self, id: &ProfileId, popup: &PopupContent);

    /// Open a marker's popup; the surface closes any other open popup
    fn open_popup(&mut self, id: &ProfileId);

    /// Move the camera
    fn set_view(&mut self, viewport: Viewport);

    /// Dispatch a recorded command
    fn apply(&mut self, command: &SurfaceCommand) {
        match command {
            SurfaceCommand::AddMarker(marker) => self.add_marker(marker),
            SurfaceCommand::RemoveMarker(id) => self.remove_marker(id),
            SurfaceCommand::MoveMarker(id, pos) => self.move_marker(id, *pos),
            SurfaceCommand::SetPopup(id, popup) => self.set_popup(id, popup),
            SurfaceCommand::OpenPopup(id) => self.open_popup(id),
            SurfaceCommand::SetView(view) => self.set_view(*view),
        }
    }
}

/// Surface without a display; commands only go to the trace log
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSurface;

impl MapSurface for HeadlessSurface {
    fn add_marker(&mut self, marker: &Marker) {
        tracing::trace!(id = %marker.profile_id, lat = marker.position.lat, lng = marker.position.lng, "add marker");
    }

    fn remove_marker(&mut self, id: &ProfileId) {
        tracing::trace!(%id, "remove marker");
    }

    fn move_marker(&mut self, id: &ProfileId, position: Location) {
        tracing::trace!(%id, lat = position.lat, lng = position.lng, "move marker");
    }

    fn set_popup(&mut self, id: &ProfileId, popup: &PopupContent) {
        tracing::trace!(%id, title = %popup.title, "set popup");
    }

    fn open_popup(&mut self, id: &ProfileId) {
        tracing::trace!(%id, "open popup");
    }

    fn set_view(&mut self, viewport: Viewport) {
        tracing::trace!(lat = viewport.center.lat, lng = viewport.center.lng, zoom = viewport.zoom, "set view");
    }
}
