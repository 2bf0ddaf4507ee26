//! Map markers derived from profiles

use crate::navigation::Route;
use atlas_profile::{Location, Profile, ProfileId};

/// Popup attached to a marker
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    /// Profile name
    pub title: String,
    /// Profile address
    pub subtitle: String,
    /// "View Details" target; absent on the detail page's own map
    pub details: Option<Route>,
}

impl PopupContent {
    /// Popup for the directory map, with a details action
    #[must_use]
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            title: profile.name.clone(),
            subtitle: profile.address.clone(),
            details: Some(Route::ProfileDetail(profile.id.clone())),
        }
    }

    /// Same popup without the details action
    #[must_use]
    pub fn without_details(mut self) -> Self {
        self.details = None;
        self
    }
}

/// One marker on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub profile_id: ProfileId,
    pub position: Location,
    pub popup: PopupContent,
}

impl Marker {
    /// Marker for a profile, or `None` if it has no plottable location
    #[must_use]
    pub fn for_profile(profile: &Profile) -> Option<Self> {
        let position = profile.plottable_location()?;
        Some(Self {
            profile_id: profile.id.clone(),
            position,
            popup: PopupContent::for_profile(profile),
        })
    }
}

/// Whether a profile gets a marker: location present, finite, not `(0, 0)`
#[inline]
#[must_use]
pub fn is_eligible(profile: &Profile) -> bool {
    profile.plottable_location().is_some()
}
