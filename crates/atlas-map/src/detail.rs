//! Single-profile map shown on the detail page

use crate::marker::{Marker, PopupContent};
use crate::surface::MapSurface;
use crate::viewport::{Viewport, ViewportConfig};
use atlas_profile::Profile;

/// Static map centered on one profile
///
/// Not bound to the registry; the detail page re-renders it when the
/// profile changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailMap {
    pub marker: Marker,
    pub viewport: Viewport,
}

impl DetailMap {
    /// Render `profile` onto `surface`: one marker at the detail zoom with
    /// its popup open and no details action
    ///
    /// Returns `None`, issuing nothing, when the profile has no plottable
    /// location.
    pub fn render(
        profile: &Profile,
        config: &ViewportConfig,
        surface: &mut dyn MapSurface,
    ) -> Option<Self> {
        let mut marker = Marker::for_profile(profile)?;
        marker.popup = PopupContent::for_profile(profile).without_details();
        let viewport = config.detail_of(marker.position);

        surface.set_view(viewport);
        surface.add_marker(&marker);
        surface.open_popup(&marker.profile_id);

        Some(Self { marker, viewport })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use atlas_profile::Location;

    #[test]
    fn detail_map_zooms_in_without_details_link() {
        let profile = Profile::new("2", "Jane")
            .with_address("Los Angeles, CA")
            .with_location(34.0522, -118.2437);
        let map = DetailMap::render(&profile, &ViewportConfig::default(), &mut HeadlessSurface)
            .unwrap();

        assert_eq!(map.viewport.zoom, 12);
        assert_eq!(map.viewport.center, Location::new(34.0522, -118.2437));
        assert_eq!(map.marker.popup.details, None);
    }

    #[test]
    fn unplottable_profile_has_no_map() {
        let profile = Profile::new("2", "Jane");
        assert!(DetailMap::render(&profile, &ViewportConfig::default(), &mut HeadlessSurface).is_none());
    }
}
