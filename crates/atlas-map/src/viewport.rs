//! Map view state and its limits

use crate::error::MapError;
use atlas_profile::Location;
use serde::{Deserialize, Serialize};

/// Rectangular lat/lng bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// The whole world, no wrapping
    pub const WORLD: Self = Self {
        south: -90.0,
        west: -180.0,
        north: 90.0,
        east: 180.0,
    };

    /// Whether a location lies inside (edges included)
    #[must_use]
    pub fn contains(&self, loc: Location) -> bool {
        (self.south..=self.north).contains(&loc.lat) && (self.west..=self.east).contains(&loc.lng)
    }

    /// Nearest location inside the bounds
    #[must_use]
    pub fn clamp(&self, loc: Location) -> Location {
        Location::new(
            loc.lat.clamp(self.south, self.north),
            loc.lng.clamp(self.west, self.east),
        )
    }
}

/// Center and zoom of a map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Location,
    pub zoom: u8,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(center: Location, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// Viewport defaults and limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Center with nothing selected
    pub default_center: Location,
    /// Zoom with nothing selected
    pub default_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Zoom used when focusing the selected profile
    pub focus_zoom: u8,
    /// Zoom of the single-profile detail map
    pub detail_zoom: u8,
    /// Panning limits
    pub bounds: Bounds,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_center: Location::new(39.8283, -98.5795),
            default_zoom: 4,
            min_zoom: 3,
            max_zoom: 18,
            focus_zoom: 10,
            detail_zoom: 12,
            bounds: Bounds::WORLD,
        }
    }
}

impl ViewportConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With zoom range
    #[inline]
    #[must_use]
    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// With default center and zoom
    #[inline]
    #[must_use]
    pub fn with_default_view(mut self, center: Location, zoom: u8) -> Self {
        self.default_center = center;
        self.default_zoom = zoom;
        self
    }

    /// With focus zoom
    #[inline]
    #[must_use]
    pub fn with_focus_zoom(mut self, zoom: u8) -> Self {
        self.focus_zoom = zoom;
        self
    }

    /// Check internal consistency
    ///
    /// # Errors
    /// Returns [`MapError::InvalidViewport`] when the zoom range is inverted,
    /// a configured zoom falls outside it, or the bounds are empty or do not
    /// contain the default center
    pub fn validate(&self) -> Result<(), MapError> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidViewport(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        let range = self.min_zoom..=self.max_zoom;
        for (name, zoom) in [
            ("default_zoom", self.default_zoom),
            ("focus_zoom", self.focus_zoom),
            ("detail_zoom", self.detail_zoom),
        ] {
            if !range.contains(&zoom) {
                return Err(MapError::InvalidViewport(format!(
                    "{name} {zoom} outside {}..={}",
                    self.min_zoom, self.max_zoom
                )));
            }
        }
        let b = self.bounds;
        if !(b.south < b.north && b.west < b.east) {
            return Err(MapError::InvalidViewport("bounds are empty".to_string()));
        }
        if !b.contains(self.default_center) {
            return Err(MapError::InvalidViewport(
                "default center lies outside bounds".to_string(),
            ));
        }
        Ok(())
    }

    /// The view shown before anything is selected
    #[must_use]
    pub fn initial(&self) -> Viewport {
        self.clamp(Viewport::new(self.default_center, self.default_zoom))
    }

    /// Zoom limited to the configured range
    #[inline]
    #[must_use]
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Viewport limited to the configured bounds and zoom range
    #[must_use]
    pub fn clamp(&self, viewport: Viewport) -> Viewport {
        Viewport::new(
            self.bounds.clamp(viewport.center),
            self.clamp_zoom(viewport.zoom),
        )
    }

    /// Close-up view of one location
    #[must_use]
    pub fn focus_on(&self, location: Location) -> Viewport {
        self.clamp(Viewport::new(location, self.focus_zoom))
    }

    /// Detail-page view of one location
    #[must_use]
    pub fn detail_of(&self, location: Location) -> Viewport {
        self.clamp(Viewport::new(location, self.detail_zoom))
    }
}
