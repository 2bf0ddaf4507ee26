//! Atlas Map
//!
//! Keeps an interactive map in step with the profile registry.
//!
//! # Overview
//!
//! - **MapView**: one marker per plottable profile, two-way selection sync
//! - **reconcile**: minimal add/remove/move/relabel diff of the marker set
//! - **MapSurface**: the rendering backend seam
//! - **ViewportConfig**: default view, zoom range, panning bounds
//! - **DetailMap**: the single-profile map of the detail page
//!
//! # Example
//!
//! ```rust
//! use atlas_map::{HeadlessSurface, MapView, Navigator, Route, ViewportConfig};
//! use atlas_registry::ProfileRegistry;
//! use atlas_store::MemoryStore;
//! use std::sync::Arc;
//!
//! struct Ignore;
//! impl Navigator for Ignore {
//!     fn navigate(&self, _route: Route) {}
//! }
//!
//! let registry = ProfileRegistry::open(Arc::new(MemoryStore::new()));
//! let map = MapView::attach(
//!     Arc::clone(&registry),
//!     Box::new(HeadlessSurface),
//!     Arc::new(Ignore),
//!     ViewportConfig::default(),
//! )
//! .unwrap();
//!
//! registry.select(Some("3".into()));
//! assert_eq!(map.viewport().zoom, 10);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod detail;
pub mod error;
pub mod marker;
pub mod navigation;
pub mod reconcile;
pub mod surface;
pub mod view;
pub mod viewport;

// Re-exports
pub use detail::DetailMap;
pub use error::MapError;
pub use marker::{is_eligible, Marker, PopupContent};
pub use navigation::{Navigator, Route};
pub use reconcile::{desired_markers, reconcile, MarkerDiff, MarkerSet};
pub use surface::{HeadlessSurface, MapSurface, SurfaceCommand};
pub use view::MapView;
pub use viewport::{Bounds, Viewport, ViewportConfig};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for map integration
    pub use crate::{MapSurface, MapView, Marker, Navigator, Route, ViewportConfig};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
