//! Device location lookup for the admin form
//!
//! One request, bounded by a ceiling, no retry. A fix only ever changes the
//! draft's coordinates.

use async_trait::async_trait;
use atlas_profile::{Location, ProfileDraft};
use std::str::FromStr;
use std::time::Duration;

/// Why a position could not be obtained; the display text is user-facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Unable to retrieve your location")]
    Other,

    /// No provider on this platform
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
}

/// Source of the device position
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Location, GeolocationError>;
}

/// Ask `provider` once, failing with [`GeolocationError::Timeout`] after
/// `ceiling`
///
/// # Errors
/// The provider's error, or `Timeout`
pub async fn request_location(
    provider: &dyn GeolocationProvider,
    ceiling: Duration,
) -> Result<Location, GeolocationError> {
    match tokio::time::timeout(ceiling, provider.current_position()).await {
        Ok(Ok(location)) if location.is_finite() => Ok(location),
        Ok(Ok(_)) => Err(GeolocationError::PositionUnavailable),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(GeolocationError::Timeout),
    }
}

/// Request a position and write it into the draft's coordinates
///
/// # Errors
/// As [`request_location`]; the draft is untouched on failure
pub async fn fill_draft_location(
    draft: &mut ProfileDraft,
    provider: &dyn GeolocationProvider,
    ceiling: Duration,
) -> Result<Location, GeolocationError> {
    match request_location(provider, ceiling).await {
        Ok(location) => {
            draft.set_location(location);
            tracing::debug!(lat = location.lat, lng = location.lng, "draft location filled");
            Ok(location)
        }
        Err(e) => {
            tracing::info!(error = %e, "geolocation failed");
            Err(e)
        }
    }
}

/// Provider answering with a preset result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocation(pub Result<Location, GeolocationError>);

impl FixedGeolocation {
    #[must_use]
    pub const fn at(lat: f64, lng: f64) -> Self {
        Self(Ok(Location::new(lat, lng)))
    }

    #[must_use]
    pub const fn failing(error: GeolocationError) -> Self {
        Self(Err(error))
    }
}

/// Parse `"LAT,LNG"`
impl FromStr for FixedGeolocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
        let lng: f64 = lng.trim().parse().map_err(|e| format!("longitude: {e}"))?;
        Ok(Self::at(lat, lng))
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Location, GeolocationError> {
        self.0
    }
}

/// Provider for platforms without location support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Location, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}
