//! Profile records
//!
//! The JSON shape of [`Profile`] is the stored format: camelCase keys, an
//! optional `location` object and an ordered `socialMedia` map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use uuid::Uuid;

/// Photo reference used when a profile has no picture of its own
pub const PLACEHOLDER_PHOTO: &str = "/placeholder.svg?height=150&width=150";

/// Ordered platform name -> handle mapping
pub type SocialHandles = IndexMap<String, String>;

/// Stable profile identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (UUID v4)
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProfileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProfileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, -90..=90
    pub lat: f64,
    /// Longitude, -180..=180
    pub lng: f64,
}

impl Location {
    /// Create a coordinate pair
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `(0, 0)`, historically used to mean "no location entered"
    #[inline]
    #[must_use]
    pub fn is_origin(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Both components are finite numbers
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Latitude within -90..=90
    #[inline]
    #[must_use]
    pub fn lat_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
    }

    /// Longitude within -180..=180
    #[inline]
    #[must_use]
    pub fn lng_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng)
    }

    /// A location that can be placed on a map
    #[inline]
    #[must_use]
    pub fn is_plottable(&self) -> bool {
        self.is_finite() && !self.is_origin()
    }
}

/// One directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub social_media: SocialHandles,
}

fn default_photo() -> String {
    PLACEHOLDER_PHOTO.to_string()
}

impl Profile {
    /// Create a profile with the given id and name, every other field empty
    #[must_use]
    pub fn new(id: impl Into<ProfileId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            photo: default_photo(),
            description: String::new(),
            location: None,
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            interests: Vec::new(),
            social_media: SocialHandles::new(),
        }
    }

    /// With location
    #[inline]
    #[must_use]
    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(Location::new(lat, lng));
        self
    }

    /// With address
    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// With email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With phone
    #[inline]
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// With interests
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Add a social media handle
    #[must_use]
    pub fn with_social(mut self, platform: impl Into<String>, handle: impl Into<String>) -> Self {
        self.social_media.insert(platform.into(), handle.into());
        self
    }

    /// Location if it can be shown on a map
    #[inline]
    #[must_use]
    pub fn plottable_location(&self) -> Option<Location> {
        self.location.filter(Location::is_plottable)
    }

    /// Drop a location that JSON cannot represent (NaN or infinite)
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.location.is_some_and(|loc| !loc.is_finite()) {
            self.location = None;
        }
        self
    }

    /// Case-insensitive substring match against the given fields
    #[must_use]
    pub fn matches(&self, needle: &str, fields: &[SearchField]) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        fields.iter().any(|field| {
            let haystack = match field {
                SearchField::Name => &self.name,
                SearchField::Address => &self.address,
                SearchField::Description => &self.description,
            };
            haystack.to_lowercase().contains(&needle)
        })
    }
}

/// Text fields that search filters look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Address,
    Description,
}
