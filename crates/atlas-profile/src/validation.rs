//! Form-level validation
//!
//! Validation never fails with an error type. It produces a [`FieldErrors`]
//! map of field -> message that the form displays inline; an empty map means
//! the record may be submitted.

use crate::profile::Profile;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    Name,
    Email,
    Address,
    Latitude,
    Longitude,
}

impl ProfileField {
    /// Form field name as used by [`crate::ProfileDraft::set_field`]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::Latitude => "location.lat",
            Self::Longitude => "location.lng",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<ProfileField, String>,
}

impl FieldErrors {
    /// Create empty error map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, keeping the first one reported for a field
    pub fn insert(&mut self, field: ProfileField, message: impl Into<String>) {
        self.entries.entry(field).or_insert_with(|| message.into());
    }

    /// Message for a field
    #[must_use]
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate in field order
    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Loose email shape check: something, `@`, something, `.`, something
#[inline]
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate a profile as submitted from the admin form
#[must_use]
pub fn validate_profile(profile: &Profile) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if profile.name.trim().is_empty() {
        errors.insert(ProfileField::Name, "Name is required");
    }

    if profile.email.trim().is_empty() {
        errors.insert(ProfileField::Email, "Email is required");
    } else if !is_valid_email(&profile.email) {
        errors.insert(ProfileField::Email, "Email is invalid");
    }

    if profile.address.trim().is_empty() {
        errors.insert(ProfileField::Address, "Address is required");
    }

    match profile.location {
        None => errors.insert(ProfileField::Latitude, "Location coordinates are required"),
        Some(loc) if loc.is_origin() => {
            errors.insert(ProfileField::Latitude, "Location coordinates are required");
        }
        Some(loc) => {
            if !loc.lat.is_finite() || !loc.lat_in_range() {
                errors.insert(ProfileField::Latitude, "Latitude must be between -90 and 90");
            }
            if !loc.lng.is_finite() || !loc.lng_in_range() {
                errors.insert(ProfileField::Longitude, "Longitude must be between -180 and 180");
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Profile {
        Profile::new("1", "Jane")
            .with_email("jane@example.com")
            .with_address("Boston, MA")
            .with_location(42.36, -71.06)
    }

    #[test]
    fn complete_profile_passes() {
        assert!(validate_profile(&valid()).is_empty());
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let mut profile = valid();
        profile.name = "   ".into();
        profile.email = String::new();
        profile.address = String::new();

        let errors = validate_profile(&profile);
        assert_eq!(errors.get(ProfileField::Name), Some("Name is required"));
        assert_eq!(errors.get(ProfileField::Email), Some("Email is required"));
        assert_eq!(errors.get(ProfileField::Address), Some("Address is required"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn malformed_email_is_reported() {
        let profile = valid().with_email("jane.example.com");
        let errors = validate_profile(&profile);
        assert_eq!(errors.get(ProfileField::Email), Some("Email is invalid"));
    }

    #[test]
    fn origin_counts_as_missing_location() {
        let profile = valid().with_location(0.0, 0.0);
        let errors = validate_profile(&profile);
        assert_eq!(
            errors.get(ProfileField::Latitude),
            Some("Location coordinates are required")
        );
    }

    #[test]
    fn out_of_range_coordinates_are_reported_per_axis() {
        let profile = valid().with_location(95.0, -200.0);
        let errors = validate_profile(&profile);
        assert!(errors.get(ProfileField::Latitude).is_some());
        assert!(errors.get(ProfileField::Longitude).is_some());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.insert(ProfileField::Name, "Name is required");
        errors.insert(ProfileField::Email, "Email is required");
        assert_eq!(
            errors.to_string(),
            "name: Name is required; email: Email is required"
        );
    }
}
