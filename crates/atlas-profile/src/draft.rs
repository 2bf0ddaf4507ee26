//! Editable profile drafts backing the admin form
//!
//! A [`ProfileDraft`] accepts raw text input keyed by form field name and
//! turns it into a [`Profile`] on submission:
//! - `socialMedia.<platform>` edits one handle
//! - `location.lat` / `location.lng` parse leniently, unparsable input is 0
//! - `interests` is comma separated; the raw text is kept for redisplay

use crate::error::ProfileError;
use crate::profile::{Location, Profile, ProfileId};
use crate::validation::{validate_profile, FieldErrors};

/// Whether the draft creates a new profile or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit(ProfileId),
}

/// Form state for one profile
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    mode: DraftMode,
    profile: Profile,
    interests_input: String,
    lat: f64,
    lng: f64,
}

impl ProfileDraft {
    /// Blank draft for a new profile with a freshly generated id
    #[must_use]
    pub fn new() -> Self {
        let profile = Profile::new(ProfileId::generate(), "")
            .with_social("twitter", "")
            .with_social("linkedin", "");
        Self {
            mode: DraftMode::Create,
            profile,
            interests_input: String::new(),
            lat: 0.0,
            lng: 0.0,
        }
    }

    /// Draft pre-filled from an existing profile
    #[must_use]
    pub fn edit(profile: &Profile) -> Self {
        let (lat, lng) = profile.location.map_or((0.0, 0.0), |loc| (loc.lat, loc.lng));
        Self {
            mode: DraftMode::Edit(profile.id.clone()),
            profile: profile.clone(),
            interests_input: profile.interests.join(", "),
            lat,
            lng,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.mode == DraftMode::Create
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProfileId {
        &self.profile.id
    }

    /// Raw interests text as typed
    #[inline]
    #[must_use]
    pub fn interests_input(&self) -> &str {
        &self.interests_input
    }

    /// Current coordinate inputs (0 when not entered)
    #[inline]
    #[must_use]
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Apply one form input
    ///
    /// # Errors
    /// Returns [`ProfileError`] for unknown or read-only field names
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), ProfileError> {
        if let Some(platform) = name.strip_prefix("socialMedia.") {
            if platform.is_empty() {
                return Err(ProfileError::EmptyPlatform);
            }
            self.profile
                .social_media
                .insert(platform.to_string(), value.to_string());
            return Ok(());
        }

        match name {
            "location.lat" => self.lat = parse_coordinate(value),
            "location.lng" => self.lng = parse_coordinate(value),
            "interests" => {
                self.interests_input = value.to_string();
                self.profile.interests = split_interests(value);
            }
            "name" => self.profile.name = value.to_string(),
            "photo" => self.profile.photo = value.to_string(),
            "description" => self.profile.description = value.to_string(),
            "address" => self.profile.address = value.to_string(),
            "email" => self.profile.email = value.to_string(),
            "phone" => self.profile.phone = value.to_string(),
            "id" => return Err(ProfileError::ReadOnlyField(name.to_string())),
            other => return Err(ProfileError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Replace both coordinates, e.g. from a device location fix
    pub fn set_location(&mut self, location: Location) {
        self.lat = location.lat;
        self.lng = location.lng;
    }

    /// Profile as it would be submitted; `(0, 0)` becomes "no location"
    #[must_use]
    pub fn to_profile(&self) -> Profile {
        let mut profile = self.profile.clone();
        let location = Location::new(self.lat, self.lng);
        profile.location = (!location.is_origin()).then_some(location);
        profile
    }

    /// Validation messages for the current input
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        validate_profile(&self.to_profile())
    }

    /// Validated profile ready for the registry
    ///
    /// # Errors
    /// Returns the field messages when validation fails
    pub fn finish(&self) -> Result<Profile, FieldErrors> {
        let profile = self.to_profile();
        let errors = validate_profile(&profile);
        if errors.is_empty() {
            Ok(profile)
        } else {
            Err(errors)
        }
    }
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Split comma separated interests, trimming and dropping empty entries
#[must_use]
pub fn split_interests(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lenient number parsing: the longest numeric prefix wins, anything else is 0
#[must_use]
pub fn parse_coordinate(input: &str) -> f64 {
    let input = input.trim();
    let end = numeric_prefix_len(input.as_bytes());

    match input[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PLACEHOLDER_PHOTO;
    use crate::validation::ProfileField;

    #[test]
    fn new_draft_defaults() {
        let draft = ProfileDraft::new();
        assert!(draft.is_new());
        let profile = draft.to_profile();
        assert_eq!(profile.photo, PLACEHOLDER_PHOTO);
        assert!(profile.location.is_none());
        assert_eq!(profile.social_media.get("twitter").map(String::as_str), Some(""));
        assert_eq!(profile.social_media.get("linkedin").map(String::as_str), Some(""));
    }

    #[test]
    fn interests_are_split_and_trimmed() {
        let mut draft = ProfileDraft::new();
        draft.set_field("interests", " Coding, ,Hiking ,Coding").unwrap();
        assert_eq!(draft.interests_input(), " Coding, ,Hiking ,Coding");
        assert_eq!(draft.to_profile().interests, vec!["Coding", "Hiking", "Coding"]);
    }

    #[test]
    fn coordinates_parse_leniently() {
        assert_eq!(parse_coordinate("41.5"), 41.5);
        assert_eq!(parse_coordinate(" -87.25abc"), -87.25);
        assert_eq!(parse_coordinate("north"), 0.0);
        assert_eq!(parse_coordinate(""), 0.0);
        assert_eq!(parse_coordinate("NaN"), 0.0);
        assert_eq!(parse_coordinate("-.5"), -0.5);
        assert_eq!(parse_coordinate("7."), 7.0);
        assert_eq!(parse_coordinate("2.5e-1km"), 0.25);
        assert_eq!(parse_coordinate("3e"), 3.0);
        assert_eq!(parse_coordinate("-"), 0.0);
        assert_eq!(parse_coordinate("."), 0.0);
        assert_eq!(parse_coordinate("1e999"), 0.0);
    }

    #[test]
    fn long_garbage_suffix_parses_once() {
        let input = format!("{}{}", "4".repeat(50_000), "x".repeat(50_000));
        assert_eq!(parse_coordinate(&input), 0.0);

        let input = format!("12.5{}", "°N".repeat(100_000));
        assert_eq!(parse_coordinate(&input), 12.5);
    }

    #[test]
    fn social_fields_are_open_ended() {
        let mut draft = ProfileDraft::new();
        draft.set_field("socialMedia.mastodon", "@jane@example.social").unwrap();
        assert_eq!(
            draft.to_profile().social_media.get("mastodon").map(String::as_str),
            Some("@jane@example.social")
        );
        assert_eq!(
            draft.set_field("socialMedia.", "x"),
            Err(ProfileError::EmptyPlatform)
        );
    }

    #[test]
    fn unknown_and_read_only_fields_are_rejected() {
        let mut draft = ProfileDraft::new();
        assert!(matches!(draft.set_field("age", "3"), Err(ProfileError::UnknownField(_))));
        assert!(matches!(draft.set_field("id", "3"), Err(ProfileError::ReadOnlyField(_))));
    }

    #[test]
    fn finish_requires_valid_input() {
        let mut draft = ProfileDraft::new();
        let errors = draft.finish().unwrap_err();
        assert!(errors.get(ProfileField::Latitude).is_some());

        draft.set_field("name", "Jane").unwrap();
        draft.set_field("email", "jane@example.com").unwrap();
        draft.set_field("address", "Boston, MA").unwrap();
        draft.set_location(Location::new(42.36, -71.06));

        let profile = draft.finish().unwrap();
        assert_eq!(profile.location, Some(Location::new(42.36, -71.06)));
    }

    #[test]
    fn edit_draft_keeps_identity() {
        let original = Profile::new("3", "Alex")
            .with_location(41.8781, -87.6298)
            .with_interests(["Marketing", "Reading"]);
        let mut draft = ProfileDraft::edit(&original);

        assert_eq!(draft.mode(), &DraftMode::Edit(original.id.clone()));
        assert_eq!(draft.interests_input(), "Marketing, Reading");
        assert_eq!(draft.coordinates(), (41.8781, -87.6298));

        draft.set_field("name", "Alexandra").unwrap();
        let edited = draft.to_profile();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.name, "Alexandra");
    }
}
