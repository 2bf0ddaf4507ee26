//! Stored representation of the profile collection

use atlas_profile::Profile;

/// Store key holding the serialized collection
pub const PROFILES_KEY: &str = "profiles";

/// Serialize the collection as a JSON array
///
/// # Errors
/// Returns the serializer error; cannot happen for finite coordinates
pub fn encode_profiles(profiles: &[Profile]) -> Result<String, serde_json::Error> {
    serde_json::to_string(profiles)
}

/// Parse a stored JSON array
///
/// # Errors
/// Returns the parser error for anything that is not a profile array
pub fn decode_profiles(text: &str) -> Result<Vec<Profile>, serde_json::Error> {
    serde_json::from_str(text)
}
