//! Error types for profile drafts

/// Profile draft errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Form field name is not part of the profile form
    #[error("unknown form field: {0}")]
    UnknownField(String),

    /// Field exists but cannot be edited through the form
    #[error("field is read-only: {0}")]
    ReadOnlyField(String),

    /// Social media platform name is empty
    #[error("social media platform name is empty")]
    EmptyPlatform,
}
