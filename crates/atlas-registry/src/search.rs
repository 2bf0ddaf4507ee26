//! Search filtering for list views

use atlas_profile::{Profile, SearchField};

/// Which view is searching; each looks at different fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Public directory list: name, address, description
    #[default]
    Directory,
    /// Admin table: name, address
    Admin,
}

impl SearchScope {
    /// Fields matched in this scope
    #[must_use]
    pub const fn fields(&self) -> &'static [SearchField] {
        match self {
            Self::Directory => &[SearchField::Name, SearchField::Address, SearchField::Description],
            Self::Admin => &[SearchField::Name, SearchField::Address],
        }
    }
}

/// Profiles matching `term` (case-insensitive substring), in collection order
#[must_use]
pub fn filter_profiles<'a>(profiles: &'a [Profile], term: &str, scope: SearchScope) -> Vec<&'a Profile> {
    let fields = scope.fields();
    profiles.iter().filter(|p| p.matches(term, fields)).collect()
}

/// "1 profile found" / "N profiles found"
#[must_use]
pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 profile found".to_string()
    } else {
        format!("{count} profiles found")
    }
}
