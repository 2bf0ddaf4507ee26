//! Application routes and the navigation collaborator

use atlas_profile::ProfileId;

/// Addressable views
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Profile list with the map, `/`
    Directory,
    /// Admin panel, `/admin`
    Admin,
    /// One profile, `/profile/{id}`
    ProfileDetail(ProfileId),
}

impl Route {
    /// URL path for the route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Directory => "/".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::ProfileDetail(id) => format!("/profile/{id}"),
        }
    }

    /// Parse a URL path; trailing slashes are ignored
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Directory),
            "/admin" => Some(Self::Admin),
            _ => {
                let id = trimmed.strip_prefix("/profile/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Self::ProfileDetail(ProfileId::from(id)))
                }
            }
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Something that can switch the visible view
pub trait Navigator: Send + Sync {
    /// Show `route`
    fn navigate(&self, route: Route);
}
