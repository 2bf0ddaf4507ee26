//! Admin authentication and guarded profile management
//!
//! [`AdminSession`] holds the logged-in state for one process and checks
//! credentials through an [`Authenticator`]. [`AdminPanel`] wraps the
//! registry's mutations so they fail with [`AppError::Unauthorized`] until
//! a login succeeds.

use crate::config::AdminConfig;
use crate::error::AppError;
use atlas_profile::{DraftMode, Profile, ProfileDraft, ProfileId};
use atlas_registry::{results_label, ProfileRegistry, SearchScope};
use parking_lot::RwLock;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Hex SHA-256 of `salt` followed by `password`
#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random 16-byte salt, hex encoded
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

/// Credential check seam
pub trait Authenticator: Send + Sync {
    /// Whether the pair is accepted
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Username plus salted password digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedCredentials {
    username: String,
    salt: String,
    digest: [u8; 32],
}

impl HashedCredentials {
    /// Build from a clear-text password
    #[must_use]
    pub fn new(username: impl Into<String>, salt: impl Into<String>, password: &str) -> Self {
        let salt = salt.into();
        let digest = Sha256::new()
            .chain_update(salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize()
            .into();
        Self {
            username: username.into(),
            salt,
            digest,
        }
    }

    /// Build from the `[admin]` section; `None` when no digest is configured
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if the digest is not 32 hex-encoded bytes
    pub fn from_config(config: &AdminConfig) -> Result<Option<Self>, AppError> {
        let Some(hex_digest) = &config.password_sha256 else {
            return Ok(None);
        };
        let mut digest = [0u8; 32];
        hex::decode_to_slice(hex_digest, &mut digest)
            .map_err(|e| AppError::Config(format!("admin.password_sha256: {e}")))?;
        Ok(Some(Self {
            username: config.username.clone(),
            salt: config.salt.clone(),
            digest,
        }))
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Authenticator for HashedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let candidate: [u8; 32] = Sha256::new()
            .chain_update(self.salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize()
            .into();
        let diff = candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        username == self.username && diff == 0
    }
}

/// Rejects every login; used when no admin password is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn verify(&self, _username: &str, _password: &str) -> bool {
        false
    }
}

/// Build the authenticator described by the `[admin]` section
///
/// # Errors
/// As [`HashedCredentials::from_config`]
pub fn authenticator_from_config(config: &AdminConfig) -> Result<Arc<dyn Authenticator>, AppError> {
    Ok(match HashedCredentials::from_config(config)? {
        Some(credentials) => Arc::new(credentials),
        None => {
            tracing::warn!("no admin password configured, admin login disabled");
            Arc::new(DenyAll)
        }
    })
}

/// Logged-in state for one process
pub struct AdminSession {
    authenticator: Arc<dyn Authenticator>,
    user: RwLock<Option<String>>,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("user", &*self.user.read())
            .finish_non_exhaustive()
    }
}

impl AdminSession {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            user: RwLock::new(None),
        }
    }

    /// Start a session
    ///
    /// # Errors
    /// Returns [`AppError::InvalidCredentials`] if the authenticator rejects
    /// the pair; an existing session is left as it was
    pub fn login(&self, username: &str, password: &str) -> Result<(), AppError> {
        if !self.authenticator.verify(username, password) {
            tracing::warn!(username, "admin login rejected");
            return Err(AppError::InvalidCredentials);
        }
        *self.user.write() = Some(username.to_string());
        tracing::info!(username, "admin logged in");
        Ok(())
    }

    /// End the session; no-op when nobody is logged in
    pub fn logout(&self) {
        if let Some(user) = self.user.write().take() {
            tracing::info!(username = %user, "admin logged out");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.user.read().clone()
    }

    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn require(&self) -> Result<(), AppError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// Profile management guarded by an admin session
#[derive(Debug, Clone)]
pub struct AdminPanel {
    registry: Arc<ProfileRegistry>,
    session: Arc<AdminSession>,
}

impl AdminPanel {
    #[must_use]
    pub fn new(registry: Arc<ProfileRegistry>, session: Arc<AdminSession>) -> Self {
        Self { registry, session }
    }

    /// Admin table rows: name or address match
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn list(&self, term: &str) -> Result<Vec<Profile>, AppError> {
        self.session.require()?;
        Ok(self.registry.search(term, SearchScope::Admin))
    }

    /// Result count line for the admin table
    #[must_use]
    pub fn results_label(&self, term: &str) -> String {
        results_label(self.registry.search(term, SearchScope::Admin).len())
    }

    /// Blank form for a new profile
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn new_draft(&self) -> Result<ProfileDraft, AppError> {
        self.session.require()?;
        Ok(ProfileDraft::new())
    }

    /// Form pre-filled from an existing profile, `None` for unknown ids
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn edit_draft(&self, id: &ProfileId) -> Result<Option<ProfileDraft>, AppError> {
        self.session.require()?;
        Ok(self.registry.get(id).map(|p| ProfileDraft::edit(&p)))
    }

    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session, or the
    /// registry's duplicate-id error
    pub fn add(&self, profile: Profile) -> Result<(), AppError> {
        self.session.require()?;
        self.registry.add(profile)?;
        Ok(())
    }

    /// Replace a profile; `false` when the id is unknown
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn update(&self, profile: Profile) -> Result<bool, AppError> {
        self.session.require()?;
        Ok(self.registry.update(profile))
    }

    /// Delete a profile; `false` when the id is unknown
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session
    pub fn delete(&self, id: &ProfileId) -> Result<bool, AppError> {
        self.session.require()?;
        Ok(self.registry.remove(id))
    }

    /// Validate a form and add or update accordingly
    ///
    /// # Errors
    /// Returns [`AppError::Unauthorized`] without a session,
    /// [`AppError::Validation`] with the field messages when the draft is
    /// invalid, or the registry's duplicate-id error for a new draft
    pub fn submit(&self, draft: &ProfileDraft) -> Result<ProfileId, AppError> {
        self.session.require()?;
        let profile = draft.finish().map_err(AppError::Validation)?;
        let id = profile.id.clone();
        match draft.mode() {
            DraftMode::Create => self.registry.add(profile)?,
            DraftMode::Edit(_) => {
                if !self.registry.update(profile) {
                    tracing::warn!(%id, "edited profile no longer exists");
                }
            }
        }
        Ok(id)
    }
}
