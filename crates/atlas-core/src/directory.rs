//! Application wiring
//!
//! [`ProfileDirectory`] opens the configured store, loads the registry, and
//! hands out the views built on top of it: the map, the admin panel and the
//! route resolver.

use crate::admin::{authenticator_from_config, AdminPanel, AdminSession};
use crate::config::AppConfig;
use crate::error::AppError;
use atlas_map::{DetailMap, MapSurface, MapView, Navigator, Route};
use atlas_profile::{Profile, ProfileId};
use atlas_registry::{results_label, LoadOutcome, ProfileRegistry, SearchScope, PROFILES_KEY};
use atlas_store::{ProfileStore, StoreChange};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// What a path resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The directory list and map
    Directory,
    /// The admin panel; only reachable with a session
    Admin,
    /// One profile's page
    Profile(Profile),
    /// Path not shown; go here instead
    Redirect(Route),
}

/// The running application
#[derive(Debug)]
pub struct ProfileDirectory {
    config: AppConfig,
    store: Arc<dyn ProfileStore>,
    registry: Arc<ProfileRegistry>,
    session: Arc<AdminSession>,
    load_outcome: LoadOutcome,
}

impl ProfileDirectory {
    /// Open the store named by the configuration and load the registry
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if the configuration is inconsistent
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let store = config.storage.open();
        Self::with_store(config, store)
    }

    /// Like [`Self::open`] with an explicit store
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if the configuration is inconsistent
    pub fn with_store(config: AppConfig, store: Arc<dyn ProfileStore>) -> Result<Self, AppError> {
        config.validate()?;
        let authenticator = authenticator_from_config(&config.admin)?;

        let registry = Arc::new(ProfileRegistry::new(Arc::clone(&store)));
        let load_outcome = registry.load();
        tracing::info!(
            backend = ?config.storage.backend,
            profiles = registry.len(),
            ?load_outcome,
            "profile directory opened"
        );

        Ok(Self {
            config,
            store,
            registry,
            session: Arc::new(AdminSession::new(authenticator)),
            load_outcome,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ProfileRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn session(&self) -> &Arc<AdminSession> {
        &self.session
    }

    /// How the registry got its contents at startup
    #[must_use]
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Admin panel sharing this directory's session
    #[must_use]
    pub fn admin_panel(&self) -> AdminPanel {
        AdminPanel::new(Arc::clone(&self.registry), Arc::clone(&self.session))
    }

    /// Bind a map surface to the registry
    ///
    /// # Errors
    /// Returns [`AppError::Map`] if the map configuration is invalid
    pub fn attach_map(
        &self,
        surface: Box<dyn MapSurface>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Arc<MapView>, AppError> {
        Ok(MapView::attach(
            Arc::clone(&self.registry),
            surface,
            navigator,
            self.config.map,
        )?)
    }

    /// Render the detail-page map for a profile
    pub fn render_detail_map(&self, profile: &Profile, surface: &mut dyn MapSurface) -> Option<DetailMap> {
        DetailMap::render(profile, &self.config.map, surface)
    }

    // ========== Views ==========

    /// Directory list rows: name, address or description match
    #[must_use]
    pub fn list(&self, term: &str) -> Vec<Profile> {
        self.registry.search(term, SearchScope::Directory)
    }

    /// Result count line for the directory list
    #[must_use]
    pub fn results_label(&self, term: &str) -> String {
        results_label(self.list(term).len())
    }

    /// Select a profile from the list
    pub fn select(&self, id: Option<ProfileId>) {
        self.registry.select(id);
    }

    /// Resolve a path; unknown paths, unknown profiles and the admin page
    /// without a session all redirect to `/`
    #[must_use]
    pub fn resolve_route(&self, path: &str) -> Resolved {
        match Route::parse(path) {
            Some(Route::Directory) => Resolved::Directory,
            Some(Route::Admin) if self.session.is_authenticated() => Resolved::Admin,
            Some(Route::ProfileDetail(id)) => match self.registry.get(&id) {
                Some(profile) => Resolved::Profile(profile),
                None => {
                    tracing::debug!(%id, "profile page for unknown id, redirecting");
                    Resolved::Redirect(Route::Directory)
                }
            },
            Some(Route::Admin) | None => Resolved::Redirect(Route::Directory),
        }
    }

    /// Follow writes made to the store through other handles
    ///
    /// Each change to the profiles key triggers [`ProfileRegistry::reload`].
    /// Returns `None` when the store has no change feed. Must be called from
    /// within a tokio runtime.
    #[must_use]
    pub fn watch_store(&self) -> Option<JoinHandle<()>> {
        let changes = self.store.subscribe()?;
        let registry = Arc::clone(&self.registry);
        Some(tokio::spawn(follow_changes(registry, changes)))
    }
}

async fn follow_changes(
    registry: Arc<ProfileRegistry>,
    mut changes: tokio::sync::broadcast::Receiver<StoreChange>,
) {
    loop {
        match changes.recv().await {
            Ok(change) if change.key != PROFILES_KEY => {}
            Ok(_) | Err(RecvError::Lagged(_)) => {
                if let Err(e) = registry.reload() {
                    tracing::warn!(error = %e, "reload after store change failed");
                }
            }
            Err(RecvError::Closed) => break,
        }
    }
    tracing::debug!("store change feed closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_store::MemoryStore;

    fn directory() -> ProfileDirectory {
        let config = AppConfig::new()
            .in_memory()
            .with_admin_password("admin", "salt", "password123");
        ProfileDirectory::open(config).unwrap()
    }

    #[test]
    fn opens_with_samples() {
        let dir = directory();
        assert_eq!(dir.registry().len(), 8);
        assert!(matches!(dir.load_outcome(), LoadOutcome::Seeded { .. }));
        assert_eq!(dir.results_label(""), "8 profiles found");
        assert_eq!(dir.results_label("chicago"), "1 profile found");
    }

    #[test]
    fn routes_resolve_or_redirect() {
        let dir = directory();
        assert_eq!(dir.resolve_route("/"), Resolved::Directory);
        assert!(matches!(dir.resolve_route("/profile/3"), Resolved::Profile(p) if p.id.as_str() == "3"));
        assert_eq!(
            dir.resolve_route("/profile/404"),
            Resolved::Redirect(Route::Directory)
        );
        assert_eq!(dir.resolve_route("/nope"), Resolved::Redirect(Route::Directory));

        assert_eq!(dir.resolve_route("/admin"), Resolved::Redirect(Route::Directory));
        dir.session().login("admin", "password123").unwrap();
        assert_eq!(dir.resolve_route("/admin"), Resolved::Admin);
    }

    #[test]
    fn explicit_store_is_used() {
        let store: Arc<dyn ProfileStore> = Arc::new(MemoryStore::with_entry(PROFILES_KEY, "[]"));
        let dir = ProfileDirectory::with_store(AppConfig::new(), store).unwrap();
        assert!(dir.registry().is_empty());
        assert_eq!(dir.load_outcome(), LoadOutcome::Restored { count: 0 });
    }
}
