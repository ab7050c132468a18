/// Token registry for logged-in users.
pub mod sessions;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::roster_store::RosterStore, error::ServiceError};

pub use self::sessions::{Session, SessionRegistry, SessionUser};

/// Handle to [`AppState`] given to every handler.
pub type SharedState = Arc<AppState>;

/// Central application state storing the storage handle and the session registry.
pub struct AppState {
    roster_store: RwLock<Option<Arc<dyn RosterStore>>>,
    sessions: SessionRegistry,
    config: AppConfig,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            roster_store: RwLock::new(None),
            sessions: SessionRegistry::new(config.session.ttl()),
            config,
            degraded: degraded_tx,
        })
    }

    /// Build a state that is immediately backed by `store`.
    pub async fn with_store(config: AppConfig, store: Arc<dyn RosterStore>) -> SharedState {
        let state = Self::new(config);
        state.set_roster_store(store).await;
        state
    }

    /// Obtain a handle to the current roster store, if one is installed.
    pub async fn roster_store(&self) -> Option<Arc<dyn RosterStore>> {
        let guard = self.roster_store.read().await;
        guard.as_ref().cloned()
    }

    /// Same as [`AppState::roster_store`] but fails with [`ServiceError::Degraded`] when
    /// storage is not available.
    pub async fn require_roster_store(&self) -> Result<Arc<dyn RosterStore>, ServiceError> {
        let flagged = *self.degraded.borrow();
        if flagged {
            return Err(ServiceError::Degraded);
        }
        self.roster_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new roster store implementation and leave degraded mode.
    pub async fn set_roster_store(&self, store: Arc<dyn RosterStore>) {
        {
            let mut guard = self.roster_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current roster store and enter degraded mode.
    pub async fn clear_roster_store(&self) {
        {
            let mut guard = self.roster_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let flagged = *self.degraded.borrow();
        flagged || self.roster_store.read().await.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Token to user map of logged-in staff.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Runtime configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
