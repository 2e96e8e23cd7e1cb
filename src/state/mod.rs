use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{dao::game_store::GameStore, error::ServiceError};

/// Reference-counted handle to [`AppState`] passed to handlers and background tasks.
pub type SharedState = Arc<AppState>;

/// Central application state holding the storage backend shared by every request.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new() -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    /// Build a state with `store` already installed.
    pub fn with_store(store: Arc<dyn GameStore>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(false);
        Arc::new(Self {
            game_store: RwLock::new(Some(store)),
            degraded: degraded_tx,
        })
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Current game store, or [`ServiceError::Degraded`] when none is installed.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current game store and enter degraded mode.
    pub async fn clear_game_store(&self) {
        {
            let mut guard = self.game_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::game_store::memory::InMemoryGameStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new();
        assert!(state.is_degraded());
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));

        state
            .set_game_store(Arc::new(InMemoryGameStore::new()))
            .await;
        assert!(!state.is_degraded());
        assert!(state.require_game_store().await.is_ok());
    }

    #[tokio::test]
    async fn clearing_the_store_notifies_watchers() {
        let state = AppState::with_store(Arc::new(InMemoryGameStore::new()));
        let mut watcher = state.degraded_watcher();
        assert!(!*watcher.borrow_and_update());

        state.clear_game_store().await;
        assert!(watcher.has_changed().unwrap());
        assert!(*watcher.borrow_and_update());
        assert!(state.game_store().await.is_none());
    }

    #[test]
    fn unchanged_flag_is_not_broadcast() {
        let state = AppState::new();
        let watcher = state.degraded_watcher();
        state.update_degraded(true);
        assert!(!watcher.has_changed().unwrap());
    }
}
