//! Process-local game store used by tests and by `STORAGE_BACKEND=memory` runs.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::{GameChangesEntity, GameEntity, NewGameEntity},
    storage::StorageResult,
};

/// Game store keeping records in an insertion-ordered map.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<RwLock<IndexMap<Uuid, GameEntity>>>,
}

impl InMemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert_game(&self, game: NewGameEntity) -> GameEntity {
        let mut games = self.games.write().await;
        // Ids are minted under the lock so map order matches id order.
        let game = GameEntity::assign_id(game);
        games.insert(game.id, game.clone());
        game
    }

    async fn update_game(&self, id: Uuid, changes: GameChangesEntity) -> Option<GameEntity> {
        let mut games = self.games.write().await;
        let game = games.get_mut(&id)?;
        game.apply(changes);
        Some(game.clone())
    }

    async fn delete_game(&self, id: Uuid) -> bool {
        let mut games = self.games.write().await;
        // shift_remove keeps the remaining entries in insertion order.
        games.shift_remove(&id).is_some()
    }
}

impl GameStore for InMemoryGameStore {
    fn insert_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.insert_game(game).await) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let games = store.games.read().await;
            Ok(games.values().cloned().collect())
        })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let games = store.games.read().await;
            Ok(games.get(&id).cloned())
        })
    }

    fn update_game(
        &self,
        id: Uuid,
        changes: GameChangesEntity,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.update_game(id, changes).await) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.delete_game(id).await) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
