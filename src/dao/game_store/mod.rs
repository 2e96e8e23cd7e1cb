#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameChangesEntity, GameEntity, NewGameEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the document database holding the game collection.
///
/// Every implementation returns [`GameStore::list_games`] in insertion order and
/// never hands out an id twice, even after the record holding it is deleted.
pub trait GameStore: Send + Sync {
    /// Persist a new game under a fresh id and return the stored record.
    fn insert_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<GameEntity>>;
    /// Every stored game, oldest first.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Look a game up by id; `None` when it does not exist.
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Replace the provided fields of a game and return the updated record, or `None`
    /// when no game has this id.
    fn update_game(
        &self,
        id: Uuid,
        changes: GameChangesEntity,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Remove a game; `false` when no game has this id.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
