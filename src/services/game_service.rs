use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::game::{CreateGameRequest, GameResponse, UpdateGameRequest},
    error::ServiceError,
    state::SharedState,
};

/// Validate and persist a new game.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let new_game = request.into_new_game()?;
    let store = state.require_game_store().await?;

    let game = store.insert_game(new_game).await.inspect_err(|err| {
        warn!(error = %err, "failed to insert game");
    })?;

    info!(id = %game.id, title = %game.title, "game created");
    Ok(game.into())
}

/// Every stored game, in insertion order.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameResponse>, ServiceError> {
    let store = state.require_game_store().await?;
    let games = store.list_games().await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Fetch a single game by its identifier.
pub async fn get_game(state: &SharedState, id: &str) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(id)?;
    let store = state.require_game_store().await?;

    store
        .find_game(id)
        .await?
        .map(Into::into)
        .ok_or_else(|| not_found(id))
}

/// Replace the fields provided in the request on an existing game.
pub async fn update_game(
    state: &SharedState,
    request: UpdateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let (id, changes) = request.into_changes()?;
    let id = parse_game_id(&id)?;
    let store = state.require_game_store().await?;

    let Some(game) = store.update_game(id, changes).await? else {
        return Err(not_found(id));
    };

    info!(%id, "game updated");
    Ok(game.into())
}

/// Remove a game; a second deletion of the same id reports not found.
pub async fn delete_game(state: &SharedState, id: &str) -> Result<(), ServiceError> {
    let id = parse_game_id(id)?;
    let store = state.require_game_store().await?;

    if store.delete_game(id).await? {
        info!(%id, "game deleted");
        Ok(())
    } else {
        Err(not_found(id))
    }
}

/// Ids that are not UUIDs cannot name a stored game, so they are reported as not found.
fn parse_game_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ServiceError::NotFound(format!("game `{raw}` not found")))
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("game `{id}` not found"))
}
