use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{delete, get, post, put},
};

use crate::{
    dto::game::{CreateGameRequest, GameResponse, UpdateGameRequest},
    error::{AppError, ErrorBody},
    services::game_service,
    state::SharedState,
};

/// Body returned by a successful deletion.
const DELETE_SUCCESS_BODY: &str = "success";

/// Routes exposing CRUD operations on the game collection.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/game/create", post(create_game))
        .route("/api/game/get", get(list_games))
        .route("/api/game/get/{id}", get(get_game))
        .route("/api/game/update", put(update_game))
        .route("/api/game/destroy/{id}", delete(delete_game))
}

/// Create a game from a title, a genre and an optional release date.
#[utoipa::path(
    post,
    path = "/api/game/create",
    tag = "game",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameResponse),
        (status = 422, description = "Missing or blank title/genre", body = ErrorBody)
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(game_service::create_game(&state, payload).await?))
}

/// List every game, oldest first.
#[utoipa::path(
    get,
    path = "/api/game/get",
    tag = "game",
    responses((status = 200, description = "All games in insertion order", body = [GameResponse]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

/// Retrieve a game by its ID.
#[utoipa::path(
    get,
    path = "/api/game/get/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game to retrieve")),
    responses(
        (status = 200, description = "Game", body = GameResponse),
        (status = 404, description = "No game with this id", body = ErrorBody)
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::get_game(&state, &id).await?))
}

/// Replace the provided fields of the game named by `id`.
#[utoipa::path(
    put,
    path = "/api/game/update",
    tag = "game",
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 404, description = "No game with this id", body = ErrorBody),
        (status = 422, description = "Missing id or blank title/genre", body = ErrorBody)
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateGameRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(game_service::update_game(&state, payload).await?))
}

/// Delete a game by its identifier.
#[utoipa::path(
    delete,
    path = "/api/game/destroy/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game to delete")),
    responses(
        (status = 200, description = "Game deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "No game with this id", body = ErrorBody)
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<&'static str, AppError> {
    game_service::delete_game(&state, &id).await?;
    Ok(DELETE_SUCCESS_BODY)
}
