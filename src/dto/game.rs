use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{GameChangesEntity, GameEntity, NewGameEntity},
    dto::validation::{check_text, require_text},
};

/// Payload accepted by `POST /api/game/create`.
///
/// Fields are optional at the serde level so a missing `title` or `genre` is
/// reported through validation instead of a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[schema(value_type = String)]
    pub title: Option<String>,
    #[schema(value_type = String)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "title", self.title.as_deref());
        require_text(&mut errors, "genre", self.genre.as_deref());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl CreateGameRequest {
    /// Validate the payload and turn it into a game ready to be stored.
    pub fn into_new_game(self) -> Result<NewGameEntity, ValidationErrors> {
        self.validate()?;
        let CreateGameRequest {
            title,
            genre,
            release_date,
        } = self;

        Ok(NewGameEntity {
            title: title.unwrap_or_default(),
            genre: genre.unwrap_or_default(),
            release_date,
        })
    }
}

/// Payload accepted by `PUT /api/game/update`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    /// Identifier of the game to update (`_id` is accepted as well).
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Validate for UpdateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "title", self.title.as_deref());
        check_text(&mut errors, "genre", self.genre.as_deref());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateGameRequest {
    /// Validate the payload and split it into the target id and the replaced fields.
    pub fn into_changes(self) -> Result<(String, GameChangesEntity), ValidationErrors> {
        self.validate()?;
        let UpdateGameRequest {
            id,
            title,
            genre,
            release_date,
        } = self;

        Ok((
            id,
            GameChangesEntity {
                title,
                genre,
                release_date,
            },
        ))
    }
}

/// Game as returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl From<GameEntity> for GameResponse {
    fn from(game: GameEntity) -> Self {
        Self {
            id: game.id,
            title: game.title,
            genre: game.genre,
            release_date: game.release_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(value: serde_json::Value) -> CreateGameRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn complete_create_request_is_accepted_verbatim() {
        let game = create_request(json!({
            "title": "Contra",
            "genre": "Shoot 'em Up",
            "releaseDate": "February, 1987",
        }))
        .into_new_game()
        .unwrap();

        assert_eq!(game.title, "Contra");
        assert_eq!(game.genre, "Shoot 'em Up");
        assert_eq!(game.release_date.as_deref(), Some("February, 1987"));
    }

    #[test]
    fn create_request_without_genre_is_rejected() {
        let errors = create_request(json!({
            "title": "Contra",
            "releaseDate": "February, 1987",
        }))
        .into_new_game()
        .unwrap_err();

        assert!(errors.field_errors().contains_key("genre"));
        assert!(!errors.field_errors().contains_key("title"));
    }

    #[test]
    fn create_request_with_blank_title_is_rejected() {
        let result = create_request(json!({"title": "   ", "genre": "Platformer"})).into_new_game();
        assert!(result.is_err());
    }

    #[test]
    fn release_date_is_optional() {
        let game = create_request(json!({"title": "Tetris", "genre": "Puzzle"}))
            .into_new_game()
            .unwrap();
        assert!(game.release_date.is_none());
    }

    #[test]
    fn update_request_accepts_underscore_id_and_partial_fields() {
        let request: UpdateGameRequest = serde_json::from_value(json!({
            "_id": "0192f0c4-7f6e-7cc2-9d1e-3b4f5a6b7c8d",
            "title": "Super Mario Brothers",
            "releaseDate": "September, 1985",
        }))
        .unwrap();

        let (id, changes) = request.into_changes().unwrap();
        assert_eq!(id, "0192f0c4-7f6e-7cc2-9d1e-3b4f5a6b7c8d");
        assert_eq!(changes.title.as_deref(), Some("Super Mario Brothers"));
        assert!(changes.genre.is_none());
        assert_eq!(changes.release_date.as_deref(), Some("September, 1985"));
    }

    #[test]
    fn update_request_cannot_blank_the_genre() {
        let request: UpdateGameRequest =
            serde_json::from_value(json!({"id": "whatever", "genre": ""})).unwrap();
        assert!(request.into_changes().is_err());
    }

    #[test]
    fn update_request_requires_an_id() {
        let result = serde_json::from_value::<UpdateGameRequest>(json!({"title": "Contra"}));
        assert!(result.is_err());
    }

    #[test]
    fn response_uses_camel_case_and_hides_missing_release_date() {
        let id = Uuid::now_v7();
        let value = serde_json::to_value(GameResponse {
            id,
            title: "Tetris".into(),
            genre: "Puzzle".into(),
            release_date: None,
        })
        .unwrap();

        assert_eq!(value, json!({"id": id, "title": "Tetris", "genre": "Puzzle"}));

        let with_date = serde_json::to_value(GameResponse {
            id,
            title: "Contra".into(),
            genre: "Shoot 'em Up".into(),
            release_date: Some("February, 1987".into()),
        })
        .unwrap();
        assert_eq!(with_date["releaseDate"], "February, 1987");
    }
}
