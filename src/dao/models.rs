use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game record as persisted by every storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Store-assigned identifier (UUID v7, so ids sort in creation order).
    pub id: Uuid,
    /// Display title, never blank.
    pub title: String,
    /// Genre label, never blank.
    pub genre: String,
    /// Free-form release date text.
    pub release_date: Option<String>,
}

/// Validated payload for a game that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameEntity {
    /// Display title.
    pub title: String,
    /// Genre label.
    pub genre: String,
    /// Free-form release date text.
    pub release_date: Option<String>,
}

/// Set of fields replaced by an update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameChangesEntity {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement genre.
    pub genre: Option<String>,
    /// Replacement release date.
    pub release_date: Option<String>,
}

impl GameEntity {
    /// Assign a fresh identifier to a new game.
    ///
    /// Ids come from [`Uuid::now_v7`], which is monotonic within the process, so
    /// ordering records by id is the same as ordering them by insertion.
    pub fn assign_id(game: NewGameEntity) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: game.title,
            genre: game.genre,
            release_date: game.release_date,
        }
    }

    /// Overwrite every field present in `changes`.
    pub fn apply(&mut self, changes: GameChangesEntity) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(release_date) = changes.release_date {
            self.release_date = Some(release_date);
        }
    }
}

impl GameChangesEntity {
    /// Whether the update would leave the record as it is.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.genre.is_none() && self.release_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contra() -> NewGameEntity {
        NewGameEntity {
            title: "Contra".into(),
            genre: "Shoot 'em Up".into(),
            release_date: Some("February, 1987".into()),
        }
    }

    #[test]
    fn assigned_ids_follow_creation_order() {
        let first = GameEntity::assign_id(contra());
        let second = GameEntity::assign_id(contra());
        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
    }

    #[test]
    fn apply_only_replaces_provided_fields() {
        let mut game = GameEntity::assign_id(contra());
        game.apply(GameChangesEntity {
            title: Some("Super Mario Brothers".into()),
            genre: None,
            release_date: Some("September, 1985".into()),
        });

        assert_eq!(game.title, "Super Mario Brothers");
        assert_eq!(game.genre, "Shoot 'em Up");
        assert_eq!(game.release_date.as_deref(), Some("September, 1985"));
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(GameChangesEntity::default().is_empty());
        assert!(
            !GameChangesEntity {
                genre: Some("Platformer".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
