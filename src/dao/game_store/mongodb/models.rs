use mongodb::bson::{self, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{GameChangesEntity, GameEntity};

/// Shape of a document in the `games` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    title: String,
    genre: String,
    #[serde(rename = "releaseDate", default, skip_serializing_if = "Option::is_none")]
    release_date: Option<String>,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: bson_uuid(value.id),
            title: value.title,
            genre: value.genre,
            release_date: value.release_date,
        }
    }
}

impl From<MongoGameDocument> for GameEntity {
    fn from(value: MongoGameDocument) -> Self {
        Self {
            id: Uuid::from_bytes(value.id.bytes()),
            title: value.title,
            genre: value.genre,
            release_date: value.release_date,
        }
    }
}

fn bson_uuid(id: Uuid) -> bson::Uuid {
    bson::Uuid::from_bytes(id.into_bytes())
}

/// Filter matching the document with the given id (stored as a binary UUID).
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": bson_uuid(id)}
}

/// `$set` update replacing only the provided fields; `None` when nothing changes.
pub fn set_changes(changes: GameChangesEntity) -> Option<Document> {
    let mut fields = Document::new();
    if let Some(title) = changes.title {
        fields.insert("title", title);
    }
    if let Some(genre) = changes.genre {
        fields.insert("genre", genre);
    }
    if let Some(release_date) = changes.release_date {
        fields.insert("releaseDate", release_date);
    }

    if fields.is_empty() {
        None
    } else {
        Some(doc! {"$set": fields})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_keeps_the_id_bytes() {
        let entity = GameEntity {
            id: Uuid::now_v7(),
            title: "Contra".into(),
            genre: "Shoot 'em Up".into(),
            release_date: None,
        };

        let document: MongoGameDocument = entity.clone().into();
        let back: GameEntity = document.into();
        assert_eq!(back, entity);
    }

    #[test]
    fn set_changes_only_lists_provided_fields() {
        let update = set_changes(GameChangesEntity {
            title: Some("Super Mario Brothers".into()),
            genre: None,
            release_date: Some("September, 1985".into()),
        })
        .unwrap();

        let fields = update.get_document("$set").unwrap();
        assert_eq!(fields.get_str("title").unwrap(), "Super Mario Brothers");
        assert_eq!(fields.get_str("releaseDate").unwrap(), "September, 1985");
        assert!(!fields.contains_key("genre"));
    }

    #[test]
    fn set_changes_is_none_without_fields() {
        assert!(set_changes(GameChangesEntity::default()).is_none());
    }
}
