//! Integration tests against a live MongoDB.
//!
//! Run with `cargo test --test mongo_store -- --ignored`; `MONGO_URI` defaults to a local server.
//! Each test works in its own database, dropped once the test is done.
#![cfg(feature = "mongo-store")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use game_catalog_back::{
    dao::{
        game_store::{
            GameStore,
            mongodb::{MongoConfig, MongoGameStore},
        },
        models::{GameChangesEntity, NewGameEntity},
    },
    routes,
    state::AppState,
};

fn mongo_uri() -> String {
    std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into())
}

/// Store bound to a fresh database, plus the name needed to drop it.
async fn fresh_store() -> (MongoGameStore, String) {
    let database = format!("game_catalog_test_{}", Uuid::now_v7().simple());
    let config = MongoConfig::from_uri(&mongo_uri(), Some(&database))
        .await
        .unwrap();
    (MongoGameStore::connect(config).await.unwrap(), database)
}

async fn drop_database(name: &str) {
    let client = mongodb::Client::with_uri_str(mongo_uri()).await.unwrap();
    client.database(name).drop().await.unwrap();
}

fn contra() -> NewGameEntity {
    NewGameEntity {
        title: "Contra".into(),
        genre: "Shoot 'em Up".into(),
        release_date: Some("February, 1987".into()),
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn mongo_store_round_trips_games_in_insertion_order() {
    let (store, database) = fresh_store().await;

    let titles = ["Contra", "Gradius", "R-Type"];
    let mut inserted = Vec::new();
    for title in titles {
        let game = GameStore::insert_game(
            &store,
            NewGameEntity {
                title: title.into(),
                ..contra()
            },
        )
        .await
        .unwrap();
        inserted.push(game);
    }

    let listed = GameStore::list_games(&store).await.unwrap();
    assert_eq!(listed, inserted);

    let found = GameStore::find_game(&store, inserted[1].id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&inserted[1]));

    drop_database(&database).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn mongo_store_updates_and_deletes_by_id() {
    let (store, database) = fresh_store().await;
    let game = GameStore::insert_game(&store, contra()).await.unwrap();

    let updated = GameStore::update_game(
        &store,
        game.id,
        GameChangesEntity {
            title: Some("Super Mario Brothers".into()),
            genre: None,
            release_date: Some("September, 1985".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Super Mario Brothers");
    assert_eq!(updated.genre, "Shoot 'em Up");
    assert_eq!(updated.release_date.as_deref(), Some("September, 1985"));

    let unknown = GameStore::update_game(&store, Uuid::now_v7(), GameChangesEntity::default())
        .await
        .unwrap();
    assert!(unknown.is_none());

    assert!(GameStore::delete_game(&store, game.id).await.unwrap());
    assert!(!GameStore::delete_game(&store, game.id).await.unwrap());
    assert!(GameStore::find_game(&store, game.id).await.unwrap().is_none());

    drop_database(&database).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn mongo_store_keeps_serving_after_reconnect() {
    let (store, database) = fresh_store().await;
    let game = GameStore::insert_game(&store, contra()).await.unwrap();

    GameStore::try_reconnect(&store).await.unwrap();
    GameStore::health_check(&store).await.unwrap();
    assert_eq!(GameStore::list_games(&store).await.unwrap(), vec![game]);

    drop_database(&database).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn mongo_backed_api_serves_the_contra_scenario() {
    let (store, database) = fresh_store().await;
    let app = routes::router(AppState::with_store(Arc::new(store)));

    let call = |method: Method, uri: String, body: Option<Value>| {
        let app = app.clone();
        async move {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => builder.body(Body::empty()),
            }
            .unwrap();
            let response = app.oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            (status, bytes)
        }
    };

    let payload = json!({"title": "Contra", "genre": "Shoot 'em Up", "releaseDate": "February, 1987"});
    let (status, bytes) = call(Method::POST, "/api/game/create".into(), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    let id = created["id"].as_str().unwrap().to_owned();

    let (_, bytes) = call(Method::GET, "/api/game/get".into(), None).await;
    let games: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(games, json!([created]));

    let update = json!({"id": id, "title": "Super Mario Brothers", "releaseDate": "September, 1985"});
    let (status, bytes) = call(Method::PUT, "/api/game/update".into(), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated["title"], "Super Mario Brothers");
    assert_eq!(updated["releaseDate"], "September, 1985");

    let (status, bytes) = call(Method::DELETE, format!("/api/game/destroy/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"success".as_slice());

    let (status, _) = call(Method::GET, format!("/api/game/get/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop_database(&database).await;
}
