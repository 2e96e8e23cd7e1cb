//! Game catalog binary entrypoint wiring the REST routes to the configured game store.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_catalog_back::{
    config::{AppConfig, StorageBackend},
    dao::{
        game_store::{GameStore, memory::InMemoryGameStore},
        storage::StorageError,
    },
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new();

    spawn_storage(&config, app_state.clone()).await?;
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, storage = ?config.storage, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the configured game store, connecting remote backends in the background.
async fn spawn_storage(config: &AppConfig, state: SharedState) -> anyhow::Result<()> {
    match config.storage {
        StorageBackend::Memory => {
            state
                .set_game_store(Arc::new(InMemoryGameStore::new()))
                .await;
            Ok(())
        }
        StorageBackend::Mongo => spawn_mongo(config, state),
        StorageBackend::Couch => spawn_couch(config, state),
    }
}

#[cfg(feature = "mongo-store")]
fn spawn_mongo(config: &AppConfig, state: SharedState) -> anyhow::Result<()> {
    use game_catalog_back::dao::game_store::mongodb::{MongoConfig, MongoGameStore};

    let settings = config.mongo.clone();
    tokio::spawn(storage_supervisor::run(state, move || {
        let settings = settings.clone();
        async move {
            let config = MongoConfig::from_uri(&settings.uri, Some(&settings.database)).await?;
            let store = MongoGameStore::connect(config).await?;
            Ok::<Arc<dyn GameStore>, StorageError>(Arc::new(store))
        }
    }));
    Ok(())
}

#[cfg(not(feature = "mongo-store"))]
fn spawn_mongo(_config: &AppConfig, _state: SharedState) -> anyhow::Result<()> {
    anyhow::bail!("MongoDB storage selected but the `mongo-store` feature is disabled")
}

#[cfg(feature = "couch-store")]
fn spawn_couch(config: &AppConfig, state: SharedState) -> anyhow::Result<()> {
    use game_catalog_back::dao::game_store::couchdb::{CouchConfig, CouchGameStore};

    let settings = config.couch.clone();
    tokio::spawn(storage_supervisor::run(state, move || {
        let settings = settings.clone();
        async move {
            let mut config = CouchConfig::new(settings.base_url, settings.database);
            if let (Some(username), Some(password)) = (settings.username, settings.password) {
                config = config.with_credentials(username, password);
            }
            let store = CouchGameStore::connect(config).await?;
            Ok::<Arc<dyn GameStore>, StorageError>(Arc::new(store))
        }
    }));
    Ok(())
}

#[cfg(not(feature = "couch-store"))]
fn spawn_couch(_config: &AppConfig, _state: SharedState) -> anyhow::Result<()> {
    anyhow::bail!("CouchDB storage selected but the `couch-store` feature is disabled")
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
