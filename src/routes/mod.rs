use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod game;
pub mod health;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game::router())
        .merge(docs::router())
        .with_state(state)
}
