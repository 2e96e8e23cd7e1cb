/// Game persistence backends and the trait they share.
pub mod game_store;
/// Storage-agnostic game records.
pub mod models;
/// Error type shared by every storage backend.
pub mod storage;
