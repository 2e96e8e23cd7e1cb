/// OpenAPI documentation generation.
pub mod documentation;
/// Game catalog operations on top of the installed game store.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Background connection and health supervision of the game store.
pub mod storage_supervisor;
