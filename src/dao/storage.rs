use std::error::Error;
use thiserror::Error;

/// Result alias for game store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a game store, independent of the backing database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the request (connection lost, rejected query, bad payload).
    #[error("game storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap a backend failure, keeping its rendered message for the HTTP layer.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
