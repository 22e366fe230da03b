//! Unified error types for the CalIO offline worker.

use tokio_rusqlite::rusqlite;

/// Unified error types shared by the cache store and the worker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Transport-level network failure (DNS, connect, timeout).
    ///
    /// HTTP error statuses are not errors; they come back as responses.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Fetch response too large to cache.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A host platform capability (clients, notifications) failed.
    ///
    /// Never produced by this workspace itself; reserved for embedders
    /// implementing the worker's capability traits against a real host.
    #[error("PLATFORM_ERROR: {0}")]
    Platform(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
