//! Process-level errors for startup and serving
//!
//! Request-level failures use [`RepositoryError`](crate::repository::RepositoryError)
//! and [`ApiError`](crate::handlers::ApiError) instead.

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the service from starting or serving
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be extracted
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration was extracted but holds an unusable value
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Database connection could not be established
    #[error("Database error at '{url}': {source}")]
    Database {
        /// Connection URL with the password masked
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// I/O error (bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging could not be initialized
    #[error("Tracing initialization failed: {0}")]
    Tracing(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
