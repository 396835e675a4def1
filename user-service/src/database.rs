//! Database connection pool management

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::DatabaseConfig,
    error::{Error, Result},
};

/// Create a PostgreSQL connection pool and verify one connection
///
/// There is no retry; a failure here aborts startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config.sanitized_url();
    tracing::debug!(url = %url, "Connecting to database");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout())
        .connect_with(config.connect_options()?)
        .await
        .map_err(|source| {
            tracing::error!(
                url = %url,
                category = categorize_db_error(&source),
                error = %source,
                "Failed to connect to database"
            );
            Error::Database {
                url: url.clone(),
                source,
            }
        })?;

    tracing::info!(
        url = %url,
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Categorize a connection error for operators
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "Configuration error",
        Error::Database(_) => "Database rejected the connection",
        Error::Io(_) => "Network I/O error - check connectivity",
        Error::Tls(_) => "TLS/SSL error - check certificate configuration",
        Error::PoolTimedOut => "Connection pool timeout - database may be unreachable",
        Error::PoolClosed => "Connection pool closed",
        Error::WorkerCrashed => "Database worker crashed",
        _ => "Connection error",
    }
}
