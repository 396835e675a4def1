//! # user-service
//!
//! Layered CRUD service for a single `User` entity stored in PostgreSQL.
//!
//! ## Features
//!
//! - **HTTP API**: create, read, update, delete and list under `/users` (axum)
//! - **Dynamic listing**: `ILIKE` filters with positional placeholders, ordered and paginated
//! - **Pluggable storage**: [`UserRepository`](repository::UserRepository) over sqlx or in memory
//! - **Configuration**: defaults, TOML files and environment variables via figment
//! - **Logging**: JSON output through `tracing-subscriber`
//! - **API docs**: OpenAPI document and Swagger UI via utoipa
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use user_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load(None)?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     let users = UserService::new(PgUserRepository::new(pool));
//!     let app = build_router(AppState::new(users, config.service.name.clone()));
//!
//!     Server::new(config.service).serve(app).await
//! }
//! ```

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod models;
pub mod observability;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::build_router;
    pub use crate::config::{Config, DatabaseConfig, ServiceConfig};
    pub use crate::database::create_pool;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind};
    pub use crate::health::health;
    pub use crate::models::{User, UserPayload};
    pub use crate::observability::init_tracing;
    pub use crate::openapi::ApiDoc;
    pub use crate::repository::{
        InMemoryUserRepository, PageWindow, PgUserRepository, RepositoryError,
        RepositoryErrorKind, UserRepository,
    };
    pub use crate::server::Server;
    pub use crate::service::UserService;
    pub use crate::state::AppState;

    pub use axum::Router;
}
