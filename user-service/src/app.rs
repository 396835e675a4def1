//! Route table
//!
//! # Example
//!
//! ```rust
//! use user_service::app::build_router;
//! use user_service::repository::InMemoryUserRepository;
//! use user_service::service::UserService;
//! use user_service::state::AppState;
//!
//! let state = AppState::new(UserService::new(InMemoryUserRepository::new()), "user-service");
//! let router = build_router(state);
//! ```

use axum::{routing::get, Router};

use crate::handlers;
use crate::health;
use crate::openapi;
use crate::repository::UserRepository;
use crate::state::AppState;

/// Build the router for `/users`, `/health` and the Swagger UI with `state`
/// attached
///
/// Middleware is added by [`Server::serve`](crate::server::Server::serve).
pub fn build_router<R>(state: AppState<R>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/health", get(health::health::<R>))
        .merge(openapi::swagger_ui())
        .with_state(state)
}
