//! Application state shared across handlers

use std::sync::Arc;

use crate::repository::UserRepository;
use crate::service::UserService;

/// State handed to every handler
///
/// Generic over the repository backend so tests can run the full router on
/// [`InMemoryUserRepository`](crate::repository::InMemoryUserRepository).
pub struct AppState<R> {
    users: Arc<UserService<R>>,
    service_name: Arc<str>,
}

// Derived Clone would require `R: Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            service_name: Arc::clone(&self.service_name),
        }
    }
}

impl<R: UserRepository> AppState<R> {
    pub fn new(users: UserService<R>, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            users: Arc::new(users),
            service_name: service_name.into(),
        }
    }

    /// The user service
    pub fn users(&self) -> &UserService<R> {
        &self.users
    }

    /// Service name reported by the health endpoint
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
