//! User service layer
//!
//! A thin pass-through over [`UserRepository`]. Errors are returned as the
//! repository produced them.

use std::collections::BTreeMap;

use crate::models::{User, UserPayload};
use crate::repository::{PageWindow, RepositoryResult, UserRepository};

/// Business operations on users, generic over the storage backend
#[derive(Debug)]
pub struct UserService<R> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> RepositoryResult<User> {
        self.repository.get_by_id(id).await
    }

    /// Persist a new user and return its assigned id
    pub async fn create(&self, payload: &UserPayload) -> RepositoryResult<i64> {
        self.repository.create(payload).await
    }

    pub async fn update(&self, user: &User) -> RepositoryResult<()> {
        self.repository.update(user).await
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.repository.delete(id).await
    }

    /// List users in `window` matching every filter
    pub async fn list(
        &self,
        window: PageWindow,
        filters: &BTreeMap<String, String>,
    ) -> RepositoryResult<Vec<User>> {
        self.repository.list(window, filters).await
    }
}
