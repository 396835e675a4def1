//! Repository trait for user persistence
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) so implementations can
//! write plain `async fn` without `async_trait`.

use std::collections::BTreeMap;
use std::future::Future;

use super::error::RepositoryError;
use super::pagination::PageWindow;
use crate::models::{User, UserPayload};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Columns a list filter may name
///
/// Filter keys are interpolated into SQL, so anything outside this set is
/// rejected before a query is built.
pub const USER_FILTER_COLUMNS: [&str; 2] = ["email", "name"];

/// Reject any filter key that is not in [`USER_FILTER_COLUMNS`]
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use user_service::repository::check_filter_columns;
///
/// let ok = BTreeMap::from([("name".to_string(), "an".to_string())]);
/// assert!(check_filter_columns(&ok).is_ok());
///
/// let bad = BTreeMap::from([("id; DROP TABLE users".to_string(), "1".to_string())]);
/// assert!(check_filter_columns(&bad).is_err());
/// ```
pub fn check_filter_columns<V>(filters: &BTreeMap<String, V>) -> RepositoryResult<()> {
    match filters
        .keys()
        .find(|field| !USER_FILTER_COLUMNS.contains(&field.as_str()))
    {
        Some(field) => Err(RepositoryError::invalid_filter(field)),
        None => Ok(()),
    }
}

/// Persistence operations for [`User`]
///
/// Every method performs exactly one round trip to the backing store.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use user_service::models::UserPayload;
/// use user_service::repository::{InMemoryUserRepository, PageWindow, UserRepository};
///
/// # futures::executor::block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let id = repo.create(&UserPayload::new("Ana", "ana@x.com")).await.unwrap();
///
/// let user = repo.get_by_id(id).await.unwrap();
/// assert_eq!(user.name, "Ana");
///
/// let filters = BTreeMap::from([("name".to_string(), "AN".to_string())]);
/// let found = repo.list(PageWindow::default(), &filters).await.unwrap();
/// assert_eq!(found.len(), 1);
/// # });
/// ```
pub trait UserRepository: Send + Sync {
    /// Fetch the user with the given id
    ///
    /// Fails with `NotFound` when no row matches.
    fn get_by_id(&self, id: i64) -> impl Future<Output = RepositoryResult<User>> + Send;

    /// Insert a new user and return the store-assigned id
    fn create(&self, payload: &UserPayload) -> impl Future<Output = RepositoryResult<i64>> + Send;

    /// Overwrite name and email of the user with `user.id`
    ///
    /// Fails with `NotFound` when no row was affected.
    fn update(&self, user: &User) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Remove the user with the given id
    ///
    /// Fails with `NotFound` when no row was affected.
    fn delete(&self, id: i64) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// List users ordered by id, restricted to `window` and matching every filter
    ///
    /// Each filter is a case-insensitive substring match on its column. Keys
    /// outside [`USER_FILTER_COLUMNS`] fail with `InvalidFilter`.
    fn list(
        &self,
        window: PageWindow,
        filters: &BTreeMap<String, String>,
    ) -> impl Future<Output = RepositoryResult<Vec<User>>> + Send;
}
