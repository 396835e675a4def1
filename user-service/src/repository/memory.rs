//! In-memory [`UserRepository`] used by tests and local runs without a database

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::PageWindow;
use super::traits::{check_filter_columns, RepositoryResult, UserRepository};
use crate::models::{User, UserPayload};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// Users kept in a `BTreeMap` keyed by id
///
/// Ids are assigned from 1 upwards and never reused. Filtering is a
/// case-insensitive substring match, the same semantics as `ILIKE '%v%'`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field<'a>(user: &'a User, column: &str) -> &'a str {
    match column {
        "email" => &user.email,
        _ => &user.name,
    }
}

fn matches_filters(user: &User, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(column, needle)| {
        field(user, column)
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<User> {
        self.store
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::GetById, id))
    }

    async fn create(&self, payload: &UserPayload) -> RepositoryResult<i64> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = store.last_id;
        store
            .users
            .insert(id, User::from_payload(id, payload.clone()));
        Ok(id)
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        match store.users.get_mut(&user.id) {
            Some(existing) => {
                existing.name.clone_from(&user.name);
                existing.email.clone_from(&user.email);
                Ok(())
            }
            None => Err(RepositoryError::not_found(
                RepositoryOperation::Update,
                user.id,
            )),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.store
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Delete, id))
    }

    async fn list(
        &self,
        window: PageWindow,
        filters: &BTreeMap<String, String>,
    ) -> RepositoryResult<Vec<User>> {
        check_filter_columns(filters)?;

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(self
            .store
            .read()
            .await
            .users
            .values()
            .filter(|user| matches_filters(user, filters))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryErrorKind;

    async fn seeded() -> InMemoryUserRepository {
        let repo = InMemoryUserRepository::new();
        for (name, email) in [
            ("Ana", "ana@x.com"),
            ("Anna", "anna@x.com"),
            ("Bob", "bob@y.com"),
        ] {
            repo.create(&UserPayload::new(name, email)).await.unwrap();
        }
        repo
    }

    fn filter(column: &str, value: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(column.to_string(), value.to_string())])
    }

    #[tokio::test]
    async fn test_ids_assigned_from_one() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(&UserPayload::new("Ana", "ana@x.com")).await.unwrap();
        let second = repo.create(&UserPayload::new("Bob", "bob@y.com")).await.unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = seeded().await;
        repo.delete(3).await.unwrap();
        let id = repo.create(&UserPayload::new("Cy", "cy@z.com")).await.unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let error = repo.get_by_id(99).await.unwrap_err();
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.entity_id, Some(99));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = seeded().await;
        let updated = User {
            id: 2,
            name: "Anne".to_string(),
            email: "anne@x.com".to_string(),
        };
        repo.update(&updated).await.unwrap();
        assert_eq!(repo.get_by_id(2).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = seeded().await;
        let ghost = User {
            id: 42,
            name: "Ghost".to_string(),
            email: "ghost@x.com".to_string(),
        };
        let error = repo.update(&ghost).await.unwrap_err();
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.operation, RepositoryOperation::Update);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = seeded().await;
        repo.delete(1).await.unwrap();
        assert!(repo.get_by_id(1).await.unwrap_err().is_not_found());
        assert!(repo.delete(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_case_insensitive_substring() {
        let repo = seeded().await;
        let users = repo
            .list(PageWindow::default(), &filter("name", "an"))
            .await
            .unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Anna"]);
    }

    #[tokio::test]
    async fn test_list_all_filters_must_match() {
        let repo = seeded().await;
        let mut filters = filter("name", "an");
        filters.insert("email".to_string(), "ANNA@".to_string());
        let users = repo.list(PageWindow::default(), &filters).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Anna");
    }

    #[tokio::test]
    async fn test_list_pagination_window() {
        let repo = seeded().await;
        let page_two = repo
            .list(PageWindow::from_page(2, 2).unwrap(), &BTreeMap::new())
            .await
            .unwrap();
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].id, 3);

        let past_end = repo
            .list(PageWindow::from_page(5, 2).unwrap(), &BTreeMap::new())
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_column() {
        let repo = seeded().await;
        let error = repo
            .list(PageWindow::default(), &filter("id", "1"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, RepositoryErrorKind::InvalidFilter);
    }
}
