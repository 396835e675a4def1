//! PostgreSQL-backed [`UserRepository`]

use std::collections::BTreeMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::PageWindow;
use super::query::{append_pagination, build_filtered_query, next_placeholder, QueryArg};
use super::rows::map_rows;
use super::traits::{check_filter_columns, RepositoryResult, UserRepository};
use crate::models::{User, UserPayload};

const SELECT_USERS: &str = "SELECT id, name, email FROM users";
const SELECT_USER_BY_ID: &str = "SELECT id, name, email FROM users WHERE id = $1";
const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id";
const UPDATE_USER: &str = "UPDATE users SET name = $1, email = $2 WHERE id = $3";
const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// Decode one `users` row
pub fn decode_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
    })
}

/// Repository over a shared `PgPool`
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQL and arguments for one page of filtered users
///
/// Filter columns are checked before any SQL is built. Filter placeholders
/// come first, followed by `LIMIT` and `OFFSET`.
pub fn list_statement(
    window: PageWindow,
    filters: &BTreeMap<String, String>,
) -> RepositoryResult<(String, Vec<QueryArg>)> {
    check_filter_columns(filters)?;

    let (sql, args) = build_filtered_query(SELECT_USERS, filters, 1);
    let start = next_placeholder(&args);
    Ok(append_pagination(
        sql,
        args,
        start,
        window.sql_limit(),
        window.sql_offset(),
    ))
}

fn failed(operation: RepositoryOperation, err: sqlx::Error) -> RepositoryError {
    let error = RepositoryError::from(err).with_operation(operation);
    tracing::error!(
        operation = %operation,
        kind = %error.kind,
        error = %error.message,
        "repository operation failed"
    );
    error
}

impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<User> {
        tracing::debug!(user_id = id, "fetching user");

        let row = sqlx::query(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| failed(RepositoryOperation::GetById, e))?;

        let Some(row) = row else {
            tracing::debug!(user_id = id, "user not found");
            return Err(RepositoryError::not_found(RepositoryOperation::GetById, id));
        };

        let user = decode_user(&row)
            .map_err(|e| failed(RepositoryOperation::GetById, e).with_entity(id))?;
        tracing::info!(user_id = id, "user fetched");
        Ok(user)
    }

    async fn create(&self, payload: &UserPayload) -> RepositoryResult<i64> {
        tracing::debug!(name = %payload.name, "inserting user");

        let id: i64 = sqlx::query_scalar(INSERT_USER)
            .bind(&payload.name)
            .bind(&payload.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| failed(RepositoryOperation::Create, e))?;

        tracing::info!(user_id = id, "user created");
        Ok(id)
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        tracing::debug!(user_id = user.id, "updating user");

        let result = sqlx::query(UPDATE_USER)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| failed(RepositoryOperation::Update, e).with_entity(user.id))?;

        if result.rows_affected() == 0 {
            tracing::debug!(user_id = user.id, "no user to update");
            return Err(RepositoryError::not_found(
                RepositoryOperation::Update,
                user.id,
            ));
        }

        tracing::info!(user_id = user.id, "user updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        tracing::debug!(user_id = id, "deleting user");

        let result = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| failed(RepositoryOperation::Delete, e).with_entity(id))?;

        if result.rows_affected() == 0 {
            tracing::debug!(user_id = id, "no user to delete");
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, id));
        }

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn list(
        &self,
        window: PageWindow,
        filters: &BTreeMap<String, String>,
    ) -> RepositoryResult<Vec<User>> {
        let (sql, args) = list_statement(window, filters).inspect_err(|e| {
            tracing::error!(error = %e, "rejected list filter");
        })?;

        tracing::debug!(query = %sql, args = args.len(), "listing users");

        let mut query = sqlx::query(&sql);
        for arg in args {
            query = match arg {
                QueryArg::Text(value) => query.bind(value),
                QueryArg::Integer(value) => query.bind(value),
            };
        }

        let users = map_rows(query.fetch(&self.pool), decode_user)
            .await
            .map_err(|e| failed(RepositoryOperation::List, e))?;

        tracing::info!(count = users.len(), "users listed");
        Ok(users)
    }
}
