//! User persistence
//!
//! # Features
//!
//! - **Trait**: [`UserRepository`] with RPITIT async methods
//! - **Backends**: [`PgUserRepository`] over sqlx, [`InMemoryUserRepository`] for tests
//! - **Query building**: [`build_filtered_query`] and [`append_pagination`] for
//!   `ILIKE` filters with positional placeholders
//! - **Row mapping**: [`map_rows`] to decode a result stream into entities
//! - **Pagination**: [`PageWindow`] from 1-based page numbers
//!
//! # Example
//!
//! ```rust,ignore
//! use user_service::repository::{PgUserRepository, PageWindow, UserRepository};
//!
//! let repo = PgUserRepository::new(pool);
//! let users = repo.list(PageWindow::from_page(2, 20).unwrap(), &filters).await?;
//! ```

mod error;
mod memory;
mod pagination;
mod postgres;
mod query;
mod rows;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryUserRepository;
pub use pagination::{PageWindow, DEFAULT_LIMIT, MAX_LIMIT};
pub use postgres::{decode_user, list_statement, PgUserRepository};
pub use query::{
    append_pagination, build_filtered_query, next_placeholder, QueryArg, ORDER_COLUMN,
    PATTERN_MATCH,
};
pub use rows::map_rows;
pub use traits::{check_filter_columns, RepositoryResult, UserRepository, USER_FILTER_COLUMNS};
