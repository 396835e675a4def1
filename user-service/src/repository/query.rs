//! Dynamic query construction for filtered, paginated listing
//!
//! The builder turns a base `SELECT` fragment and a filter mapping into a
//! parameterized query with PostgreSQL-style positional placeholders
//! (`$1`, `$2`, ...), and appends ordering and pagination afterwards.
//! Nothing here touches a connection.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use user_service::repository::{append_pagination, build_filtered_query, next_placeholder, QueryArg};
//!
//! let mut filters = BTreeMap::new();
//! filters.insert("name", "an");
//!
//! let (query, args) = build_filtered_query("SELECT id, name, email FROM users", &filters, 1);
//! let start = next_placeholder(&args);
//! let (query, args) = append_pagination(query, args, start, 10, 0);
//!
//! assert_eq!(
//!     query,
//!     "SELECT id, name, email FROM users WHERE name ILIKE $1 ORDER BY id ASC LIMIT $2 OFFSET $3"
//! );
//! assert_eq!(
//!     args,
//!     vec![QueryArg::text("%an%"), QueryArg::Integer(10), QueryArg::Integer(0)]
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Case-insensitive pattern match operator used for every filter condition
pub const PATTERN_MATCH: &str = "ILIKE";

/// Column every paginated listing is ordered by
pub const ORDER_COLUMN: &str = "id";

/// A positional argument bound to a placeholder
///
/// # Example
///
/// ```rust
/// use user_service::repository::QueryArg;
///
/// assert_eq!(QueryArg::from("ana"), QueryArg::Text("ana".to_string()));
/// assert_eq!(QueryArg::from(10_i64), QueryArg::Integer(10));
/// assert_eq!(format!("{}", QueryArg::Integer(10)), "10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    /// Text value
    Text(String),
    /// 64-bit integer value
    Integer(i64),
}

impl QueryArg {
    /// Create a text argument
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for QueryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for QueryArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Build a `WHERE` clause of `ILIKE` conditions from a filter mapping
///
/// Conditions are emitted in the map's key order (sorted by field name), one
/// placeholder per filter starting at `start_index`. Each value is bound as a
/// `%value%` substring pattern using its `Display` form. An empty mapping
/// returns `base` unchanged with no arguments.
///
/// Field names are interpolated verbatim; callers must only pass trusted
/// column names.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use user_service::repository::{build_filtered_query, QueryArg};
///
/// let mut filters = BTreeMap::new();
/// filters.insert("name", "an");
/// filters.insert("email", "x.com");
///
/// let (query, args) = build_filtered_query("SELECT * FROM users", &filters, 1);
/// assert_eq!(query, "SELECT * FROM users WHERE email ILIKE $1 AND name ILIKE $2");
/// assert_eq!(args, vec![QueryArg::text("%x.com%"), QueryArg::text("%an%")]);
///
/// let empty: BTreeMap<&str, &str> = BTreeMap::new();
/// let (query, args) = build_filtered_query("SELECT * FROM users", &empty, 1);
/// assert_eq!(query, "SELECT * FROM users");
/// assert!(args.is_empty());
/// ```
#[must_use]
pub fn build_filtered_query<K, V>(
    base: &str,
    filters: &BTreeMap<K, V>,
    start_index: usize,
) -> (String, Vec<QueryArg>)
where
    K: AsRef<str>,
    V: fmt::Display,
{
    let mut query = base.to_string();
    if filters.is_empty() {
        return (query, Vec::new());
    }

    let mut conditions = Vec::with_capacity(filters.len());
    let mut args = Vec::with_capacity(filters.len());

    for (placeholder, (field, value)) in (start_index..).zip(filters) {
        conditions.push(format!("{} {PATTERN_MATCH} ${placeholder}", field.as_ref()));
        args.push(QueryArg::Text(format!("%{value}%")));
    }

    query.push_str(" WHERE ");
    query.push_str(&conditions.join(" AND "));

    (query, args)
}

/// Append `ORDER BY id ASC LIMIT $n OFFSET $n+1` and bind `limit`, then `offset`
///
/// `start_index` must be the next free placeholder, i.e.
/// [`next_placeholder`] of the arguments produced so far.
///
/// # Example
///
/// ```rust
/// use user_service::repository::{append_pagination, QueryArg};
///
/// let (query, args) = append_pagination("SELECT * FROM users".to_string(), Vec::new(), 1, 5, 20);
/// assert_eq!(query, "SELECT * FROM users ORDER BY id ASC LIMIT $1 OFFSET $2");
/// assert_eq!(args, vec![QueryArg::Integer(5), QueryArg::Integer(20)]);
/// ```
#[must_use]
pub fn append_pagination(
    mut query: String,
    mut args: Vec<QueryArg>,
    start_index: usize,
    limit: i64,
    offset: i64,
) -> (String, Vec<QueryArg>) {
    query.push_str(&format!(
        " ORDER BY {ORDER_COLUMN} ASC LIMIT ${} OFFSET ${}",
        start_index,
        start_index + 1
    ));
    args.push(QueryArg::Integer(limit));
    args.push(QueryArg::Integer(offset));
    (query, args)
}

/// Index of the next free placeholder after `args`
#[must_use]
pub fn next_placeholder(args: &[QueryArg]) -> usize {
    args.len() + 1
}
