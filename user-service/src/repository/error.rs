//! Repository error types
//!
//! Every repository failure carries the operation that was running, a
//! category the transport layer can map to a status code, and the id of the
//! user involved when there is one.
//!
//! # Example
//!
//! ```rust
//! use user_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::GetById, 42);
//! assert_eq!(error.kind, RepositoryErrorKind::NotFound);
//! assert_eq!(error.entity_id, Some(42));
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Fetching a single user by id
    GetById,
    /// Inserting a new user
    Create,
    /// Overwriting an existing user
    Update,
    /// Removing a user
    Delete,
    /// Filtered, paginated listing
    List,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetById => write!(f, "get_by_id"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No row matched the requested id
    NotFound,
    /// A filter named a column that may not be filtered on
    InvalidFilter,
    /// Database constraint violation (unique, foreign key, check)
    ConstraintViolation,
    /// Failed to reach the database
    ConnectionFailed,
    /// Pool acquire timed out
    Timeout,
    /// A row could not be decoded into a user
    Decode,
    /// Any other database failure
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidFilter => write!(f, "invalid_filter"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::Decode => write!(f, "decode"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The id of the user involved
    pub entity_id: Option<i64>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a "not found" error for the given user id
    pub fn not_found(operation: RepositoryOperation, id: i64) -> Self {
        Self {
            operation,
            kind: RepositoryErrorKind::NotFound,
            message: "user not found".to_string(),
            entity_id: Some(id),
        }
    }

    /// Create an error for a filter on a column outside the allowed set
    ///
    /// # Example
    ///
    /// ```rust
    /// use user_service::repository::{RepositoryError, RepositoryErrorKind};
    ///
    /// let error = RepositoryError::invalid_filter("password");
    /// assert_eq!(error.kind, RepositoryErrorKind::InvalidFilter);
    /// assert!(error.message.contains("password"));
    /// ```
    pub fn invalid_filter(field: &str) -> Self {
        Self {
            operation: RepositoryOperation::List,
            kind: RepositoryErrorKind::InvalidFilter,
            message: format!("cannot filter on column '{field}'"),
            entity_id: None,
        }
    }

    /// Attach the id of the user involved
    #[must_use]
    pub fn with_entity(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Set the operation that caused the error
    ///
    /// Conversions from `sqlx::Error` default to [`RepositoryOperation::GetById`];
    /// call sites set the real operation with this.
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether this error means the requested user does not exist
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.entity_id {
            write!(f, " [User: {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        let operation = RepositoryOperation::GetById;
        match err {
            E::RowNotFound => Self::new(operation, RepositoryErrorKind::NotFound, "user not found"),
            E::PoolTimedOut => Self::new(
                operation,
                RepositoryErrorKind::Timeout,
                "connection pool timed out",
            ),
            E::PoolClosed => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                "connection pool is closed",
            ),
            E::WorkerCrashed => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                "database worker crashed",
            ),
            E::Io(e) => Self::new(operation, RepositoryErrorKind::ConnectionFailed, e.to_string()),
            E::Tls(e) => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                format!("TLS error: {e}"),
            ),
            E::ColumnNotFound(col) => Self::new(
                operation,
                RepositoryErrorKind::Decode,
                format!("column not found: {col}"),
            ),
            E::ColumnDecode { index, source } => Self::new(
                operation,
                RepositoryErrorKind::Decode,
                format!("failed to decode column {index}: {source}"),
            ),
            E::Decode(e) => Self::new(operation, RepositoryErrorKind::Decode, e.to_string()),
            E::Database(db_err) => {
                let kind = if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    RepositoryErrorKind::ConstraintViolation
                } else {
                    RepositoryErrorKind::DatabaseError
                };
                Self::new(operation, kind, db_err.to_string())
            }
            other => Self::new(operation, RepositoryErrorKind::DatabaseError, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::GetById), "get_by_id");
        assert_eq!(format!("{}", RepositoryOperation::Create), "create");
        assert_eq!(format!("{}", RepositoryOperation::Update), "update");
        assert_eq!(format!("{}", RepositoryOperation::Delete), "delete");
        assert_eq!(format!("{}", RepositoryOperation::List), "list");
    }

    #[test]
    fn test_repository_error_kind_display() {
        assert_eq!(format!("{}", RepositoryErrorKind::NotFound), "not_found");
        assert_eq!(
            format!("{}", RepositoryErrorKind::InvalidFilter),
            "invalid_filter"
        );
        assert_eq!(
            format!("{}", RepositoryErrorKind::ConstraintViolation),
            "constraint_violation"
        );
        assert_eq!(format!("{}", RepositoryErrorKind::Decode), "decode");
    }

    #[test]
    fn test_not_found_display_includes_id() {
        let error = RepositoryError::not_found(RepositoryOperation::Delete, 7);
        assert_eq!(
            error.to_string(),
            "Repository not_found error during delete: user not found [User: 7]"
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn test_with_operation_and_entity() {
        let error = RepositoryError::new(
            RepositoryOperation::GetById,
            RepositoryErrorKind::DatabaseError,
            "boom",
        )
        .with_operation(RepositoryOperation::Update)
        .with_entity(3);

        assert_eq!(error.operation, RepositoryOperation::Update);
        assert_eq!(error.entity_id, Some(3));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error = RepositoryError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
    }

    #[test]
    fn test_from_sqlx_pool_errors() {
        assert_eq!(
            RepositoryError::from(sqlx::Error::PoolTimedOut).kind,
            RepositoryErrorKind::Timeout
        );
        assert_eq!(
            RepositoryError::from(sqlx::Error::PoolClosed).kind,
            RepositoryErrorKind::ConnectionFailed
        );
    }

    #[test]
    fn test_from_sqlx_decode_errors() {
        let error = RepositoryError::from(sqlx::Error::ColumnNotFound("email".to_string()));
        assert_eq!(error.kind, RepositoryErrorKind::Decode);
        assert!(error.message.contains("email"));
    }

    #[test]
    fn test_from_sqlx_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = RepositoryError::from(sqlx::Error::Io(io));
        assert_eq!(error.kind, RepositoryErrorKind::ConnectionFailed);
    }
}
