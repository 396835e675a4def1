//! API error types for handler operations
//!
//! Every failure leaves the service as `{"error": "<message>"}` with a status
//! derived from [`ApiErrorKind`].
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use user_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::bad_request("invalid user ID");
//! assert_eq!(error.kind, ApiErrorKind::BadRequest);
//! assert_eq!(error.kind.status_code(), StatusCode::BAD_REQUEST);
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Message for any invalid path id
pub const INVALID_USER_ID: &str = "invalid user ID";
/// Message for a body that is not valid JSON or misses fields
pub const INVALID_REQUEST_BODY: &str = "invalid request body";
/// Message for an unparsable or out of range `page`
pub const INVALID_PAGE: &str = "invalid page number";
/// Message for an unparsable or out of range `limit`
pub const INVALID_LIMIT: &str = "invalid limit";
/// Message for a filter on a column that cannot be filtered
pub const INVALID_FILTER: &str = "invalid filter";
/// Message for a missing user
pub const USER_NOT_FOUND: &str = "user not found";
/// Body message for every 500 response
pub const INTERNAL_ERROR: &str = "internal server error";

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::GetById => Self::Get,
            RepositoryOperation::Create => Self::Create,
            RepositoryOperation::Update => Self::Update,
            RepositoryOperation::Delete => Self::Delete,
            RepositoryOperation::List => Self::List,
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Malformed id, body, query parameter or filter
    BadRequest,
    /// The addressed user does not exist
    NotFound,
    /// Store or other unexpected failure
    Internal,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::Internal => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured API error with operation context
///
/// `message` is what the client sees, except for [`ApiErrorKind::Internal`]
/// where the body is always [`INTERNAL_ERROR`] and `message` is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub operation: ApiOperation,
    pub kind: ApiErrorKind,
    pub message: String,
    pub entity_id: Option<i64>,
}

impl ApiError {
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::BadRequest, message)
    }

    /// Create a "user not found" error for the given id
    pub fn not_found(id: i64) -> Self {
        Self {
            operation: ApiOperation::Get,
            kind: ApiErrorKind::NotFound,
            message: USER_NOT_FOUND.to_string(),
            entity_id: Some(id),
        }
    }

    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Message written to the response body
    pub fn public_message(&self) -> &str {
        match self.kind {
            ApiErrorKind::Internal => INTERNAL_ERROR,
            _ => &self.message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.entity_id {
            write!(f, " [User: {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "user not found")]
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if self.kind == ApiErrorKind::Internal {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                status = status.as_u16(),
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                status = status.as_u16(),
                "API error: {}", self.message
            );
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = ApiOperation::from(err.operation);

        let (kind, message) = match err.kind {
            RepositoryErrorKind::NotFound => (ApiErrorKind::NotFound, USER_NOT_FOUND.to_string()),
            RepositoryErrorKind::InvalidFilter => {
                (ApiErrorKind::BadRequest, INVALID_FILTER.to_string())
            }
            RepositoryErrorKind::ConstraintViolation
            | RepositoryErrorKind::ConnectionFailed
            | RepositoryErrorKind::Timeout
            | RepositoryErrorKind::Decode
            | RepositoryErrorKind::DatabaseError => (ApiErrorKind::Internal, err.to_string()),
        };

        Self {
            operation,
            kind,
            message,
            entity_id: err.entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_kind_status_codes() {
        assert_eq!(ApiErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiErrorKind::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_repository_not_found() {
        let error = ApiError::from(RepositoryError::not_found(RepositoryOperation::Delete, 4));
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.operation, ApiOperation::Delete);
        assert_eq!(error.message, USER_NOT_FOUND);
        assert_eq!(error.entity_id, Some(4));
    }

    #[test]
    fn test_from_repository_invalid_filter() {
        let error = ApiError::from(RepositoryError::invalid_filter("password"));
        assert_eq!(error.kind, ApiErrorKind::BadRequest);
        assert_eq!(error.message, INVALID_FILTER);
    }

    #[test]
    fn test_from_repository_store_failures_are_internal() {
        for kind in [
            RepositoryErrorKind::ConstraintViolation,
            RepositoryErrorKind::ConnectionFailed,
            RepositoryErrorKind::Timeout,
            RepositoryErrorKind::Decode,
            RepositoryErrorKind::DatabaseError,
        ] {
            let error = ApiError::from(RepositoryError::new(
                RepositoryOperation::List,
                kind,
                "driver detail",
            ));
            assert_eq!(error.kind, ApiErrorKind::Internal, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let (status, body) = body_of(ApiError::not_found(9)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "user not found"}));
    }

    #[tokio::test]
    async fn test_internal_response_hides_driver_text() {
        let error = ApiError::from(RepositoryError::new(
            RepositoryOperation::GetById,
            RepositoryErrorKind::DatabaseError,
            "relation \"users\" does not exist",
        ));
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": INTERNAL_ERROR}));
    }
}
