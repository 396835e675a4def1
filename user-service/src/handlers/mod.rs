//! HTTP transport for users
//!
//! Handlers parse the path, query and body, delegate to
//! [`UserService`](crate::service::UserService), and map failures through
//! [`ApiError`]:
//!
//! | Failure | Status |
//! |---|---|
//! | bad id, body, page, limit or filter | 400 |
//! | user does not exist | 404 |
//! | store failure | 500 |

mod error;
mod query;
pub(crate) mod users;

pub use error::{
    ApiError, ApiErrorKind, ApiOperation, ErrorBody, INTERNAL_ERROR, INVALID_FILTER,
    INVALID_LIMIT, INVALID_PAGE, INVALID_REQUEST_BODY, INVALID_USER_ID, USER_NOT_FOUND,
};
pub use query::{ListQuery, DEFAULT_PAGE};
pub use users::{create_user, delete_user, get_user, list_users, update_user};
