//! Query parameters for `GET /users`
//!
//! Every parameter arrives as a raw string so that bad input maps to a
//! specific 400 message instead of a generic extractor rejection. Empty or
//! whitespace-only values count as absent.
//!
//! # Example
//!
//! ```rust
//! use user_service::handlers::ListQuery;
//! use user_service::repository::PageWindow;
//!
//! let query = ListQuery {
//!     name: Some(" an ".to_string()),
//!     page: Some("2".to_string()),
//!     ..ListQuery::default()
//! };
//!
//! assert_eq!(query.window().unwrap(), PageWindow::new(10, 10));
//! assert_eq!(query.filters().get("name").map(String::as_str), Some("an"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::error::{ApiError, ApiOperation, INVALID_LIMIT, INVALID_PAGE};
use crate::repository::{PageWindow, DEFAULT_LIMIT, MAX_LIMIT};

/// Default page number
pub const DEFAULT_PAGE: u32 = 1;

/// Raw list parameters: `?name=&email=&page=&limit=`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring of the user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Substring of the email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Page number (1-indexed). None defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<u32>, minimum = 1)]
    pub page: Option<String>,

    /// Items per page. None defaults to [`DEFAULT_LIMIT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<u32>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
}

/// Trimmed value, or `None` when absent or blank
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_bounded(
    value: Option<&String>,
    default: u32,
    max: u32,
    message: &'static str,
) -> Result<u32, ApiError> {
    let Some(raw) = present(value) else {
        return Ok(default);
    };
    raw.parse::<u32>()
        .ok()
        .filter(|n| (1..=max).contains(n))
        .ok_or_else(|| ApiError::bad_request(message).with_operation(ApiOperation::List))
}

impl ListQuery {
    /// Parsed page number, at least 1
    pub fn page_number(&self) -> Result<u32, ApiError> {
        parse_bounded(self.page.as_ref(), DEFAULT_PAGE, u32::MAX, INVALID_PAGE)
    }

    /// Parsed page size, between 1 and [`MAX_LIMIT`]
    pub fn items_per_page(&self) -> Result<u32, ApiError> {
        parse_bounded(self.limit.as_ref(), DEFAULT_LIMIT, MAX_LIMIT, INVALID_LIMIT)
    }

    /// Window of rows selected by `page` and `limit`
    pub fn window(&self) -> Result<PageWindow, ApiError> {
        let page = self.page_number()?;
        let limit = self.items_per_page()?;
        PageWindow::from_page(page, limit).ok_or_else(|| {
            ApiError::bad_request(INVALID_PAGE).with_operation(ApiOperation::List)
        })
    }

    /// Non-empty `name` and `email` filters, trimmed
    pub fn filters(&self) -> BTreeMap<String, String> {
        [("email", self.email.as_ref()), ("name", self.name.as_ref())]
            .into_iter()
            .filter_map(|(column, value)| {
                present(value).map(|v| (column.to_string(), v.to_string()))
            })
            .collect()
    }
}
