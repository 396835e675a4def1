//! User entity and request payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// A persisted user
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Combine a store-assigned id with the payload fields
    pub fn from_payload(id: i64, payload: UserPayload) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`
///
/// Unknown fields, including any `id`, are ignored.
///
/// # Example
///
/// ```rust
/// use user_service::models::UserPayload;
/// use validator::Validate;
///
/// let payload = UserPayload::new("Ana", "ana@x.com");
/// assert!(payload.validate().is_ok());
///
/// let payload = UserPayload::new("", "not-an-email");
/// assert!(payload.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Ana")]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "ana@x.com")]
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Flatten validator errors into a single message, ordered by field name
///
/// Falls back to the field name when a rule carries no message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("invalid {field}"), ToString::to_string)
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
