//! `/users` handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::error::{ApiError, ApiOperation, ErrorBody, INVALID_REQUEST_BODY, INVALID_USER_ID};
use super::query::ListQuery;
use crate::models::{validation_message, User, UserPayload};
use crate::repository::UserRepository;
use crate::state::AppState;

fn parse_id(raw: &str, operation: ApiOperation) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(INVALID_USER_ID).with_operation(operation))
}

/// Unwrap a JSON body and run field validation
fn validated(
    payload: Result<Json<UserPayload>, JsonRejection>,
    operation: ApiOperation,
) -> Result<UserPayload, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        ApiError::bad_request(INVALID_REQUEST_BODY).with_operation(operation)
    })?;
    payload.validate().map_err(|errors| {
        ApiError::bad_request(validation_message(&errors)).with_operation(operation)
    })?;
    Ok(payload)
}

/// `GET /users/{id}`
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid user id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_user<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError>
where
    R: UserRepository,
{
    let id = parse_id(&id, ApiOperation::Get)?;
    let user = state.users().get(id).await?;
    tracing::info!(user_id = id, status = 200, "user returned");
    Ok(Json(user))
}

/// `POST /users`
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created with its assigned id", body = User),
        (status = 400, description = "Malformed or invalid body", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_user<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError>
where
    R: UserRepository,
{
    let payload = validated(payload, ApiOperation::Create)?;
    let id = state.users().create(&payload).await?;
    tracing::info!(user_id = id, status = 201, "user created");
    Ok((StatusCode::CREATED, Json(User::from_payload(id, payload))))
}

/// `PUT /users/{id}`
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Invalid id or body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn update_user<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
    R: UserRepository,
{
    let id = parse_id(&id, ApiOperation::Update)?;
    let payload = validated(payload, ApiOperation::Update)?;
    state
        .users()
        .update(&User::from_payload(id, payload))
        .await?;
    tracing::info!(user_id = id, status = 200, "user updated");
    Ok(StatusCode::OK)
}

/// `DELETE /users/{id}`
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete_user<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: UserRepository,
{
    let id = parse_id(&id, ApiOperation::Delete)?;
    state.users().delete(id).await?;
    tracing::info!(user_id = id, status = 204, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users?name=&email=&page=&limit=`
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching users ordered by id", body = Vec<User>),
        (status = 400, description = "Invalid page, limit or filter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_users<R>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError>
where
    R: UserRepository,
{
    let Query(query) = query.map_err(|rejection| {
        ApiError::bad_request(rejection.body_text()).with_operation(ApiOperation::List)
    })?;
    let window = query.window()?;
    let filters = query.filters();

    let users = state.users().list(window, &filters).await?;
    tracing::info!(
        count = users.len(),
        filters = filters.len(),
        status = 200,
        "users listed"
    );
    Ok(Json(users))
}
