use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::de::DeserializeOwned;
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{CreateUserReq, ListUsersQuery, UpdateUserReq, UserDto};
use crate::api::rest::error::ApiError;
use crate::contract::model::NewUser;
use crate::domain::service::Service;

/// List users, optionally filtered by exact name and/or role
#[utoipa::path(
    get,
    path = "/users",
    operation_id = "get-users-by-property",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users matching the filter", body = Vec<UserDto>),
        (status = 500, description = "Listing failed", body = String, content_type = "text/plain"),
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let query = ListUsersQuery::from_pairs(pairs);
    info!("Listing users with query: {:?}", query);

    let filter = query.into_filter();
    let users = svc
        .list_by_property(Some(&filter))
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Get a user by their ID. The ID must be a valid UUID
#[utoipa::path(
    get,
    path = "/users/{id}",
    operation_id = "get-user-by-id",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Malformed, invalid or unknown ID", body = String, content_type = "text/plain"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_id(&raw_id)?;
    info!("Getting user with id: {}", id);

    // Unknown ids are reported as 400 here, not 404.
    let user = svc.get_user(id).await.map_err(ApiError::bad_request)?;
    Ok(Json(UserDto::from(user)))
}

/// Create a user from a name and a role
#[utoipa::path(
    post,
    path = "/users",
    operation_id = "create-user",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 200, description = "Created user", body = UserDto),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 500, description = "Creation failed", body = String, content_type = "text/plain"),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Bytes,
) -> Result<Json<UserDto>, ApiError> {
    let req: CreateUserReq = parse_json_body(&body)?;
    info!("Creating user: {:?}", req);

    let user = NewUser::from(req).into_user();
    let created = svc.create_user(user).await.map_err(ApiError::internal)?;
    Ok(Json(UserDto::from(created)))
}

/// Update a user's name and/or role. Omitted fields keep their value
#[utoipa::path(
    put,
    path = "/users/{id}",
    operation_id = "update-user",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Malformed ID or body", body = String, content_type = "text/plain"),
        (status = 500, description = "Update failed, including unknown IDs", body = String, content_type = "text/plain"),
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_id(&raw_id)?;
    let req: UpdateUserReq = parse_json_body(&body)?;
    info!("Updating user {} with: {:?}", id, req);

    // Any service failure is a 500 on this endpoint, unknown ids included.
    let user = svc
        .update_user(id, req.into())
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(UserDto::from(user)))
}

/// Delete a user by their ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    operation_id = "delete-user",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed, invalid or unknown ID", body = String, content_type = "text/plain"),
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    info!("Deleting user: {}", id);

    svc.delete_user(id).await.map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::bad_request(format!("invalid user id '{raw}': {e}")))
}

/// Bodies are decoded regardless of the request's content type. A JSON
/// `null` reads as the default request.
fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::bad_request(format!("malformed request body: {e}")))
}
