//! User CRUD handlers
//!
//! Input is rejected by the extractors (`UserIdPath`, `ValidatedJson`)
//! before `UserService` is called.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::application::users::UserService;
use crate::interfaces::http::common::{ApiError, ErrorResponse, UserIdPath, ValidatedJson};

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid body or field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .create_user(&request.name, &request.dob)
        .await
        .map_err(|e| ApiError::from_domain(e, "create user", None))?;

    info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users ordered by id", body = [UserResponse]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|e| ApiError::from_domain(e, "list users", None))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get_user(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "get user", Some(id)))?;

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid id, body or field", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .update_user(id, &request.name, &request.dob)
        .await
        .map_err(|e| ApiError::from_domain(e, "update user", Some(id)))?;

    info!(user_id = id, "User updated");
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    UserIdPath(id): UserIdPath,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_user(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "delete user", Some(id)))?;

    info!(user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
