//! User endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, UserId};
use crate::http::response::{ApiResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{NewUser, User, UserChanges};

/// Create user request. `email` is optional here so a missing field
/// reaches validation instead of failing JSON decoding.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// GET /users - list all users
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /users - create a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let new_user = NewUser::new(req.email.as_deref(), req.name)?;
    let user = state.users.create(new_user).await?;
    tracing::debug!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /users/{id} - replace the supplied fields of a user
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let changes = UserChanges::new(req.email.as_deref(), req.name)?;
    let user = state.users.update(id, changes).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /users/{id} - remove a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.delete(id).await?;
    tracing::debug!(user_id = id, "User deleted");

    Ok(Json(MessageResponse::ok(format!("User {} deleted", id))))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
