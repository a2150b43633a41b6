//! HTTP handlers for user administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Permission, User};
use crate::services::user::{CreateUserInput, UpdateUserInput};
use crate::services::UserService;
use crate::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    current_user.0.require(Permission::ManageUsers)?;
    let service = UserService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    current_user.0.require(Permission::ManageUsers)?;
    let service = UserService::new(state.db);
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    current_user.0.require(Permission::ManageUsers)?;
    let service = UserService::new(state.db);
    Ok(Json(service.update(user_id, input).await?))
}
