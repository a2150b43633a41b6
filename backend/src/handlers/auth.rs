//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::{ensure_active, CurrentUser};
use crate::models::User;
use crate::services::auth::{AuthResponse, LoginInput, RegisterInput};
use crate::services::{AuthService, UserService};
use crate::AppState;

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.register(body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    Ok(Json(auth_service.login(body).await?))
}

/// The signed-in account
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service.get(current_user.0.user_id).await?;
    ensure_active(&user)?;
    Ok(Json(user))
}
