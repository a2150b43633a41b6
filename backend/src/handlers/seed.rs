//! Reference data handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::Permission;
use crate::services::seed::SeedSummary;
use crate::services::SeedService;
use crate::AppState;

/// Replace operational data with the reference data set
pub async fn seed_database(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<SeedSummary>> {
    current_user.0.require(Permission::SystemAdmin)?;
    tracing::info!(
        user_id = %current_user.0.user_id,
        email = %current_user.0.email,
        "Seeding reference data"
    );
    let service = SeedService::new(state.db);
    Ok(Json(service.seed().await?))
}
