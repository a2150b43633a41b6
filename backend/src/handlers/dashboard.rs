//! Dashboard overview handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::Permission;
use crate::services::dashboard::DashboardSummary;
use crate::services::DashboardService;
use crate::AppState;

pub async fn get_dashboard_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DashboardSummary>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = DashboardService::new(state.db, state.config.reorder.policy());
    Ok(Json(service.summary().await?))
}
