//! HTTP handlers for sustainability metric endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Permission, SustainabilityMetric};
use crate::services::sustainability::{CreateMetricInput, UpdateMetricInput};
use crate::services::SustainabilityService;
use crate::AppState;

pub async fn list_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SustainabilityMetric>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = SustainabilityService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn create_metric(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMetricInput>,
) -> AppResult<(StatusCode, Json<SustainabilityMetric>)> {
    current_user.0.require(Permission::ManageSuppliers)?;
    let service = SustainabilityService::new(state.db);
    let metric = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

pub async fn update_metric(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(metric_id): Path<Uuid>,
    Json(input): Json<UpdateMetricInput>,
) -> AppResult<Json<SustainabilityMetric>> {
    current_user.0.require(Permission::ManageSuppliers)?;
    let service = SustainabilityService::new(state.db);
    Ok(Json(service.update(metric_id, input).await?))
}
