//! HTTP handlers for delivery tracking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Delivery, DeliveryFilter, DeliveryStatusCounts, Permission, Selector};
use crate::services::delivery::{CreateDeliveryInput, UpdateDeliveryInput};
use crate::services::DeliveryService;
use crate::AppState;

/// Query parameters for listing deliveries
#[derive(Debug, Default, Deserialize)]
pub struct ListDeliveriesQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListDeliveriesQuery {
    fn into_filter(self) -> AppResult<DeliveryFilter> {
        Ok(DeliveryFilter {
            status: Selector::parse(self.status.as_deref())?,
            search: self.search,
        })
    }
}

pub async fn list_deliveries(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListDeliveriesQuery>,
) -> AppResult<Json<Vec<Delivery>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = DeliveryService::new(state.db);
    Ok(Json(service.list(&query.into_filter()?).await?))
}

pub async fn get_delivery_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DeliveryStatusCounts>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = DeliveryService::new(state.db);
    Ok(Json(service.summary().await?))
}

pub async fn create_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateDeliveryInput>,
) -> AppResult<(StatusCode, Json<Delivery>)> {
    current_user.0.require(Permission::ManageDeliveries)?;
    let service = DeliveryService::new(state.db);
    let delivery = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}

pub async fn update_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(delivery_id): Path<Uuid>,
    Json(input): Json<UpdateDeliveryInput>,
) -> AppResult<Json<Delivery>> {
    current_user.0.require(Permission::ManageDeliveries)?;
    let service = DeliveryService::new(state.db);
    Ok(Json(service.update(delivery_id, input).await?))
}

/// Cancel a moving delivery
pub async fn cancel_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(delivery_id): Path<Uuid>,
) -> AppResult<Json<Delivery>> {
    current_user.0.require(Permission::ManageDeliveries)?;
    let service = DeliveryService::new(state.db);
    Ok(Json(service.cancel(delivery_id).await?))
}

/// Mark a moving delivery as delivered
pub async fn complete_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(delivery_id): Path<Uuid>,
) -> AppResult<Json<Delivery>> {
    current_user.0.require(Permission::ManageDeliveries)?;
    let service = DeliveryService::new(state.db);
    Ok(Json(service.deliver(delivery_id).await?))
}
