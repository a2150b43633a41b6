//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{InventoryFilter, InventoryItemView, Permission, Selector, StockStatusCounts};
use crate::services::inventory::{CreateInventoryInput, UpdateInventoryInput};
use crate::services::InventoryService;
use crate::AppState;

/// Query parameters for listing inventory
#[derive(Debug, Default, Deserialize)]
pub struct ListInventoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ListInventoryQuery {
    fn into_filter(self) -> AppResult<InventoryFilter> {
        Ok(InventoryFilter {
            category: Selector::parse(self.category.as_deref()).unwrap_or_default(),
            status: Selector::parse(self.status.as_deref())?,
            search: self.search,
        })
    }
}

/// List inventory items with their stock status
pub async fn list_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListInventoryQuery>,
) -> AppResult<Json<Vec<InventoryItemView>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = InventoryService::new(state.db);
    let items = service.list(&query.into_filter()?).await?;
    Ok(Json(items))
}

/// Create an inventory item
pub async fn create_inventory_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<InventoryItemView>)> {
    current_user.0.require(Permission::ManageInventory)?;
    let service = InventoryService::new(state.db);
    let item = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item
pub async fn update_inventory_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateInventoryInput>,
) -> AppResult<Json<InventoryItemView>> {
    current_user.0.require(Permission::ManageInventory)?;
    let service = InventoryService::new(state.db);
    Ok(Json(service.update(item_id, input).await?))
}

/// Count of items per stock status
pub async fn get_inventory_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<StockStatusCounts>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = InventoryService::new(state.db);
    Ok(Json(service.summary().await?))
}
