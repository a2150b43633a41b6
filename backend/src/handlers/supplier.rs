//! HTTP handlers for supplier scorecard endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Permission, Selector, SupplierView};
use crate::services::supplier::{CreateSupplierInput, SupplierQuery, UpdateSupplierInput};
use crate::services::SupplierService;
use crate::AppState;

/// Query parameters for the scorecard table
#[derive(Debug, Default, Deserialize)]
pub struct ListSuppliersQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListSuppliersQuery {
    fn into_query(self) -> AppResult<SupplierQuery> {
        Ok(SupplierQuery {
            category: Selector::parse(self.category.as_deref()).unwrap_or_default(),
            sort: match self.sort.as_deref() {
                Some(field) => field.parse()?,
                None => Default::default(),
            },
            direction: match self.direction.as_deref() {
                Some(direction) => direction.parse()?,
                None => Default::default(),
            },
        })
    }
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListSuppliersQuery>,
) -> AppResult<Json<Vec<SupplierView>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = SupplierService::new(state.db);
    Ok(Json(service.list(&query.into_query()?).await?))
}

/// Distinct supplier categories for the filter dropdown
pub async fn list_supplier_categories(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<String>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let service = SupplierService::new(state.db);
    Ok(Json(service.categories().await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<SupplierView>)> {
    current_user.0.require(Permission::ManageSuppliers)?;
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<SupplierView>> {
    current_user.0.require(Permission::ManageSuppliers)?;
    let service = SupplierService::new(state.db);
    Ok(Json(service.update(supplier_id, input).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortDirection, SupplierSortField};

    #[test]
    fn test_default_sort_is_on_time_descending() {
        let query = ListSuppliersQuery::default().into_query().unwrap();
        assert_eq!(query.sort, SupplierSortField::OnTimeDelivery);
        assert_eq!(query.direction, SortDirection::Desc);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let query = ListSuppliersQuery {
            sort: Some("colour".to_string()),
            ..Default::default()
        };
        assert!(query.into_query().is_err());
    }
}
