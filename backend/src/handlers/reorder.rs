//! HTTP handlers for reorder recommendation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{
    Permission, RecommendationFilter, ReorderAssessment, ReorderRecommendation, ReorderSummary,
    Selector,
};
use crate::services::reorder::{CreateReorderInput, EvaluateInput, UpdateReorderInput};
use crate::services::ReorderService;
use crate::AppState;

/// Query parameters for listing recommendations
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReorderQuery {
    pub priority: Option<String>,
    pub category: Option<String>,
    pub include_processed: Option<bool>,
}

impl ListReorderQuery {
    fn into_filter(self) -> AppResult<RecommendationFilter> {
        Ok(RecommendationFilter {
            priority: Selector::parse(self.priority.as_deref())?,
            category: Selector::parse(self.category.as_deref()).unwrap_or_default(),
            include_processed: self.include_processed.unwrap_or(false),
        })
    }
}

fn service(state: AppState) -> ReorderService {
    ReorderService::new(state.db, state.config.reorder.policy())
}

/// List recommendations, most urgent first
pub async fn list_recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListReorderQuery>,
) -> AppResult<Json<Vec<ReorderRecommendation>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let filter = query.into_filter()?;
    Ok(Json(service(state).list(&filter).await?))
}

/// Pending counts and total cost under the same filters as the list
pub async fn get_reorder_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListReorderQuery>,
) -> AppResult<Json<ReorderSummary>> {
    current_user.0.require(Permission::ViewDashboard)?;
    let filter = query.into_filter()?;
    Ok(Json(service(state).summary(&filter).await?))
}

/// Create a recommendation
pub async fn create_recommendation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateReorderInput>,
) -> AppResult<(StatusCode, Json<ReorderRecommendation>)> {
    current_user.0.require(Permission::ManageOrders)?;
    let rec = service(state).create(input).await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

/// Apply manual overrides to a recommendation
pub async fn update_recommendation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recommendation_id): Path<Uuid>,
    Json(input): Json<UpdateReorderInput>,
) -> AppResult<Json<ReorderRecommendation>> {
    current_user.0.require(Permission::ManageOrders)?;
    Ok(Json(service(state).update(recommendation_id, input).await?))
}

/// Mark a recommendation as ordered
pub async fn process_recommendation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recommendation_id): Path<Uuid>,
) -> AppResult<Json<ReorderRecommendation>> {
    current_user.0.require(Permission::ManageOrders)?;
    Ok(Json(service(state).process(recommendation_id).await?))
}

/// Evaluate a stock position without storing it
pub async fn evaluate_stock_position(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<EvaluateInput>,
) -> AppResult<Json<ReorderAssessment>> {
    current_user.0.require(Permission::ViewDashboard)?;
    Ok(Json(service(state).evaluate(&input)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    #[test]
    fn test_default_filter_hides_processed() {
        let filter = ListReorderQuery::default().into_filter().unwrap();
        assert!(!filter.include_processed);
        assert_eq!(filter.priority, Selector::All);
    }

    #[test]
    fn test_priority_filter_parsed() {
        let filter = ListReorderQuery {
            priority: Some("urgent".to_string()),
            category: Some("Household".to_string()),
            include_processed: Some(true),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.priority, Selector::Only(Priority::Urgent));
        assert_eq!(filter.category, Selector::Only("Household".to_string()));
    }
}
