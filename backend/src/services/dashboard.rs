//! Dashboard overview figures

use rust_decimal::Decimal;
use serde::Serialize;
use shared::ReorderPolicy;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::RecommendationFilter;
use crate::services::{DeliveryService, InventoryService, ReorderService};

#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
    policy: ReorderPolicy,
}

/// Headline counts for the overview page
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub inventory_items: u32,
    pub critical_items: u32,
    pub low_items: u32,
    pub active_deliveries: u32,
    pub delayed_deliveries: u32,
    pub pending_reorders: u32,
    pub urgent_reorders: u32,
    pub pending_reorder_cost: Decimal,
}

impl DashboardService {
    pub fn new(db: PgPool, policy: ReorderPolicy) -> Self {
        Self { db, policy }
    }

    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        let stock = InventoryService::new(self.db.clone()).summary().await?;
        let deliveries = DeliveryService::new(self.db.clone()).summary().await?;
        let reorders = ReorderService::new(self.db.clone(), self.policy)
            .summary(&RecommendationFilter::default())
            .await?;

        Ok(DashboardSummary {
            inventory_items: stock.total,
            critical_items: stock.critical,
            low_items: stock.low,
            active_deliveries: deliveries.in_transit,
            delayed_deliveries: deliveries.delayed,
            pending_reorders: reorders.pending,
            urgent_reorders: reorders.urgent,
            pending_reorder_cost: reorders.total_estimated_cost,
        })
    }
}
