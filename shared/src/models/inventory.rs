//! Inventory tracking models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::stock_status::{classify, StockLevel, StockStatus};
use crate::types::{matches_search, Selector};

/// A tracked product at a store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub product: String,
    pub store: String,
    pub current: i32,
    /// Target stock level, always positive
    pub optimal: i32,
    pub predicted: i32,
    /// Signed percentage change
    pub trend: f64,
    pub category: String,
    pub sku: String,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn stock_level(&self) -> CoreResult<StockLevel> {
        classify(self.current.into(), self.optimal.into())
    }
}

/// Inventory item annotated with its derived stock status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub stock_status: StockStatus,
    pub fill_percent: f64,
}

impl InventoryItemView {
    pub fn new(item: InventoryItem) -> CoreResult<Self> {
        let level = item.stock_level()?;
        Ok(Self {
            item,
            stock_status: level.status,
            fill_percent: level.fill_percent,
        })
    }
}

/// Filters applied to the inventory list
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Matched against product and store names
    pub search: Option<String>,
    pub category: Selector<String>,
    pub status: Selector<StockStatus>,
}

impl InventoryFilter {
    pub fn matches(&self, view: &InventoryItemView) -> bool {
        matches_search(
            self.search.as_deref(),
            &[&view.item.product, &view.item.store],
        ) && self.category.matches(&view.item.category)
            && self.status.matches(&view.stock_status)
    }
}

/// Count of items per stock status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockStatusCounts {
    pub total: u32,
    pub critical: u32,
    pub low: u32,
    pub optimal: u32,
    pub excess: u32,
}

impl StockStatusCounts {
    pub fn record(&mut self, status: StockStatus) {
        self.total += 1;
        match status {
            StockStatus::Critical => self.critical += 1,
            StockStatus::Low => self.low += 1,
            StockStatus::Optimal => self.optimal += 1,
            StockStatus::Excess => self.excess += 1,
        }
    }

    pub fn from_statuses(statuses: impl IntoIterator<Item = StockStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status);
        }
        counts
    }

    /// Items at optimal or excess level
    pub fn healthy(&self) -> u32 {
        self.optimal + self.excess
    }
}
