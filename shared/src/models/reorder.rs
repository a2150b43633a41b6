//! Reorder recommendation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::reorder::{compute_days_left, Priority, DAYS_LEFT_TOLERANCE};

/// A suggested purchase order for one SKU at one store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRecommendation {
    pub id: Uuid,
    pub sku: String,
    pub product: String,
    pub store: String,
    pub current_stock: i32,
    pub daily_consumption: f64,
    /// Always `current_stock / daily_consumption`
    pub days_left: f64,
    pub recommended_order: i32,
    pub priority: Priority,
    pub supplier: String,
    /// Rupees, exact
    pub estimated_cost: Decimal,
    /// Days
    pub lead_time: i32,
    pub category: String,
    pub reason: String,
    pub is_processed: bool,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReorderRecommendation {
    /// Mark as processed. Returns false when it already was.
    pub fn mark_processed(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_processed {
            return false;
        }
        self.is_processed = true;
        self.processed_at = Some(at);
        true
    }

    /// Re-derive `days_left` after a stock or consumption change
    pub fn recompute_days_left(&mut self) -> CoreResult<()> {
        self.days_left = compute_days_left(self.current_stock.into(), self.daily_consumption)?;
        Ok(())
    }

    /// Whether the stored `days_left` agrees with its inputs
    pub fn days_left_is_consistent(&self) -> bool {
        compute_days_left(self.current_stock.into(), self.daily_consumption)
            .map(|expected| (expected - self.days_left).abs() <= DAYS_LEFT_TOLERANCE)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn recommendation() -> ReorderRecommendation {
        let now = Utc::now();
        ReorderRecommendation {
            id: Uuid::new_v4(),
            sku: "PCO-500ML".to_string(),
            product: "Parachute Coconut Oil 500ml".to_string(),
            store: "Jalgaon Central".to_string(),
            current_stock: 23,
            daily_consumption: 8.5,
            days_left: 23.0 / 8.5,
            recommended_order: 150,
            priority: Priority::Urgent,
            supplier: "Hindustan Unilever Ltd".to_string(),
            estimated_cost: Decimal::from_str("12750").unwrap(),
            lead_time: 3,
            category: "Personal Care".to_string(),
            reason: "Stock critically low, high demand expected".to_string(),
            is_processed: false,
            processed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_mark_processed_is_idempotent() {
        let mut rec = recommendation();
        let first = Utc::now();
        assert!(rec.mark_processed(first));
        assert!(!rec.mark_processed(Utc::now()));
        assert!(rec.is_processed);
        assert_eq!(rec.processed_at, Some(first));
    }

    #[test]
    fn test_days_left_consistency() {
        let mut rec = recommendation();
        assert!(rec.days_left_is_consistent());

        rec.current_stock = 40;
        assert!(!rec.days_left_is_consistent());
        rec.recompute_days_left().unwrap();
        assert!(rec.days_left_is_consistent());
    }

    #[test]
    fn test_recompute_rejects_zero_consumption() {
        let mut rec = recommendation();
        rec.daily_consumption = 0.0;
        assert!(rec.recompute_days_left().is_err());
    }
}
