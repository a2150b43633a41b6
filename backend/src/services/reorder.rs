//! Reorder service: purchase recommendations and their urgency

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{ReorderPolicy, MAX_LEAD_TIME_DAYS};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    sort_by_urgency, Priority, RecommendationFilter, ReorderAssessment, ReorderRecommendation,
    ReorderSummary,
};
use crate::services::inventory::sku_format;
use crate::services::parse_column;

const REORDER_COLUMNS: &str = r#"
    id, sku, product, store, current_stock, daily_consumption, days_left,
    recommended_order, priority, supplier, estimated_cost, lead_time, category,
    reason, is_processed, processed_at, created_at, updated_at
"#;

/// Reorder service for recommendation records
#[derive(Clone)]
pub struct ReorderService {
    db: PgPool,
    policy: ReorderPolicy,
}

#[derive(Debug, FromRow)]
struct ReorderRow {
    id: Uuid,
    sku: String,
    product: String,
    store: String,
    current_stock: i32,
    daily_consumption: f64,
    days_left: f64,
    recommended_order: i32,
    priority: String,
    supplier: String,
    estimated_cost: Decimal,
    lead_time: i32,
    category: String,
    reason: String,
    is_processed: bool,
    processed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReorderRow> for ReorderRecommendation {
    type Error = AppError;

    fn try_from(row: ReorderRow) -> Result<Self, Self::Error> {
        Ok(ReorderRecommendation {
            id: row.id,
            sku: row.sku,
            product: row.product,
            store: row.store,
            current_stock: row.current_stock,
            daily_consumption: row.daily_consumption,
            days_left: row.days_left,
            recommended_order: row.recommended_order,
            priority: parse_column("reorder_recommendations.priority", &row.priority)?,
            supplier: row.supplier,
            estimated_cost: row.estimated_cost,
            lead_time: row.lead_time,
            category: row.category,
            reason: row.reason,
            is_processed: row.is_processed,
            processed_at: row.processed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Stock position to evaluate without storing anything
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateInput {
    pub current_stock: i64,
    pub daily_consumption: f64,
    pub lead_time: i64,
}

/// Input for creating a recommendation. `daysLeft` is always derived.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReorderInput {
    #[validate(custom = "sku_format")]
    pub sku: String,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product: String,
    #[validate(length(min = 1, message = "Store is required"))]
    pub store: String,
    pub current_stock: i32,
    pub daily_consumption: f64,
    #[validate(range(min = 1, message = "Recommended order must be positive"))]
    pub recommended_order: Option<i32>,
    pub priority: Option<Priority>,
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
    pub estimated_cost: Decimal,
    pub lead_time: i32,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub reason: String,
}

/// Manual overrides on a recommendation
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReorderInput {
    pub current_stock: Option<i32>,
    pub daily_consumption: Option<f64>,
    #[validate(range(min = 1, message = "Recommended order must be positive"))]
    pub recommended_order: Option<i32>,
    pub priority: Option<Priority>,
    #[validate(length(min = 1, message = "Supplier cannot be empty"))]
    pub supplier: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub lead_time: Option<i32>,
    pub reason: Option<String>,
}

fn check_cost(cost: Decimal) -> AppResult<()> {
    shared::validate_positive_amount(cost).map_err(|msg| AppError::validation("estimatedCost", msg))
}

fn check_supplier(supplier: &str) -> AppResult<()> {
    if supplier.trim().is_empty() {
        return Err(AppError::validation("supplier", "Supplier cannot be empty"));
    }
    Ok(())
}

fn narrow(value: i64, field: &str) -> AppResult<i32> {
    i32::try_from(value).map_err(|_| AppError::validation(field, "Value is out of range"))
}

impl UpdateReorderInput {
    /// Apply overrides, re-deriving days left when its inputs change
    fn apply(self, rec: &mut ReorderRecommendation) -> AppResult<()> {
        let stock_changed = self.current_stock.is_some() || self.daily_consumption.is_some();

        if let Some(current_stock) = self.current_stock {
            rec.current_stock = current_stock;
        }
        if let Some(daily_consumption) = self.daily_consumption {
            rec.daily_consumption = daily_consumption;
        }
        if let Some(lead_time) = self.lead_time {
            if !(1..=MAX_LEAD_TIME_DAYS).contains(&i64::from(lead_time)) {
                return Err(AppError::validation(
                    "leadTime",
                    format!("Lead time must be between 1 and {} days", MAX_LEAD_TIME_DAYS),
                ));
            }
            rec.lead_time = lead_time;
        }
        if let Some(recommended_order) = self.recommended_order {
            rec.recommended_order = recommended_order;
        }
        if let Some(priority) = self.priority {
            rec.priority = priority;
        }
        if let Some(supplier) = self.supplier {
            check_supplier(&supplier)?;
            rec.supplier = supplier;
        }
        if let Some(cost) = self.estimated_cost {
            check_cost(cost)?;
            rec.estimated_cost = cost;
        }
        if let Some(reason) = self.reason {
            rec.reason = reason;
        }

        if stock_changed {
            rec.recompute_days_left()?;
        }
        Ok(())
    }
}

impl ReorderService {
    pub fn new(db: PgPool, policy: ReorderPolicy) -> Self {
        Self { db, policy }
    }

    /// Pure evaluation of a stock position under the configured policy
    pub fn evaluate(&self, input: &EvaluateInput) -> AppResult<ReorderAssessment> {
        Ok(self
            .policy
            .assess(input.current_stock, input.daily_consumption, input.lead_time)?)
    }

    async fn fetch_all(&self) -> AppResult<Vec<ReorderRecommendation>> {
        let rows = sqlx::query_as::<_, ReorderRow>(&format!(
            "SELECT {} FROM reorder_recommendations",
            REORDER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ReorderRecommendation::try_from).collect()
    }

    /// Matching recommendations, most urgent first
    pub async fn list(&self, filter: &RecommendationFilter) -> AppResult<Vec<ReorderRecommendation>> {
        let mut records: Vec<_> = self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        sort_by_urgency(&mut records);
        Ok(records)
    }

    pub async fn summary(&self, filter: &RecommendationFilter) -> AppResult<ReorderSummary> {
        let records = self.fetch_all().await?;
        Ok(ReorderSummary::compute(&records, filter))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ReorderRecommendation> {
        let row = sqlx::query_as::<_, ReorderRow>(&format!(
            "SELECT {} FROM reorder_recommendations WHERE id = $1",
            REORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Reorder recommendation".to_string()))?;

        ReorderRecommendation::try_from(row)
    }

    pub async fn create(&self, input: CreateReorderInput) -> AppResult<ReorderRecommendation> {
        input.validate()?;
        check_supplier(&input.supplier)?;
        check_cost(input.estimated_cost)?;

        let assessment = self.policy.assess(
            input.current_stock.into(),
            input.daily_consumption,
            input.lead_time.into(),
        )?;
        let recommended_order = match input.recommended_order {
            Some(order) => order,
            None => narrow(assessment.recommended_order, "recommendedOrder")?,
        };
        let priority = input.priority.unwrap_or(assessment.priority);

        let row = sqlx::query_as::<_, ReorderRow>(&format!(
            r#"
            INSERT INTO reorder_recommendations (
                id, sku, product, store, current_stock, daily_consumption, days_left,
                recommended_order, priority, supplier, estimated_cost, lead_time,
                category, reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            REORDER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.sku)
        .bind(&input.product)
        .bind(&input.store)
        .bind(input.current_stock)
        .bind(input.daily_consumption)
        .bind(assessment.days_left)
        .bind(recommended_order)
        .bind(priority.as_str())
        .bind(&input.supplier)
        .bind(input.estimated_cost)
        .bind(input.lead_time)
        .bind(&input.category)
        .bind(&input.reason)
        .fetch_one(&self.db)
        .await?;

        let rec = ReorderRecommendation::try_from(row)?;
        tracing::info!(
            recommendation_id = %rec.id,
            sku = %rec.sku,
            priority = rec.priority.as_str(),
            "Reorder recommendation created"
        );
        Ok(rec)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateReorderInput,
    ) -> AppResult<ReorderRecommendation> {
        input.validate()?;

        let mut rec = self.get(id).await?;
        input.apply(&mut rec)?;
        self.save(&rec).await?;

        tracing::info!(recommendation_id = %id, "Reorder recommendation updated");
        self.get(id).await
    }

    /// Mark processed. Already-processed records are returned unchanged.
    pub async fn process(&self, id: Uuid) -> AppResult<ReorderRecommendation> {
        let mut rec = self.get(id).await?;
        if !rec.mark_processed(Utc::now()) {
            tracing::debug!(recommendation_id = %id, "Recommendation already processed");
            return Ok(rec);
        }

        sqlx::query(
            r#"
            UPDATE reorder_recommendations
            SET is_processed = TRUE, processed_at = $2, updated_at = NOW()
            WHERE id = $1 AND is_processed = FALSE
            "#,
        )
        .bind(id)
        .bind(rec.processed_at)
        .execute(&self.db)
        .await?;

        tracing::info!(recommendation_id = %id, "Reorder recommendation processed");
        self.get(id).await
    }

    async fn save(&self, rec: &ReorderRecommendation) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE reorder_recommendations
            SET current_stock = $2, daily_consumption = $3, days_left = $4,
                recommended_order = $5, priority = $6, supplier = $7, estimated_cost = $8,
                lead_time = $9, reason = $10, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(rec.id)
        .bind(rec.current_stock)
        .bind(rec.daily_consumption)
        .bind(rec.days_left)
        .bind(rec.recommended_order)
        .bind(rec.priority.as_str())
        .bind(&rec.supplier)
        .bind(rec.estimated_cost)
        .bind(rec.lead_time)
        .bind(&rec.reason)
        .execute(&self.db)
        .await?;
        Ok(())
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
            reason: "Stock critically low".to_string(),
            is_processed: false,
            processed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_stock_edit_rederives_days_left() {
        let mut rec = recommendation();
        UpdateReorderInput {
            current_stock: Some(85),
            ..Default::default()
        }
        .apply(&mut rec)
        .unwrap();
        assert!((rec.days_left - 10.0).abs() < 1e-9);
        assert!(rec.days_left_is_consistent());
    }

    #[test]
    fn test_zero_consumption_rejected() {
        let mut rec = recommendation();
        let err = UpdateReorderInput {
            daily_consumption: Some(0.0),
            ..Default::default()
        }
        .apply(&mut rec)
        .unwrap_err();
        assert!(matches!(err, AppError::Core(_)));
    }

    #[test]
    fn test_overrides_are_checked() {
        let mut rec = recommendation();
        let err = UpdateReorderInput {
            estimated_cost: Some(Decimal::ZERO),
            ..Default::default()
        }
        .apply(&mut rec)
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "estimatedCost"));

        let err = UpdateReorderInput {
            supplier: Some("   ".to_string()),
            ..Default::default()
        }
        .apply(&mut rec)
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "supplier"));

        let input = UpdateReorderInput {
            recommended_order: Some(0),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_cost_override_must_fit_paise_column() {
        for raw in ["12.345", "0.004", "1000000000000"] {
            let mut rec = recommendation();
            let err = UpdateReorderInput {
                estimated_cost: Some(Decimal::from_str(raw).unwrap()),
                ..Default::default()
            }
            .apply(&mut rec)
            .unwrap_err();
            assert!(
                matches!(err, AppError::Validation { ref field, .. } if field == "estimatedCost"),
                "{} accepted",
                raw
            );
            assert_eq!(rec.estimated_cost, Decimal::from_str("12750").unwrap());
        }
    }

    #[test]
    fn test_lead_time_override_bounds() {
        let mut rec = recommendation();
        for lead_time in [0, 366, i32::MAX] {
            let err = UpdateReorderInput {
                lead_time: Some(lead_time),
                ..Default::default()
            }
            .apply(&mut rec)
            .unwrap_err();
            assert!(matches!(err, AppError::Validation { ref field, .. } if field == "leadTime"));
        }
        assert_eq!(rec.lead_time, 3);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_overflowing_lead_time() {
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let service = ReorderService::new(db, ReorderPolicy::default());
        let err = service
            .evaluate(&EvaluateInput {
                current_stock: 10,
                daily_consumption: 1.0,
                lead_time: i64::MAX,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Core(shared::CoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_manual_priority_override_kept() {
        let mut rec = recommendation();
        UpdateReorderInput {
            priority: Some(Priority::Low),
            ..Default::default()
        }
        .apply(&mut rec)
        .unwrap();
        assert_eq!(rec.priority, Priority::Low);
    }
}
