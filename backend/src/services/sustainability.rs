//! Sustainability metrics service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{MetricCategory, MetricTrend, MonthlyValue, SustainabilityMetric};
use crate::services::parse_column;

const METRIC_COLUMNS: &str = r#"
    id, metric, value, unit, target, category, trend, description,
    last_calculated, monthly_data, created_at, updated_at
"#;

#[derive(Clone)]
pub struct SustainabilityService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct MetricRow {
    id: Uuid,
    metric: String,
    value: f64,
    unit: String,
    target: f64,
    category: String,
    trend: String,
    description: String,
    last_calculated: DateTime<Utc>,
    monthly_data: Json<Vec<MonthlyValue>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MetricRow> for SustainabilityMetric {
    type Error = AppError;

    fn try_from(row: MetricRow) -> Result<Self, Self::Error> {
        Ok(SustainabilityMetric {
            id: row.id,
            metric: row.metric,
            value: row.value,
            unit: row.unit,
            target: row.target,
            category: parse_column("sustainability_metrics.category", &row.category)?,
            trend: parse_column("sustainability_metrics.trend", &row.trend)?,
            description: row.description,
            last_calculated: row.last_calculated,
            monthly_data: row.monthly_data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetricInput {
    #[validate(length(min = 1, message = "Metric name is required"))]
    pub metric: String,
    pub value: f64,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub target: f64,
    pub category: MetricCategory,
    pub trend: MetricTrend,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyValue>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMetricInput {
    #[validate(length(min = 1, message = "Metric name cannot be empty"))]
    pub metric: Option<String>,
    pub value: Option<f64>,
    #[validate(length(min = 1, message = "Unit cannot be empty"))]
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub category: Option<MetricCategory>,
    pub trend: Option<MetricTrend>,
    pub description: Option<String>,
    pub monthly_data: Option<Vec<MonthlyValue>>,
}

fn check_finite(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::validation(field, "Value must be a finite number"))
    }
}

fn check_monthly(data: &[MonthlyValue]) -> AppResult<()> {
    for entry in data {
        check_finite("monthlyData", entry.value)?;
    }
    Ok(())
}

impl UpdateMetricInput {
    fn apply(self, metric: &mut SustainabilityMetric) -> AppResult<()> {
        if let Some(value) = self.value {
            check_finite("value", value)?;
            metric.value = value;
        }
        if let Some(target) = self.target {
            check_finite("target", target)?;
            metric.target = target;
        }
        if let Some(monthly_data) = self.monthly_data {
            check_monthly(&monthly_data)?;
            metric.monthly_data = monthly_data;
        }
        if let Some(name) = self.metric {
            metric.metric = name;
        }
        if let Some(unit) = self.unit {
            metric.unit = unit;
        }
        if let Some(category) = self.category {
            metric.category = category;
        }
        if let Some(trend) = self.trend {
            metric.trend = trend;
        }
        if let Some(description) = self.description {
            metric.description = description;
        }
        Ok(())
    }
}

impl SustainabilityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All metrics grouped by category
    pub async fn list(&self) -> AppResult<Vec<SustainabilityMetric>> {
        let rows = sqlx::query_as::<_, MetricRow>(&format!(
            "SELECT {} FROM sustainability_metrics ORDER BY category, metric",
            METRIC_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SustainabilityMetric::try_from).collect()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<SustainabilityMetric> {
        let row = sqlx::query_as::<_, MetricRow>(&format!(
            "SELECT {} FROM sustainability_metrics WHERE id = $1",
            METRIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sustainability metric".to_string()))?;

        SustainabilityMetric::try_from(row)
    }

    pub async fn create(&self, input: CreateMetricInput) -> AppResult<SustainabilityMetric> {
        input.validate()?;
        check_finite("value", input.value)?;
        check_finite("target", input.target)?;
        check_monthly(&input.monthly_data)?;

        let row = sqlx::query_as::<_, MetricRow>(&format!(
            r#"
            INSERT INTO sustainability_metrics (id, metric, value, unit, target, category,
                                                trend, description, monthly_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            METRIC_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.metric)
        .bind(input.value)
        .bind(&input.unit)
        .bind(input.target)
        .bind(input.category.as_str())
        .bind(input.trend.as_str())
        .bind(&input.description)
        .bind(Json(&input.monthly_data))
        .fetch_one(&self.db)
        .await?;

        let metric = SustainabilityMetric::try_from(row)?;
        tracing::info!(metric_id = %metric.id, metric = %metric.metric, "Sustainability metric created");
        Ok(metric)
    }

    /// Partial update; touches `last_calculated`
    pub async fn update(&self, id: Uuid, input: UpdateMetricInput) -> AppResult<SustainabilityMetric> {
        input.validate()?;

        let mut metric = self.get(id).await?;
        input.apply(&mut metric)?;

        let row = sqlx::query_as::<_, MetricRow>(&format!(
            r#"
            UPDATE sustainability_metrics
            SET metric = $2, value = $3, unit = $4, target = $5, category = $6, trend = $7,
                description = $8, monthly_data = $9, last_calculated = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            METRIC_COLUMNS
        ))
        .bind(id)
        .bind(&metric.metric)
        .bind(metric.value)
        .bind(&metric.unit)
        .bind(metric.target)
        .bind(metric.category.as_str())
        .bind(metric.trend.as_str())
        .bind(&metric.description)
        .bind(Json(&metric.monthly_data))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(metric_id = %id, "Sustainability metric updated");
        SustainabilityMetric::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_monthly_value_rejected() {
        let data = vec![
            MonthlyValue {
                month: "Jan".to_string(),
                value: 2950.0,
            },
            MonthlyValue {
                month: "Feb".to_string(),
                value: f64::INFINITY,
            },
        ];
        assert!(check_monthly(&data).is_err());
        assert!(check_monthly(&data[..1]).is_ok());
    }
}
