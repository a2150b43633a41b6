//! Inventory service: stock records and their derived health

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::{InventoryFilter, InventoryItem, InventoryItemView, StockStatusCounts};

const INVENTORY_COLUMNS: &str = r#"
    id, product, store, current, optimal, predicted, trend, category, sku,
    last_updated, created_at, updated_at
"#;

/// Inventory service for stock records
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct InventoryRow {
    id: Uuid,
    product: String,
    store: String,
    current: i32,
    optimal: i32,
    predicted: i32,
    trend: f64,
    category: String,
    sku: String,
    last_updated: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        InventoryItem {
            id: row.id,
            product: row.product,
            store: row.store,
            current: row.current,
            optimal: row.optimal,
            predicted: row.predicted,
            trend: row.trend,
            category: row.category,
            sku: row.sku,
            last_updated: row.last_updated,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(crate) fn sku_format(sku: &str) -> Result<(), ValidationError> {
    shared::validate_sku(sku).map_err(|message| {
        let mut error = ValidationError::new("sku");
        error.message = Some(message.into());
        error
    })
}

/// Input for creating an inventory record
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryInput {
    #[validate(length(min = 1, message = "Product is required"))]
    pub product: String,
    #[validate(length(min = 1, message = "Store is required"))]
    pub store: String,
    #[validate(range(min = 0, message = "Current stock cannot be negative"))]
    pub current: i32,
    #[validate(range(min = 1, message = "Optimal stock must be positive"))]
    pub optimal: i32,
    #[validate(range(min = 0, message = "Predicted stock cannot be negative"))]
    pub predicted: i32,
    #[serde(default)]
    pub trend: f64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(custom = "sku_format")]
    pub sku: String,
}

/// Partial update of an inventory record
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryInput {
    #[validate(length(min = 1, message = "Product cannot be empty"))]
    pub product: Option<String>,
    #[validate(length(min = 1, message = "Store cannot be empty"))]
    pub store: Option<String>,
    #[validate(range(min = 0, message = "Current stock cannot be negative"))]
    pub current: Option<i32>,
    #[validate(range(min = 1, message = "Optimal stock must be positive"))]
    pub optimal: Option<i32>,
    #[validate(range(min = 0, message = "Predicted stock cannot be negative"))]
    pub predicted: Option<i32>,
    pub trend: Option<f64>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    #[validate(custom = "sku_format")]
    pub sku: Option<String>,
}

impl UpdateInventoryInput {
    fn apply(self, item: &mut InventoryItem) {
        if let Some(product) = self.product {
            item.product = product;
        }
        if let Some(store) = self.store {
            item.store = store;
        }
        if let Some(current) = self.current {
            item.current = current;
        }
        if let Some(optimal) = self.optimal {
            item.optimal = optimal;
        }
        if let Some(predicted) = self.predicted {
            item.predicted = predicted;
        }
        if let Some(trend) = self.trend {
            item.trend = trend;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(sku) = self.sku {
            item.sku = sku;
        }
    }
}

fn check_trend(trend: f64) -> AppResult<()> {
    if trend.is_finite() {
        Ok(())
    } else {
        Err(AppError::validation("trend", "Trend must be a finite number"))
    }
}

impl InventoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn fetch_all(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {} FROM inventory_items ORDER BY last_updated DESC",
            INVENTORY_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    /// Items with their stock status, most recently updated first
    pub async fn list(&self, filter: &InventoryFilter) -> AppResult<Vec<InventoryItemView>> {
        let mut views = Vec::new();
        for item in self.fetch_all().await? {
            let view = InventoryItemView::new(item)?;
            if filter.matches(&view) {
                views.push(view);
            }
        }
        Ok(views)
    }

    pub async fn get(&self, item_id: Uuid) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = $1",
            INVENTORY_COLUMNS
        ))
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .map(InventoryItem::from)
        .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))
    }

    pub async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryItemView> {
        input.validate()?;
        check_trend(input.trend)?;
        self.ensure_sku_free(&input.sku, None).await?;

        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            INSERT INTO inventory_items (id, product, store, current, optimal, predicted,
                                         trend, category, sku, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.product)
        .bind(&input.store)
        .bind(input.current)
        .bind(input.optimal)
        .bind(input.predicted)
        .bind(input.trend)
        .bind(&input.category)
        .bind(&input.sku)
        .fetch_one(&self.db)
        .await?;

        let view = InventoryItemView::new(row.into())?;
        tracing::info!(item_id = %view.item.id, sku = %view.item.sku, "Inventory item created");
        Ok(view)
    }

    /// Partial update; touches `last_updated`
    pub async fn update(
        &self,
        item_id: Uuid,
        input: UpdateInventoryInput,
    ) -> AppResult<InventoryItemView> {
        input.validate()?;
        if let Some(trend) = input.trend {
            check_trend(trend)?;
        }
        if let Some(sku) = input.sku.as_deref() {
            self.ensure_sku_free(sku, Some(item_id)).await?;
        }

        let mut item = self.get(item_id).await?;
        input.apply(&mut item);
        // Reject before writing a record that cannot be classified
        item.stock_level()?;

        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            r#"
            UPDATE inventory_items
            SET product = $2, store = $3, current = $4, optimal = $5, predicted = $6,
                trend = $7, category = $8, sku = $9, last_updated = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(item_id)
        .bind(&item.product)
        .bind(&item.store)
        .bind(item.current)
        .bind(item.optimal)
        .bind(item.predicted)
        .bind(item.trend)
        .bind(&item.category)
        .bind(&item.sku)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(item_id = %item_id, "Inventory item updated");
        Ok(InventoryItemView::new(row.into())?)
    }

    /// Count of items per stock status
    pub async fn summary(&self) -> AppResult<StockStatusCounts> {
        let mut counts = StockStatusCounts::default();
        for item in self.fetch_all().await? {
            counts.record(item.stock_level()?.status);
        }
        Ok(counts)
    }

    async fn ensure_sku_free(&self, sku: &str, except: Option<Uuid>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM inventory_items WHERE sku = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(sku)
        .bind(except)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }
        Ok(())
    }
}
