//! Supplier service: scorecards and rankings

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::{
    sort_suppliers, supplier_categories, Selector, SortDirection, Supplier, SupplierContact,
    SupplierPerformance, SupplierSortField, SupplierView,
};

const SUPPLIER_COLUMNS: &str = r#"
    id, name, category, on_time_delivery, avg_delay, quality_score, cost_efficiency,
    sustainability_score, total_orders, rating, contact, performance, created_at, updated_at
"#;

#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    category: String,
    on_time_delivery: f64,
    avg_delay: f64,
    quality_score: f64,
    cost_efficiency: f64,
    sustainability_score: f64,
    total_orders: i32,
    rating: f64,
    contact: Json<SupplierContact>,
    performance: Json<SupplierPerformance>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            category: row.category,
            on_time_delivery: row.on_time_delivery,
            avg_delay: row.avg_delay,
            quality_score: row.quality_score,
            cost_efficiency: row.cost_efficiency,
            sustainability_score: row.sustainability_score,
            total_orders: row.total_orders,
            rating: row.rating,
            contact: row.contact.0,
            performance: row.performance.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// List options for the scorecard table
#[derive(Debug, Clone, Default)]
pub struct SupplierQuery {
    pub category: Selector<String>,
    pub sort: SupplierSortField,
    pub direction: SortDirection,
}

fn percentage(value: f64) -> Result<(), ValidationError> {
    shared::validate_percentage(value).map_err(|message| {
        let mut error = ValidationError::new("percentage");
        error.message = Some(message.into());
        error
    })
}

fn validate_rating_value(value: f64) -> Result<(), ValidationError> {
    shared::validate_rating(value).map_err(|message| {
        let mut error = ValidationError::new("rating");
        error.message = Some(message.into());
        error
    })
}

fn check_contact(contact: &SupplierContact) -> AppResult<()> {
    if let Some(email) = contact.email.as_deref() {
        shared::validate_email(email).map_err(|msg| AppError::validation("contact.email", msg))?;
    }
    if let Some(phone) = contact.phone.as_deref() {
        shared::validate_indian_phone(phone)
            .map_err(|msg| AppError::validation("contact.phone", msg))?;
    }
    Ok(())
}

fn check_avg_delay(avg_delay: f64) -> AppResult<()> {
    if !avg_delay.is_finite() || avg_delay < 0.0 {
        return Err(AppError::validation(
            "avgDelay",
            "Average delay must be a non-negative number",
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(custom = "percentage")]
    pub on_time_delivery: f64,
    pub avg_delay: f64,
    #[validate(custom = "percentage")]
    pub quality_score: f64,
    #[validate(custom = "percentage")]
    pub cost_efficiency: f64,
    #[validate(custom = "percentage")]
    pub sustainability_score: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Total orders cannot be negative"))]
    pub total_orders: i32,
    #[validate(custom = "validate_rating_value")]
    pub rating: f64,
    #[serde(default)]
    pub contact: SupplierContact,
    #[serde(default)]
    pub performance: SupplierPerformance,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    #[validate(custom = "percentage")]
    pub on_time_delivery: Option<f64>,
    pub avg_delay: Option<f64>,
    #[validate(custom = "percentage")]
    pub quality_score: Option<f64>,
    #[validate(custom = "percentage")]
    pub cost_efficiency: Option<f64>,
    #[validate(custom = "percentage")]
    pub sustainability_score: Option<f64>,
    #[validate(range(min = 0, message = "Total orders cannot be negative"))]
    pub total_orders: Option<i32>,
    #[validate(custom = "validate_rating_value")]
    pub rating: Option<f64>,
    pub contact: Option<SupplierContact>,
    pub performance: Option<SupplierPerformance>,
}

impl UpdateSupplierInput {
    fn apply(self, supplier: &mut Supplier) -> AppResult<()> {
        if let Some(avg_delay) = self.avg_delay {
            check_avg_delay(avg_delay)?;
            supplier.avg_delay = avg_delay;
        }
        if let Some(contact) = self.contact {
            check_contact(&contact)?;
            supplier.contact = contact;
        }
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(category) = self.category {
            supplier.category = category;
        }
        if let Some(on_time) = self.on_time_delivery {
            supplier.on_time_delivery = on_time;
        }
        if let Some(quality) = self.quality_score {
            supplier.quality_score = quality;
        }
        if let Some(cost) = self.cost_efficiency {
            supplier.cost_efficiency = cost;
        }
        if let Some(sustainability) = self.sustainability_score {
            supplier.sustainability_score = sustainability;
        }
        if let Some(total_orders) = self.total_orders {
            supplier.total_orders = total_orders;
        }
        if let Some(rating) = self.rating {
            supplier.rating = rating;
        }
        if let Some(performance) = self.performance {
            supplier.performance = performance;
        }
        Ok(())
    }
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn fetch_all(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(&format!(
            "SELECT {} FROM suppliers",
            SUPPLIER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    pub async fn list(&self, query: &SupplierQuery) -> AppResult<Vec<SupplierView>> {
        let mut suppliers: Vec<Supplier> = self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|s| query.category.matches(&s.category))
            .collect();
        sort_suppliers(&mut suppliers, query.sort, query.direction);
        Ok(suppliers.into_iter().map(SupplierView::from).collect())
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        Ok(supplier_categories(&self.fetch_all().await?))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        sqlx::query_as::<_, SupplierRow>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .map(Supplier::from)
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<SupplierView> {
        input.validate()?;
        check_avg_delay(input.avg_delay)?;
        check_contact(&input.contact)?;

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            r#"
            INSERT INTO suppliers (id, name, category, on_time_delivery, avg_delay, quality_score,
                                   cost_efficiency, sustainability_score, total_orders, rating,
                                   contact, performance)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.on_time_delivery)
        .bind(input.avg_delay)
        .bind(input.quality_score)
        .bind(input.cost_efficiency)
        .bind(input.sustainability_score)
        .bind(input.total_orders)
        .bind(input.rating)
        .bind(Json(&input.contact))
        .bind(Json(&input.performance))
        .fetch_one(&self.db)
        .await?;

        let supplier = Supplier::from(row);
        tracing::info!(supplier_id = %supplier.id, name = %supplier.name, "Supplier created");
        Ok(supplier.into())
    }

    pub async fn update(&self, id: Uuid, input: UpdateSupplierInput) -> AppResult<SupplierView> {
        input.validate()?;

        let mut supplier = self.get(id).await?;
        input.apply(&mut supplier)?;

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            r#"
            UPDATE suppliers
            SET name = $2, category = $3, on_time_delivery = $4, avg_delay = $5,
                quality_score = $6, cost_efficiency = $7, sustainability_score = $8,
                total_orders = $9, rating = $10, contact = $11, performance = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(id)
        .bind(&supplier.name)
        .bind(&supplier.category)
        .bind(supplier.on_time_delivery)
        .bind(supplier.avg_delay)
        .bind(supplier.quality_score)
        .bind(supplier.cost_efficiency)
        .bind(supplier.sustainability_score)
        .bind(supplier.total_orders)
        .bind(supplier.rating)
        .bind(Json(&supplier.contact))
        .bind(Json(&supplier.performance))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = %id, "Supplier updated");
        Ok(Supplier::from(row).into())
    }
}
