//! Delivery service: truck tracking and the delivery lifecycle

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::{Coordinates, Delivery, DeliveryFilter, DeliveryStatus, DeliveryStatusCounts};
use crate::services::parse_column;

const DELIVERY_COLUMNS: &str = r#"
    id, truck, driver, route, progress, eta, delay, items, status,
    start_location, end_location, lat, lng, created_at, updated_at
"#;

/// Delivery service for the logistics board
#[derive(Clone)]
pub struct DeliveryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct DeliveryRow {
    id: Uuid,
    truck: String,
    driver: String,
    route: String,
    progress: i32,
    eta: String,
    delay: i32,
    items: i32,
    status: String,
    start_location: String,
    end_location: String,
    lat: Option<f64>,
    lng: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryRow> for Delivery {
    type Error = AppError;

    fn try_from(row: DeliveryRow) -> Result<Self, Self::Error> {
        let coordinates = match (row.lat, row.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };

        Ok(Delivery {
            id: row.id,
            truck: row.truck,
            driver: row.driver,
            route: row.route,
            progress: row.progress,
            eta: row.eta,
            delay: row.delay,
            items: row.items,
            status: parse_column("deliveries.status", &row.status)?,
            start_location: row.start_location,
            end_location: row.end_location,
            coordinates,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn vehicle_registration(truck: &str) -> Result<(), ValidationError> {
    shared::validate_vehicle_registration(truck).map_err(|message| {
        let mut error = ValidationError::new("truck");
        error.message = Some(message.into());
        error
    })
}

fn check_coordinates(coordinates: Option<&Coordinates>) -> AppResult<()> {
    match coordinates {
        Some(c) if !c.is_valid() => Err(AppError::validation(
            "coordinates",
            "Coordinates must be a valid latitude and longitude",
        )),
        _ => Ok(()),
    }
}

/// Input for dispatching a delivery
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryInput {
    #[validate(custom = "vehicle_registration")]
    pub truck: String,
    #[validate(length(min = 1, message = "Driver is required"))]
    pub driver: String,
    #[validate(length(min = 1, message = "Route is required"))]
    pub route: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: i32,
    #[validate(length(min = 1, message = "ETA is required"))]
    pub eta: String,
    #[serde(default)]
    pub delay: i32,
    #[validate(range(min = 0, message = "Item count cannot be negative"))]
    pub items: i32,
    #[serde(default)]
    pub status: DeliveryStatus,
    #[validate(length(min = 1, message = "Start location is required"))]
    pub start_location: String,
    #[validate(length(min = 1, message = "End location is required"))]
    pub end_location: String,
    pub coordinates: Option<Coordinates>,
}

/// Partial update of a delivery. Status changes follow the lifecycle.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryInput {
    #[validate(custom = "vehicle_registration")]
    pub truck: Option<String>,
    #[validate(length(min = 1, message = "Driver cannot be empty"))]
    pub driver: Option<String>,
    #[validate(length(min = 1, message = "Route cannot be empty"))]
    pub route: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub eta: Option<String>,
    pub delay: Option<i32>,
    #[validate(range(min = 0, message = "Item count cannot be negative"))]
    pub items: Option<i32>,
    pub status: Option<DeliveryStatus>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl UpdateDeliveryInput {
    fn apply(self, delivery: &mut Delivery) -> AppResult<()> {
        if let Some(status) = self.status {
            match status {
                DeliveryStatus::Delivered => delivery.mark_delivered()?,
                other => delivery.status = delivery.status.transition_to(other)?,
            }
        }
        if let Some(truck) = self.truck {
            delivery.truck = truck;
        }
        if let Some(driver) = self.driver {
            delivery.driver = driver;
        }
        if let Some(route) = self.route {
            delivery.route = route;
        }
        if let Some(progress) = self.progress {
            delivery.progress = progress;
        }
        if let Some(eta) = self.eta {
            delivery.eta = eta;
        }
        if let Some(delay) = self.delay {
            delivery.delay = delay;
        }
        if let Some(items) = self.items {
            delivery.items = items;
        }
        if let Some(start_location) = self.start_location {
            delivery.start_location = start_location;
        }
        if let Some(end_location) = self.end_location {
            delivery.end_location = end_location;
        }
        if let Some(coordinates) = self.coordinates {
            check_coordinates(Some(&coordinates))?;
            delivery.coordinates = Some(coordinates);
        }
        Ok(())
    }
}

impl DeliveryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn fetch_all(&self) -> AppResult<Vec<Delivery>> {
        let rows = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {} FROM deliveries ORDER BY created_at DESC",
            DELIVERY_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Delivery::try_from).collect()
    }

    /// Matching deliveries, newest first
    pub async fn list(&self, filter: &DeliveryFilter) -> AppResult<Vec<Delivery>> {
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect())
    }

    pub async fn summary(&self) -> AppResult<DeliveryStatusCounts> {
        let deliveries = self.fetch_all().await?;
        Ok(DeliveryStatusCounts::from_statuses(
            deliveries.iter().map(|d| d.status),
        ))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Delivery> {
        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {} FROM deliveries WHERE id = $1",
            DELIVERY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery".to_string()))?;

        Delivery::try_from(row)
    }

    pub async fn create(&self, input: CreateDeliveryInput) -> AppResult<Delivery> {
        input.validate()?;
        check_coordinates(input.coordinates.as_ref())?;

        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            r#"
            INSERT INTO deliveries (id, truck, driver, route, progress, eta, delay, items,
                                    status, start_location, end_location, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            DELIVERY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.truck)
        .bind(&input.driver)
        .bind(&input.route)
        .bind(input.progress)
        .bind(&input.eta)
        .bind(input.delay)
        .bind(input.items)
        .bind(input.status.as_str())
        .bind(&input.start_location)
        .bind(&input.end_location)
        .bind(input.coordinates.map(|c| c.lat))
        .bind(input.coordinates.map(|c| c.lng))
        .fetch_one(&self.db)
        .await?;

        let delivery = Delivery::try_from(row)?;
        tracing::info!(delivery_id = %delivery.id, truck = %delivery.truck, "Delivery created");
        Ok(delivery)
    }

    pub async fn update(&self, id: Uuid, input: UpdateDeliveryInput) -> AppResult<Delivery> {
        input.validate()?;

        let mut delivery = self.get(id).await?;
        input.apply(&mut delivery)?;
        self.save(&delivery).await?;

        tracing::info!(delivery_id = %id, status = delivery.status.as_str(), "Delivery updated");
        self.get(id).await
    }

    pub async fn cancel(&self, id: Uuid) -> AppResult<Delivery> {
        let mut delivery = self.get(id).await?;
        delivery.cancel()?;
        self.save(&delivery).await?;

        tracing::info!(delivery_id = %id, "Delivery cancelled");
        self.get(id).await
    }

    pub async fn deliver(&self, id: Uuid) -> AppResult<Delivery> {
        let mut delivery = self.get(id).await?;
        delivery.mark_delivered()?;
        self.save(&delivery).await?;

        tracing::info!(delivery_id = %id, "Delivery completed");
        self.get(id).await
    }

    async fn save(&self, delivery: &Delivery) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE deliveries
            SET truck = $2, driver = $3, route = $4, progress = $5, eta = $6, delay = $7,
                items = $8, status = $9, start_location = $10, end_location = $11,
                lat = $12, lng = $13, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(delivery.id)
        .bind(&delivery.truck)
        .bind(&delivery.driver)
        .bind(&delivery.route)
        .bind(delivery.progress)
        .bind(&delivery.eta)
        .bind(delivery.delay)
        .bind(delivery.items)
        .bind(delivery.status.as_str())
        .bind(&delivery.start_location)
        .bind(&delivery.end_location)
        .bind(delivery.coordinates.map(|c| c.lat))
        .bind(delivery.coordinates.map(|c| c.lng))
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CoreError;

    fn delivery(status: DeliveryStatus) -> Delivery {
        let now = Utc::now();
        Delivery {
            id: Uuid::new_v4(),
            truck: "MH-18-GH-3456".to_string(),
            driver: "Sunita Yadav".to_string(),
            route: "Mumbai → Kolhapur".to_string(),
            progress: 25,
            eta: "5h 30m".to_string(),
            delay: 45,
            items: 78,
            status,
            start_location: "Mumbai".to_string(),
            end_location: "Kolhapur".to_string(),
            coordinates: Some(Coordinates::new(16.7050, 74.2433)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_update_through_lifecycle() {
        let mut d = delivery(DeliveryStatus::Delayed);
        UpdateDeliveryInput {
            status: Some(DeliveryStatus::Delivered),
            ..Default::default()
        }
        .apply(&mut d)
        .unwrap();
        assert_eq!(d.status, DeliveryStatus::Delivered);
        assert_eq!(d.progress, 100);
    }

    #[test]
    fn test_terminal_status_cannot_move() {
        let mut d = delivery(DeliveryStatus::Cancelled);
        let err = UpdateDeliveryInput {
            status: Some(DeliveryStatus::InTransit),
            ..Default::default()
        }
        .apply(&mut d)
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_truck_registration_validated() {
        let input = UpdateDeliveryInput {
            truck: Some("TRUCK-1".to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(check_coordinates(Some(&Coordinates::new(120.0, 10.0))).is_err());
        assert!(check_coordinates(None).is_ok());
    }
}
