//! Business logic services for the supply-chain dashboard

use std::str::FromStr;

use shared::CoreError;

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod dashboard;
pub mod delivery;
pub mod inventory;
pub mod reorder;
pub mod seed;
pub mod supplier;
pub mod sustainability;
pub mod user;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use delivery::DeliveryService;
pub use inventory::InventoryService;
pub use reorder::ReorderService;
pub use seed::SeedService;
pub use supplier::SupplierService;
pub use sustainability::SustainabilityService;
pub use user::UserService;

/// Parse an enum stored as text. A bad value is a data fault, not a client error.
pub(crate) fn parse_column<T>(column: &str, value: &str) -> AppResult<T>
where
    T: FromStr<Err = CoreError>,
{
    value.parse::<T>().map_err(|e| {
        AppError::Internal(format!("Unreadable value in {}: {}", column, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeliveryStatus;

    #[test]
    fn test_parse_column() {
        let status: DeliveryStatus = parse_column("deliveries.status", "in-transit").unwrap();
        assert_eq!(status, DeliveryStatus::InTransit);
        assert!(matches!(
            parse_column::<DeliveryStatus>("deliveries.status", "lost"),
            Err(AppError::Internal(_))
        ));
    }
}
