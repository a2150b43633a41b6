//! Delivery tracking models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{matches_search, Coordinates, Selector};

/// Delivery status. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    #[default]
    InTransit,
    Delivered,
    Delayed,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::InTransit => "in-transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Delayed => "delayed",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }

    /// Only moving deliveries (in transit or delayed) change status
    pub fn can_transition_to(&self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, next),
            (InTransit, Delayed)
                | (Delayed, InTransit)
                | (InTransit, Delivered)
                | (Delayed, Delivered)
                | (InTransit, Cancelled)
                | (Delayed, Cancelled)
        )
    }

    pub fn transition_to(&self, next: DeliveryStatus) -> CoreResult<DeliveryStatus> {
        if *self == next || self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-transit" => Ok(DeliveryStatus::InTransit),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "delayed" => Ok(DeliveryStatus::Delayed),
            "cancelled" => Ok(DeliveryStatus::Cancelled),
            other => Err(CoreError::invalid(
                "status",
                format!("unknown delivery status '{}'", other),
            )),
        }
    }
}

/// A truck delivery in progress or completed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub truck: String,
    pub driver: String,
    pub route: String,
    /// 0–100
    pub progress: i32,
    pub eta: String,
    /// Minutes; negative means early
    pub delay: i32,
    pub items: i32,
    pub status: DeliveryStatus,
    pub start_location: String,
    pub end_location: String,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.status = self.status.transition_to(DeliveryStatus::Cancelled)?;
        Ok(())
    }

    pub fn mark_delivered(&mut self) -> CoreResult<()> {
        self.status = self.status.transition_to(DeliveryStatus::Delivered)?;
        self.progress = 100;
        Ok(())
    }

    /// Human readable delay, e.g. "+30m delay", "15m early", "On time"
    pub fn delay_label(&self) -> String {
        match self.delay {
            d if d > 0 => format!("+{}m delay", d),
            d if d < 0 => format!("{}m early", d.abs()),
            _ => "On time".to_string(),
        }
    }
}

/// Filters applied to the delivery list
#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    /// Matched against truck, driver and route
    pub search: Option<String>,
    pub status: Selector<DeliveryStatus>,
}

impl DeliveryFilter {
    pub fn matches(&self, delivery: &Delivery) -> bool {
        matches_search(
            self.search.as_deref(),
            &[&delivery.truck, &delivery.driver, &delivery.route],
        ) && self.status.matches(&delivery.status)
    }
}

/// Count of deliveries per status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatusCounts {
    pub total: u32,
    pub in_transit: u32,
    pub delivered: u32,
    pub delayed: u32,
    pub cancelled: u32,
}

impl DeliveryStatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = DeliveryStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                DeliveryStatus::InTransit => counts.in_transit += 1,
                DeliveryStatus::Delivered => counts.delivered += 1,
                DeliveryStatus::Delayed => counts.delayed += 1,
                DeliveryStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(status: DeliveryStatus, delay: i32) -> Delivery {
        let now = Utc::now();
        Delivery {
            id: Uuid::new_v4(),
            truck: "MH-12-AB-1234".to_string(),
            driver: "Rajesh Kumar".to_string(),
            route: "Mumbai → Jalgaon".to_string(),
            progress: 75,
            eta: "2h 15m".to_string(),
            delay,
            items: 45,
            status,
            start_location: "Mumbai".to_string(),
            end_location: "Jalgaon".to_string(),
            coordinates: Some(Coordinates::new(20.0504, 75.5648)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_cancel_from_moving_states() {
        let mut d = delivery(DeliveryStatus::InTransit, 0);
        assert!(d.cancel().is_ok());
        assert_eq!(d.status, DeliveryStatus::Cancelled);

        let mut d = delivery(DeliveryStatus::Delayed, 45);
        assert!(d.cancel().is_ok());
    }

    #[test]
    fn test_terminal_states_reject_changes() {
        let mut d = delivery(DeliveryStatus::Delivered, 0);
        assert!(matches!(d.cancel(), Err(CoreError::InvalidTransition { .. })));

        let mut d = delivery(DeliveryStatus::Cancelled, 0);
        assert!(d.mark_delivered().is_err());
        assert_eq!(d.status, DeliveryStatus::Cancelled);
    }

    #[test]
    fn test_mark_delivered_completes_progress() {
        let mut d = delivery(DeliveryStatus::InTransit, 0);
        d.mark_delivered().unwrap();
        assert_eq!(d.progress, 100);
        assert!(d.status.is_terminal());
    }

    #[test]
    fn test_delay_label() {
        assert_eq!(delivery(DeliveryStatus::InTransit, 30).delay_label(), "+30m delay");
        assert_eq!(delivery(DeliveryStatus::InTransit, -15).delay_label(), "15m early");
        assert_eq!(delivery(DeliveryStatus::InTransit, 0).delay_label(), "On time");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InTransit).unwrap(),
            "\"in-transit\""
        );
        assert_eq!("in-transit".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::InTransit);
    }

    #[test]
    fn test_filter_searches_driver() {
        let filter = DeliveryFilter {
            search: Some("rajesh".to_string()),
            status: Selector::Only(DeliveryStatus::InTransit),
        };
        assert!(filter.matches(&delivery(DeliveryStatus::InTransit, 0)));
        assert!(!filter.matches(&delivery(DeliveryStatus::Delayed, 0)));
    }
}
