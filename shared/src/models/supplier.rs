//! Supplier scorecard models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::SortDirection;

/// A supplier and its performance figures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Percentages, 0–100
    pub on_time_delivery: f64,
    /// Days
    pub avg_delay: f64,
    pub quality_score: f64,
    pub cost_efficiency: f64,
    pub sustainability_score: f64,
    pub total_orders: i32,
    /// 1–5
    pub rating: f64,
    pub contact: SupplierContact,
    pub performance: SupplierPerformance,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_on_time(self.on_time_delivery)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupplierContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPerformance {
    pub last_month: Option<f64>,
    #[serde(default)]
    pub trend: SupplierTrend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupplierTrend {
    Up,
    Down,
    #[default]
    Stable,
}

/// Scorecard badge derived from on-time delivery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Poor,
    Average,
    Good,
    Excellent,
}

impl PerformanceTier {
    pub fn from_on_time(on_time_delivery: f64) -> Self {
        if on_time_delivery >= 95.0 {
            PerformanceTier::Excellent
        } else if on_time_delivery >= 90.0 {
            PerformanceTier::Good
        } else if on_time_delivery >= 80.0 {
            PerformanceTier::Average
        } else {
            PerformanceTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Poor => "poor",
            PerformanceTier::Average => "average",
            PerformanceTier::Good => "good",
            PerformanceTier::Excellent => "excellent",
        }
    }
}

/// Supplier with its derived tier
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierView {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub tier: PerformanceTier,
}

impl From<Supplier> for SupplierView {
    fn from(supplier: Supplier) -> Self {
        let tier = supplier.tier();
        Self { supplier, tier }
    }
}

/// Column a supplier table can be sorted by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SupplierSortField {
    Name,
    #[default]
    OnTimeDelivery,
    AvgDelay,
    QualityScore,
    CostEfficiency,
    SustainabilityScore,
    Rating,
    TotalOrders,
}

impl FromStr for SupplierSortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SupplierSortField::Name),
            "onTimeDelivery" => Ok(SupplierSortField::OnTimeDelivery),
            "avgDelay" => Ok(SupplierSortField::AvgDelay),
            "qualityScore" => Ok(SupplierSortField::QualityScore),
            "costEfficiency" => Ok(SupplierSortField::CostEfficiency),
            "sustainabilityScore" => Ok(SupplierSortField::SustainabilityScore),
            "rating" => Ok(SupplierSortField::Rating),
            "totalOrders" => Ok(SupplierSortField::TotalOrders),
            other => Err(CoreError::invalid(
                "sort",
                format!("cannot sort suppliers by '{}'", other),
            )),
        }
    }
}

fn compare(a: &Supplier, b: &Supplier, field: SupplierSortField) -> Ordering {
    match field {
        SupplierSortField::Name => a.name.cmp(&b.name),
        SupplierSortField::OnTimeDelivery => a.on_time_delivery.total_cmp(&b.on_time_delivery),
        SupplierSortField::AvgDelay => a.avg_delay.total_cmp(&b.avg_delay),
        SupplierSortField::QualityScore => a.quality_score.total_cmp(&b.quality_score),
        SupplierSortField::CostEfficiency => a.cost_efficiency.total_cmp(&b.cost_efficiency),
        SupplierSortField::SustainabilityScore => {
            a.sustainability_score.total_cmp(&b.sustainability_score)
        }
        SupplierSortField::Rating => a.rating.total_cmp(&b.rating),
        SupplierSortField::TotalOrders => a.total_orders.cmp(&b.total_orders),
    }
}

pub fn sort_suppliers(suppliers: &mut [Supplier], field: SupplierSortField, direction: SortDirection) {
    suppliers.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Distinct categories, sorted
pub fn supplier_categories(suppliers: &[Supplier]) -> Vec<String> {
    let mut categories: Vec<String> = suppliers.iter().map(|s| s.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}
