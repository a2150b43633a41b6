//! Sustainability metric models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityMetric {
    pub id: Uuid,
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub target: f64,
    pub category: MetricCategory,
    pub trend: MetricTrend,
    pub description: String,
    pub last_calculated: DateTime<Utc>,
    pub monthly_data: Vec<MonthlyValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SustainabilityMetric {
    /// Value as a percentage of target; None when the target is zero
    pub fn target_progress(&self) -> Option<f64> {
        if self.target == 0.0 {
            None
        } else {
            Some(self.value / self.target * 100.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyValue {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Carbon,
    Waste,
    Energy,
    Water,
    Packaging,
}

impl MetricCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::Carbon => "carbon",
            MetricCategory::Waste => "waste",
            MetricCategory::Energy => "energy",
            MetricCategory::Water => "water",
            MetricCategory::Packaging => "packaging",
        }
    }
}

impl FromStr for MetricCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carbon" => Ok(MetricCategory::Carbon),
            "waste" => Ok(MetricCategory::Waste),
            "energy" => Ok(MetricCategory::Energy),
            "water" => Ok(MetricCategory::Water),
            "packaging" => Ok(MetricCategory::Packaging),
            other => Err(CoreError::invalid(
                "category",
                format!("unknown metric category '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricTrend {
    Improving,
    Declining,
    Stable,
}

impl MetricTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricTrend::Improving => "improving",
            MetricTrend::Declining => "declining",
            MetricTrend::Stable => "stable",
        }
    }
}

impl FromStr for MetricTrend {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improving" => Ok(MetricTrend::Improving),
            "declining" => Ok(MetricTrend::Declining),
            "stable" => Ok(MetricTrend::Stable),
            other => Err(CoreError::invalid(
                "trend",
                format!("unknown metric trend '{}'", other),
            )),
        }
    }
}
