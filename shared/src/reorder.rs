//! Reorder recommendation engine
//!
//! Projects days-left-to-stockout from consumption, classifies urgency against
//! supplier lead time and aggregates the cost of pending orders.
//!
//! Priority policy, with `lead` the supplier lead time in days:
//! - `urgent` when days left ≤ lead
//! - `high` when days left ≤ 2 × lead
//! - `medium` when days left ≤ 3 × lead
//! - `low` otherwise

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::models::ReorderRecommendation;
use crate::types::Selector;

/// Tolerance when comparing a stored days-left value to a recomputed one
pub const DAYS_LEFT_TOLERANCE: f64 = 1e-6;

/// Default number of days of consumption an order should cover beyond lead time
pub const DEFAULT_COVERAGE_DAYS: u32 = 14;

/// Longest supplier lead time accepted, in days
pub const MAX_LEAD_TIME_DAYS: i64 = 365;

fn check_lead_time(lead_time_days: i64) -> CoreResult<()> {
    if !(1..=MAX_LEAD_TIME_DAYS).contains(&lead_time_days) {
        return Err(CoreError::invalid(
            "leadTime",
            format!("lead time must be between 1 and {} days", MAX_LEAD_TIME_DAYS),
        ));
    }
    Ok(())
}

/// Reorder urgency tier. Ordered from most to least urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(CoreError::invalid(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

/// Days until stock runs out at the given daily consumption
pub fn compute_days_left(current_stock: i64, daily_consumption: f64) -> CoreResult<f64> {
    if current_stock < 0 {
        return Err(CoreError::invalid(
            "currentStock",
            "current stock cannot be negative",
        ));
    }
    if !daily_consumption.is_finite() || daily_consumption <= 0.0 {
        return Err(CoreError::invalid(
            "dailyConsumption",
            "daily consumption must be a positive number",
        ));
    }
    Ok(current_stock as f64 / daily_consumption)
}

/// Classify urgency from projected days left and supplier lead time
pub fn derive_priority(days_left: f64, lead_time_days: i64) -> CoreResult<Priority> {
    if !days_left.is_finite() || days_left < 0.0 {
        return Err(CoreError::invalid(
            "daysLeft",
            "days left must be a non-negative number",
        ));
    }
    check_lead_time(lead_time_days)?;

    let lead = lead_time_days as f64;
    let priority = if days_left <= lead {
        Priority::Urgent
    } else if days_left <= 2.0 * lead {
        Priority::High
    } else if days_left <= 3.0 * lead {
        Priority::Medium
    } else {
        Priority::Low
    };
    Ok(priority)
}

/// Outcome of evaluating a stock position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAssessment {
    pub days_left: f64,
    pub priority: Priority,
    pub recommended_order: i64,
}

/// Order sizing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderPolicy {
    /// Days of consumption to cover after the order arrives
    pub coverage_days: u32,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            coverage_days: DEFAULT_COVERAGE_DAYS,
        }
    }
}

impl ReorderPolicy {
    pub fn new(coverage_days: u32) -> Self {
        Self { coverage_days }
    }

    /// Units needed to cover lead time plus the coverage window, never less than one
    pub fn recommended_order(
        &self,
        current_stock: i64,
        daily_consumption: f64,
        lead_time_days: i64,
    ) -> CoreResult<i64> {
        // Validates stock and consumption
        compute_days_left(current_stock, daily_consumption)?;
        check_lead_time(lead_time_days)?;

        let horizon = (lead_time_days + i64::from(self.coverage_days)) as f64;
        let target = (daily_consumption * horizon).ceil();
        // 2^63 and above would saturate the cast
        if target >= i64::MAX as f64 {
            return Err(CoreError::invalid(
                "dailyConsumption",
                "daily consumption is too large to size an order",
            ));
        }
        Ok((target as i64 - current_stock).max(1))
    }

    pub fn assess(
        &self,
        current_stock: i64,
        daily_consumption: f64,
        lead_time_days: i64,
    ) -> CoreResult<ReorderAssessment> {
        let days_left = compute_days_left(current_stock, daily_consumption)?;
        let priority = derive_priority(days_left, lead_time_days)?;
        let recommended_order =
            self.recommended_order(current_stock, daily_consumption, lead_time_days)?;

        Ok(ReorderAssessment {
            days_left,
            priority,
            recommended_order,
        })
    }
}

/// Filters applied to the recommendation list. Both selectors are ANDed.
#[derive(Debug, Clone, Default)]
pub struct RecommendationFilter {
    pub priority: Selector<Priority>,
    pub category: Selector<String>,
    pub include_processed: bool,
}

impl RecommendationFilter {
    pub fn matches(&self, rec: &ReorderRecommendation) -> bool {
        (self.include_processed || !rec.is_processed)
            && self.priority.matches(&rec.priority)
            && self.category.matches(&rec.category)
    }
}

/// Exact sum of estimated cost over unprocessed recommendations matching the filter
pub fn total_estimated_cost<'a, I>(records: I, filter: &RecommendationFilter) -> Decimal
where
    I: IntoIterator<Item = &'a ReorderRecommendation>,
{
    records
        .into_iter()
        .filter(|r| !r.is_processed && filter.matches(r))
        .map(|r| r.estimated_cost)
        .sum()
}

/// Sort most urgent first, then by fewest days left
pub fn sort_by_urgency(records: &mut [ReorderRecommendation]) {
    records.sort_by(|a, b| match a.priority.cmp(&b.priority) {
        Ordering::Equal => a.days_left.total_cmp(&b.days_left),
        other => other,
    });
}

/// Pending recommendation totals for the reorder page header
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSummary {
    pub pending: u32,
    pub urgent: u32,
    pub high: u32,
    pub total_estimated_cost: Decimal,
}

impl ReorderSummary {
    /// `pending` and the cost follow the filter; urgent and high counts cover all pending records
    pub fn compute(records: &[ReorderRecommendation], filter: &RecommendationFilter) -> Self {
        let pending_matching = records
            .iter()
            .filter(|r| !r.is_processed && filter.matches(r))
            .count() as u32;
        let count_pending = |priority: Priority| {
            records
                .iter()
                .filter(|r| !r.is_processed && r.priority == priority)
                .count() as u32
        };

        Self {
            pending: pending_matching,
            urgent: count_pending(Priority::Urgent),
            high: count_pending(Priority::High),
            total_estimated_cost: total_estimated_cost(records, filter),
        }
    }
}
