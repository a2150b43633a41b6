//! Stock status classification
//!
//! Derives a status tag from current and optimal stock levels:
//!
//! | fill percent   | status   |
//! |----------------|----------|
//! | below 30       | critical |
//! | 30 up to 60    | low      |
//! | 60 through 120 | optimal  |
//! | above 120      | excess   |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

const CRITICAL_BELOW: f64 = 30.0;
const LOW_BELOW: f64 = 60.0;
const EXCESS_ABOVE: f64 = 120.0;

/// Stock status derived from the fill percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Optimal,
    Excess,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::Critical,
        StockStatus::Low,
        StockStatus::Optimal,
        StockStatus::Excess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Optimal => "optimal",
            StockStatus::Excess => "excess",
        }
    }

    /// Optimal or excess stock needs no action
    pub fn is_healthy(&self) -> bool {
        matches!(self, StockStatus::Optimal | StockStatus::Excess)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Critical => write!(f, "Critical"),
            StockStatus::Low => write!(f, "Low Stock"),
            StockStatus::Optimal => write!(f, "Optimal"),
            StockStatus::Excess => write!(f, "Excess"),
        }
    }
}

impl FromStr for StockStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(StockStatus::Critical),
            "low" => Ok(StockStatus::Low),
            "optimal" => Ok(StockStatus::Optimal),
            "excess" => Ok(StockStatus::Excess),
            other => Err(CoreError::invalid(
                "status",
                format!("unknown stock status '{}'", other),
            )),
        }
    }
}

/// Result of classifying a stock level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub status: StockStatus,
    pub fill_percent: f64,
}

/// Classify a stock level against its optimal target.
///
/// `optimal` must be positive and `current` non-negative.
pub fn classify(current: i64, optimal: i64) -> CoreResult<StockLevel> {
    if optimal <= 0 {
        return Err(CoreError::invalid("optimal", "optimal stock must be positive"));
    }
    if current < 0 {
        return Err(CoreError::invalid("current", "current stock cannot be negative"));
    }

    // Multiply before dividing so exact boundaries (e.g. 3/10) land exactly on 30.0
    let fill_percent = (current as f64 * 100.0) / optimal as f64;

    Ok(StockLevel {
        status: status_for_fill(fill_percent),
        fill_percent,
    })
}

/// Map a fill percentage onto its status band
pub fn status_for_fill(fill_percent: f64) -> StockStatus {
    if fill_percent < CRITICAL_BELOW {
        StockStatus::Critical
    } else if fill_percent < LOW_BELOW {
        StockStatus::Low
    } else if fill_percent > EXCESS_ABOVE {
        StockStatus::Excess
    } else {
        StockStatus::Optimal
    }
}
