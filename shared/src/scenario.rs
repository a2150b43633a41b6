//! Scenario impact estimation
//!
//! What-if simulator for supply-chain disruptions. Each scenario has a fixed
//! coefficient per metric; a run scales it by intensity and duration:
//!
//! ```text
//! delta    = round(coefficient * intensity / 100 * duration / 7)
//! recovery = round(base_recovery_days * duration / 7)
//! ```
//!
//! Rounding is half away from zero. Severity comes from per-scenario
//! intensity thresholds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

pub const MIN_INTENSITY: u32 = 10;
pub const MAX_INTENSITY: u32 = 100;
pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;

/// Supported disruption scenarios
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    Monsoon,
    SupplierDisruption,
    DemandSurge,
    RouteBlockage,
    CyberAttack,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 5] = [
        ScenarioId::Monsoon,
        ScenarioId::SupplierDisruption,
        ScenarioId::DemandSurge,
        ScenarioId::RouteBlockage,
        ScenarioId::CyberAttack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Monsoon => "monsoon",
            ScenarioId::SupplierDisruption => "supplier_disruption",
            ScenarioId::DemandSurge => "demand_surge",
            ScenarioId::RouteBlockage => "route_blockage",
            ScenarioId::CyberAttack => "cyber_attack",
        }
    }

    pub fn profile(&self) -> &'static ScenarioProfile {
        match self {
            ScenarioId::Monsoon => &MONSOON,
            ScenarioId::SupplierDisruption => &SUPPLIER_DISRUPTION,
            ScenarioId::DemandSurge => &DEMAND_SURGE,
            ScenarioId::RouteBlockage => &ROUTE_BLOCKAGE,
            ScenarioId::CyberAttack => &CYBER_ATTACK,
        }
    }
}

impl FromStr for ScenarioId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CoreError::invalid("scenario", format!("unknown scenario '{}'", s)))
    }
}

/// Qualitative impact tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Per-metric base coefficients, in percent at full intensity over one week
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactCoefficients {
    pub inventory: f64,
    pub deliveries: f64,
    pub cost: f64,
    pub satisfaction: f64,
}

/// Intensity thresholds: above `upper` → `upper_tier`, above `lower` → `lower_tier`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBands {
    pub upper: u32,
    pub upper_tier: Severity,
    pub lower: u32,
    pub lower_tier: Severity,
    pub base_tier: Severity,
}

impl SeverityBands {
    pub fn classify(&self, intensity: u32) -> Severity {
        if intensity > self.upper {
            self.upper_tier
        } else if intensity > self.lower {
            self.lower_tier
        } else {
            self.base_tier
        }
    }
}

/// Fixed definition of one scenario
#[derive(Debug, Clone, Copy)]
pub struct ScenarioProfile {
    pub id: ScenarioId,
    pub name: &'static str,
    pub description: &'static str,
    pub coefficients: ImpactCoefficients,
    pub base_recovery_days: f64,
    pub severity: SeverityBands,
    pub recommendations: &'static [&'static str],
}

static MONSOON: ScenarioProfile = ScenarioProfile {
    id: ScenarioId::Monsoon,
    name: "Monsoon Season Impact",
    description: "Heavy rainfall affecting transportation and demand patterns",
    coefficients: ImpactCoefficients {
        inventory: -15.0,
        deliveries: -25.0,
        cost: 20.0,
        satisfaction: -18.0,
    },
    base_recovery_days: 14.0,
    severity: SeverityBands {
        upper: 75,
        upper_tier: Severity::Critical,
        lower: 50,
        lower_tier: Severity::High,
        base_tier: Severity::Medium,
    },
    recommendations: &[
        "Increase umbrella and rainwear inventory by 300%",
        "Activate backup transportation routes",
        "Pre-position inventory in affected regions",
        "Implement weather-based demand forecasting",
    ],
};

static SUPPLIER_DISRUPTION: ScenarioProfile = ScenarioProfile {
    id: ScenarioId::SupplierDisruption,
    name: "Major Supplier Disruption",
    description: "Key supplier facing production issues",
    coefficients: ImpactCoefficients {
        inventory: -30.0,
        deliveries: -20.0,
        cost: 35.0,
        satisfaction: -25.0,
    },
    base_recovery_days: 21.0,
    severity: SeverityBands {
        upper: 70,
        upper_tier: Severity::Critical,
        lower: 45,
        lower_tier: Severity::High,
        base_tier: Severity::Medium,
    },
    recommendations: &[
        "Activate secondary suppliers immediately",
        "Implement product substitution strategies",
        "Increase safety stock for critical items",
        "Diversify supplier base to reduce dependency",
    ],
};

static DEMAND_SURGE: ScenarioProfile = ScenarioProfile {
    id: ScenarioId::DemandSurge,
    name: "Festival Demand Surge",
    description: "Unexpected high demand during festival season",
    coefficients: ImpactCoefficients {
        inventory: -40.0,
        deliveries: 15.0,
        cost: -10.0,
        satisfaction: 20.0,
    },
    base_recovery_days: 10.0,
    severity: SeverityBands {
        upper: 80,
        upper_tier: Severity::High,
        lower: 60,
        lower_tier: Severity::Medium,
        base_tier: Severity::Low,
    },
    recommendations: &[
        "Emergency procurement from all suppliers",
        "Implement dynamic pricing strategies",
        "Increase delivery capacity by 50%",
        "Activate seasonal workforce",
    ],
};

static ROUTE_BLOCKAGE: ScenarioProfile = ScenarioProfile {
    id: ScenarioId::RouteBlockage,
    name: "Major Route Blockage",
    description: "Highway closure affecting multiple delivery routes",
    coefficients: ImpactCoefficients {
        inventory: -10.0,
        deliveries: -35.0,
        cost: 25.0,
        satisfaction: -20.0,
    },
    base_recovery_days: 7.0,
    severity: SeverityBands {
        upper: 75,
        upper_tier: Severity::High,
        lower: 50,
        lower_tier: Severity::Medium,
        base_tier: Severity::Low,
    },
    recommendations: &[
        "Activate alternative transportation routes",
        "Use air freight for critical deliveries",
        "Implement local sourcing strategies",
        "Communicate delays to customers proactively",
    ],
};

static CYBER_ATTACK: ScenarioProfile = ScenarioProfile {
    id: ScenarioId::CyberAttack,
    name: "Cyber Security Incident",
    description: "System outage affecting operations",
    coefficients: ImpactCoefficients {
        inventory: -20.0,
        deliveries: -30.0,
        cost: 40.0,
        satisfaction: -30.0,
    },
    base_recovery_days: 5.0,
    severity: SeverityBands {
        upper: 60,
        upper_tier: Severity::Critical,
        lower: 40,
        lower_tier: Severity::High,
        base_tier: Severity::Medium,
    },
    recommendations: &[
        "Activate manual backup systems",
        "Implement emergency communication protocols",
        "Engage cybersecurity incident response team",
        "Prioritize critical operations restoration",
    ],
};

/// Modeled outcome of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    pub inventory_delta_pct: i64,
    pub delivery_delta_pct: i64,
    pub cost_delta_pct: i64,
    pub satisfaction_delta_pct: i64,
    pub recommendations: Vec<String>,
    pub recovery_days: i64,
    pub severity: Severity,
}

/// Catalog entry for scenario pickers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioSummary {
    pub id: ScenarioId,
    pub name: String,
    pub description: String,
}

pub fn scenario_catalog() -> Vec<ScenarioSummary> {
    ScenarioId::ALL
        .iter()
        .map(|id| {
            let profile = id.profile();
            ScenarioSummary {
                id: *id,
                name: profile.name.to_string(),
                description: profile.description.to_string(),
            }
        })
        .collect()
}

/// Run a scenario at the given intensity (10–100 %) and duration (1–30 days)
pub fn simulate(
    scenario: ScenarioId,
    intensity_percent: u32,
    duration_days: u32,
) -> CoreResult<ImpactResult> {
    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity_percent) {
        return Err(CoreError::invalid(
            "intensity",
            format!(
                "intensity must be between {} and {} percent",
                MIN_INTENSITY, MAX_INTENSITY
            ),
        ));
    }
    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&duration_days) {
        return Err(CoreError::invalid(
            "duration",
            format!(
                "duration must be between {} and {} days",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS
            ),
        ));
    }

    let profile = scenario.profile();
    let base_impact = f64::from(intensity_percent) / 100.0;
    let duration_multiplier = f64::from(duration_days) / 7.0;
    let scale = |coefficient: f64| (coefficient * base_impact * duration_multiplier).round() as i64;

    Ok(ImpactResult {
        inventory_delta_pct: scale(profile.coefficients.inventory),
        delivery_delta_pct: scale(profile.coefficients.deliveries),
        cost_delta_pct: scale(profile.coefficients.cost),
        satisfaction_delta_pct: scale(profile.coefficients.satisfaction),
        recommendations: profile
            .recommendations
            .iter()
            .map(|r| r.to_string())
            .collect(),
        recovery_days: (profile.base_recovery_days * duration_multiplier).round() as i64,
        severity: profile.severity.classify(intensity_percent),
    })
}

/// Parse a scenario identifier and run it
pub fn simulate_by_id(
    scenario_id: &str,
    intensity_percent: u32,
    duration_days: u32,
) -> CoreResult<ImpactResult> {
    simulate(scenario_id.parse()?, intensity_percent, duration_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monsoon_half_intensity_one_week() {
        let result = simulate(ScenarioId::Monsoon, 50, 7).unwrap();
        // -7.5 rounds away from zero
        assert_eq!(result.inventory_delta_pct, -8);
        assert_eq!(result.delivery_delta_pct, -13);
        assert_eq!(result.cost_delta_pct, 10);
        assert_eq!(result.satisfaction_delta_pct, -9);
        assert_eq!(result.recovery_days, 14);
        assert_eq!(result.severity, Severity::Medium);
    }

    #[test]
    fn test_monsoon_full_intensity() {
        let result = simulate(ScenarioId::Monsoon, 100, 7).unwrap();
        assert_eq!(result.inventory_delta_pct, -15);
        assert_eq!(result.delivery_delta_pct, -25);
        assert_eq!(result.severity, Severity::Critical);
    }

    #[test]
    fn test_duration_scales_recovery() {
        let result = simulate(ScenarioId::SupplierDisruption, 100, 14).unwrap();
        assert_eq!(result.inventory_delta_pct, -60);
        assert_eq!(result.cost_delta_pct, 70);
        assert_eq!(result.recovery_days, 42);
    }

    #[test]
    fn test_severity_thresholds_are_per_scenario() {
        assert_eq!(simulate(ScenarioId::Monsoon, 75, 7).unwrap().severity, Severity::High);
        assert_eq!(simulate(ScenarioId::Monsoon, 76, 7).unwrap().severity, Severity::Critical);
        assert_eq!(simulate(ScenarioId::CyberAttack, 61, 7).unwrap().severity, Severity::Critical);
        assert_eq!(simulate(ScenarioId::DemandSurge, 60, 7).unwrap().severity, Severity::Low);
        assert_eq!(simulate(ScenarioId::DemandSurge, 90, 7).unwrap().severity, Severity::High);
        assert_eq!(simulate(ScenarioId::RouteBlockage, 51, 7).unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_demand_surge_positive_deltas() {
        let result = simulate(ScenarioId::DemandSurge, 100, 7).unwrap();
        assert_eq!(result.inventory_delta_pct, -40);
        assert_eq!(result.delivery_delta_pct, 15);
        assert_eq!(result.cost_delta_pct, -10);
        assert_eq!(result.satisfaction_delta_pct, 20);
    }

    #[test]
    fn test_unknown_scenario_is_rejected() {
        let err = simulate_by_id("alien_invasion", 50, 7).unwrap_err();
        assert_eq!(err.field(), Some("scenario"));
    }

    #[test]
    fn test_out_of_range_parameters() {
        assert!(simulate(ScenarioId::Monsoon, 9, 7).is_err());
        assert!(simulate(ScenarioId::Monsoon, 101, 7).is_err());
        assert!(simulate(ScenarioId::Monsoon, 50, 0).is_err());
        assert!(simulate(ScenarioId::Monsoon, 50, 31).is_err());
    }

    #[test]
    fn test_catalog_lists_every_scenario() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].name, "Monsoon Season Impact");
        for entry in &catalog {
            assert_eq!(entry.id.profile().recommendations.len(), 4);
        }
    }
}
