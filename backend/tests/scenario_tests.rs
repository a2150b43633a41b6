//! Scenario impact simulator tests
//!
//! - Deltas scale linearly with intensity and duration, rounded to whole percent
//! - Severity depends only on intensity and never drops as intensity rises
//! - Out-of-range inputs are rejected

use proptest::prelude::*;
use shared::{
    scenario_catalog, simulate, simulate_by_id, CoreError, ScenarioId, Severity, MAX_DURATION_DAYS,
    MAX_INTENSITY, MIN_DURATION_DAYS, MIN_INTENSITY,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_monsoon_half_intensity_one_week() {
        let result = simulate_by_id("monsoon", 50, 7).unwrap();
        assert_eq!(result.inventory_delta_pct, -8);
        assert_eq!(result.delivery_delta_pct, -13);
        assert_eq!(result.cost_delta_pct, 10);
        assert_eq!(result.satisfaction_delta_pct, -9);
        assert_eq!(result.recovery_days, 14);
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.recommendations.len(), 4);
    }

    /// Full intensity over one week returns each profile's raw coefficients
    #[test]
    fn test_reference_profiles_at_full_intensity() {
        let expected = [
            ("monsoon", [-15, -25, 20, -18], 14, Severity::Critical),
            ("supplier_disruption", [-30, -20, 35, -25], 21, Severity::Critical),
            ("demand_surge", [-40, 15, -10, 20], 10, Severity::High),
            ("route_blockage", [-10, -35, 25, -20], 7, Severity::High),
            ("cyber_attack", [-20, -30, 40, -30], 5, Severity::Critical),
        ];

        for (id, deltas, recovery, severity) in expected {
            let result = simulate_by_id(id, 100, 7).unwrap();
            assert_eq!(
                [
                    result.inventory_delta_pct,
                    result.delivery_delta_pct,
                    result.cost_delta_pct,
                    result.satisfaction_delta_pct,
                ],
                deltas,
                "{}",
                id
            );
            assert_eq!(result.recovery_days, recovery, "{}", id);
            assert_eq!(result.severity, severity, "{}", id);
        }
    }

    #[test]
    fn test_route_blockage_half_intensity_two_weeks() {
        let result = simulate(ScenarioId::RouteBlockage, 50, 14).unwrap();
        assert_eq!(result.inventory_delta_pct, -10);
        assert_eq!(result.delivery_delta_pct, -35);
        assert_eq!(result.cost_delta_pct, 25);
        assert_eq!(result.satisfaction_delta_pct, -20);
        assert_eq!(result.recovery_days, 14);
        assert_eq!(result.severity, Severity::Low);
    }

    #[test]
    fn test_cyber_attack_two_weeks() {
        let result = simulate(ScenarioId::CyberAttack, 80, 14).unwrap();
        // 40 * 0.8 * 2
        assert_eq!(result.cost_delta_pct, 64);
        assert_eq!(result.recovery_days, 10);
        assert_eq!(result.severity, Severity::Critical);
    }

    #[test]
    fn test_intensity_bounds() {
        assert!(simulate(ScenarioId::Monsoon, MIN_INTENSITY, 7).is_ok());
        assert!(simulate(ScenarioId::Monsoon, MAX_INTENSITY, 7).is_ok());

        let err = simulate(ScenarioId::Monsoon, MIN_INTENSITY - 1, 7).unwrap_err();
        assert_eq!(err.field(), Some("intensity"));
        assert!(simulate(ScenarioId::Monsoon, MAX_INTENSITY + 1, 7).is_err());
    }

    #[test]
    fn test_duration_bounds() {
        assert!(simulate(ScenarioId::RouteBlockage, 50, MIN_DURATION_DAYS).is_ok());
        assert!(simulate(ScenarioId::RouteBlockage, 50, MAX_DURATION_DAYS).is_ok());

        let err = simulate(ScenarioId::RouteBlockage, 50, 0).unwrap_err();
        assert_eq!(err.field(), Some("duration"));
        assert!(simulate(ScenarioId::RouteBlockage, 50, MAX_DURATION_DAYS + 1).is_err());
    }

    #[test]
    fn test_unknown_scenario() {
        let err = simulate_by_id("locust_swarm", 50, 7).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { ref field, .. } if field == "scenario"));
    }

    #[test]
    fn test_catalog_lists_every_scenario() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.len(), ScenarioId::ALL.len());
        for (summary, id) in catalog.iter().zip(ScenarioId::ALL) {
            assert_eq!(summary.id, id);
            assert!(!summary.name.is_empty());
            assert!(!summary.description.is_empty());
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn scenario_strategy() -> impl Strategy<Value = ScenarioId> {
        prop::sample::select(ScenarioId::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every in-range request succeeds with bounded deltas
        #[test]
        fn prop_in_range_always_simulates(
            scenario in scenario_strategy(),
            intensity in MIN_INTENSITY..=MAX_INTENSITY,
            duration in MIN_DURATION_DAYS..=MAX_DURATION_DAYS,
        ) {
            let result = simulate(scenario, intensity, duration).unwrap();
            // |coefficient| <= 40, intensity <= 1.0, duration multiplier <= 30/7
            for delta in [
                result.inventory_delta_pct,
                result.delivery_delta_pct,
                result.cost_delta_pct,
                result.satisfaction_delta_pct,
            ] {
                prop_assert!(delta.abs() <= 172);
            }
            prop_assert!(result.recovery_days >= 1);
            prop_assert!(!result.recommendations.is_empty());
        }

        /// Severity never decreases as intensity increases
        #[test]
        fn prop_severity_monotone_in_intensity(
            scenario in scenario_strategy(),
            intensity in MIN_INTENSITY..MAX_INTENSITY,
            step in 1u32..50,
            duration in MIN_DURATION_DAYS..=MAX_DURATION_DAYS,
        ) {
            let higher = (intensity + step).min(MAX_INTENSITY);
            let low = simulate(scenario, intensity, duration).unwrap().severity;
            let high = simulate(scenario, higher, duration).unwrap().severity;
            prop_assert!(low <= high);
        }

        /// Severity ignores duration
        #[test]
        fn prop_severity_independent_of_duration(
            scenario in scenario_strategy(),
            intensity in MIN_INTENSITY..=MAX_INTENSITY,
            a in MIN_DURATION_DAYS..=MAX_DURATION_DAYS,
            b in MIN_DURATION_DAYS..=MAX_DURATION_DAYS,
        ) {
            prop_assert_eq!(
                simulate(scenario, intensity, a).unwrap().severity,
                simulate(scenario, intensity, b).unwrap().severity
            );
        }

        /// Deltas keep the sign of the scenario coefficient
        #[test]
        fn prop_delta_sign_follows_coefficient(
            scenario in scenario_strategy(),
            intensity in MIN_INTENSITY..=MAX_INTENSITY,
            duration in MIN_DURATION_DAYS..=MAX_DURATION_DAYS,
        ) {
            let coefficients = scenario.profile().coefficients;
            let result = simulate(scenario, intensity, duration).unwrap();
            for (coefficient, delta) in [
                (coefficients.inventory, result.inventory_delta_pct),
                (coefficients.deliveries, result.delivery_delta_pct),
                (coefficients.cost, result.cost_delta_pct),
                (coefficients.satisfaction, result.satisfaction_delta_pct),
            ] {
                prop_assert!(delta == 0 || (delta > 0) == (coefficient > 0.0));
            }
        }

        /// Intensity outside 10..=100 is always rejected
        #[test]
        fn prop_out_of_range_intensity_rejected(
            scenario in scenario_strategy(),
            intensity in prop_oneof![0u32..MIN_INTENSITY, (MAX_INTENSITY + 1)..1_000],
        ) {
            prop_assert!(simulate(scenario, intensity, 7).is_err());
        }
    }
}

// Severity ordering used by the dashboard badge colours
#[test]
fn test_severity_order() {
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::High < Severity::Critical);
}
