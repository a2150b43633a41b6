//! Stock status classification tests
//!
//! - Every valid stock level lands in exactly one band
//! - Band edges are inclusive/exclusive as the dashboard shows them
//! - Invalid targets are rejected instead of producing NaN or Infinity

use proptest::prelude::*;
use shared::{classify, status_for_fill, CoreError, StockStatus, StockStatusCounts};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Edges with an optimal of 100 units
    #[test]
    fn test_band_edges() {
        let cases = [
            (0, StockStatus::Critical),
            (29, StockStatus::Critical),
            (30, StockStatus::Low),
            (59, StockStatus::Low),
            (60, StockStatus::Optimal),
            (120, StockStatus::Optimal),
            (121, StockStatus::Excess),
        ];

        for (current, expected) in cases {
            let level = classify(current, 100).unwrap();
            assert_eq!(level.status, expected, "current = {}", current);
        }
    }

    /// 3 of 10 is exactly 30 percent, so low rather than critical
    #[test]
    fn test_exact_fraction_boundary() {
        let level = classify(3, 10).unwrap();
        assert_eq!(level.fill_percent, 30.0);
        assert_eq!(level.status, StockStatus::Low);
    }

    /// Reference stock from the Maharashtra stores
    #[test]
    fn test_reference_items() {
        assert_eq!(classify(45, 100).unwrap().status, StockStatus::Low);
        assert_eq!(classify(234, 200).unwrap().status, StockStatus::Optimal);
        assert_eq!(classify(23, 80).unwrap().status, StockStatus::Critical);
        assert_eq!(classify(156, 120).unwrap().status, StockStatus::Excess);
    }

    #[test]
    fn test_zero_optimal_is_invalid_input() {
        let err = classify(10, 0).unwrap_err();
        assert_eq!(err.field(), Some("optimal"));
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_current_is_invalid_input() {
        let err = classify(-1, 100).unwrap_err();
        assert_eq!(err.field(), Some("current"));
    }

    #[test]
    fn test_status_counts() {
        let counts = StockStatusCounts::from_statuses([
            StockStatus::Critical,
            StockStatus::Low,
            StockStatus::Low,
            StockStatus::Optimal,
            StockStatus::Excess,
        ]);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.low, 2);
        assert_eq!(counts.healthy(), 2);
    }

    #[test]
    fn test_status_names() {
        for status in StockStatus::ALL {
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), status);
        }
        assert!("overflowing".parse::<StockStatus>().is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any non-negative stock against a positive target classifies to a finite fill
        #[test]
        fn prop_classification_is_total(current in 0i64..100_000, optimal in 1i64..100_000) {
            let level = classify(current, optimal).unwrap();
            prop_assert!(level.fill_percent.is_finite());
            prop_assert!(level.fill_percent >= 0.0);
            prop_assert_eq!(level.status, status_for_fill(level.fill_percent));
        }

        /// Bands agree with exact integer arithmetic
        #[test]
        fn prop_bands_match_integer_comparison(current in 0i64..10_000, optimal in 1i64..10_000) {
            let status = classify(current, optimal).unwrap().status;
            let scaled = current * 100;
            let expected = if scaled < 30 * optimal {
                StockStatus::Critical
            } else if scaled < 60 * optimal {
                StockStatus::Low
            } else if scaled > 120 * optimal {
                StockStatus::Excess
            } else {
                StockStatus::Optimal
            };
            prop_assert_eq!(status, expected);
        }

        /// More stock never moves an item to a lower band
        #[test]
        fn prop_monotone_in_stock(current in 0i64..10_000, extra in 0i64..1_000, optimal in 1i64..10_000) {
            let before = classify(current, optimal).unwrap().status;
            let after = classify(current + extra, optimal).unwrap().status;
            prop_assert!(rank(after) >= rank(before));
        }

        /// Non-positive targets always fail
        #[test]
        fn prop_non_positive_optimal_rejected(current in 0i64..10_000, optimal in -1_000i64..=0) {
            prop_assert!(classify(current, optimal).is_err());
        }
    }

    fn rank(status: StockStatus) -> u8 {
        match status {
            StockStatus::Critical => 0,
            StockStatus::Low => 1,
            StockStatus::Optimal => 2,
            StockStatus::Excess => 3,
        }
    }
}
