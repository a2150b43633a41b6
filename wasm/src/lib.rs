//! WebAssembly module for the supply-chain operations dashboard
//!
//! Provides client-side computation for:
//! - Stock status badges
//! - Reorder urgency and pending cost
//! - What-if scenario previews
//! - Supplier scorecard tiers

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reorder::*;
pub use shared::scenario::*;
pub use shared::stock_status::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("supply-chain wasm ready"));
}

fn to_js(err: shared::CoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn json_error(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&format!("Invalid JSON: {}", err))
}

/// Classify a stock level; returns `{"status": ..., "fillPercent": ...}`
#[wasm_bindgen]
pub fn classify_stock(current: i64, optimal: i64) -> Result<String, JsValue> {
    let level = classify(current, optimal).map_err(to_js)?;
    serde_json::to_string(&level).map_err(json_error)
}

/// Badge label shown next to an inventory row
#[wasm_bindgen]
pub fn stock_status_label(current: i64, optimal: i64) -> Result<String, JsValue> {
    stock_label(current, optimal).map_err(to_js)
}

fn stock_label(current: i64, optimal: i64) -> shared::CoreResult<String> {
    Ok(classify(current, optimal)?.status.to_string())
}

#[wasm_bindgen]
pub fn days_left(current_stock: i64, daily_consumption: f64) -> Result<f64, JsValue> {
    compute_days_left(current_stock, daily_consumption).map_err(to_js)
}

/// Priority name (`urgent`, `high`, `medium`, `low`) for a stock position
#[wasm_bindgen]
pub fn reorder_priority(days_left: f64, lead_time_days: i64) -> Result<String, JsValue> {
    derive_priority(days_left, lead_time_days)
        .map(|p| p.as_str().to_string())
        .map_err(to_js)
}

/// Full assessment with the default coverage horizon
#[wasm_bindgen]
pub fn assess_reorder(
    current_stock: i64,
    daily_consumption: f64,
    lead_time_days: i64,
) -> Result<String, JsValue> {
    let assessment = ReorderPolicy::default()
        .assess(current_stock, daily_consumption, lead_time_days)
        .map_err(to_js)?;
    serde_json::to_string(&assessment).map_err(json_error)
}

/// Sum of estimated cost over pending recommendations, as a decimal string.
/// `priority` and `category` narrow the sum; omit them or pass "all" for every record.
#[wasm_bindgen]
pub fn pending_reorder_cost(
    recommendations_json: &str,
    priority: Option<String>,
    category: Option<String>,
) -> Result<String, JsValue> {
    pending_cost(recommendations_json, priority.as_deref(), category.as_deref())
        .map(|total| total.to_string())
        .map_err(|msg| JsValue::from_str(&msg))
}

fn pending_cost(
    recommendations_json: &str,
    priority: Option<&str>,
    category: Option<&str>,
) -> Result<Decimal, String> {
    let records: Vec<ReorderRecommendation> = serde_json::from_str(recommendations_json)
        .map_err(|e| format!("Invalid JSON: {}", e))?;
    let filter = RecommendationFilter {
        priority: Selector::<Priority>::parse(priority).map_err(|e| e.to_string())?,
        category: Selector::parse(category).unwrap_or_default(),
        include_processed: false,
    };
    Ok(total_estimated_cost(&records, &filter))
}

/// Scenario ids for the simulator dropdown
#[wasm_bindgen]
pub fn scenario_ids() -> js_sys::Array {
    ScenarioId::ALL
        .iter()
        .map(|id| JsValue::from_str(id.as_str()))
        .collect()
}

/// Preview a scenario; returns the impact as JSON
#[wasm_bindgen]
pub fn simulate_scenario(scenario: &str, intensity: u32, duration: u32) -> Result<String, JsValue> {
    let impact = simulate_by_id(scenario, intensity, duration).map_err(to_js)?;
    serde_json::to_string(&impact).map_err(json_error)
}

#[wasm_bindgen]
pub fn supplier_tier(on_time_delivery: f64) -> String {
    PerformanceTier::from_on_time(on_time_delivery)
        .as_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stock_json() {
        let json = classify_stock(45, 100).unwrap();
        assert!(json.contains("\"status\":\"low\""));
        assert!(json.contains("\"fillPercent\":45.0"));
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(23, 80).unwrap(), "Critical");
        assert_eq!(stock_label(45, 100).unwrap(), "Low Stock");
        assert!(stock_label(1, 0).is_err());
    }

    #[test]
    fn test_assess_reorder_json() {
        let json = assess_reorder(23, 8.5, 3).unwrap();
        assert!(json.contains("\"priority\":\"urgent\""));
        assert!(json.contains("\"recommendedOrder\":122"));
    }

    #[test]
    fn test_simulate_scenario_json() {
        let json = simulate_scenario("monsoon", 50, 7).unwrap();
        assert!(json.contains("\"inventoryDeltaPct\":-8"));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    fn record_json(priority: &str, category: &str, cost: &str, processed: bool) -> String {
        format!(
            r#"{{"id":"7f1d2c3a-4b5e-4f60-8a71-92b3c4d5e6f7","sku":"PCO-500ML",
            "product":"Parachute Coconut Oil","store":"Jalgaon Central","currentStock":23,
            "dailyConsumption":8.5,"daysLeft":2.7,"recommendedOrder":150,"priority":"{}",
            "supplier":"Hindustan Unilever Ltd","estimatedCost":"{}","leadTime":3,
            "category":"{}","reason":"","isProcessed":{},"processedAt":null,
            "createdAt":"2025-01-15T10:00:00Z","updatedAt":"2025-01-15T10:00:00Z"}}"#,
            priority, cost, category, processed
        )
    }

    #[test]
    fn test_pending_cost_rejects_bad_input() {
        assert!(pending_cost("not json", None, None).is_err());
        assert_eq!(pending_cost("[]", None, None).unwrap(), Decimal::ZERO);
        assert!(pending_cost("[]", Some("critical"), None).is_err());
    }

    #[test]
    fn test_pending_cost_filters() {
        let json = format!(
            "[{},{},{},{}]",
            record_json("urgent", "Personal Care", "12750.50", false),
            record_json("urgent", "Household", "8500.25", false),
            record_json("low", "Household", "999.99", false),
            record_json("urgent", "Household", "4000", true),
        );
        let total = |priority, category| pending_cost(&json, priority, category).unwrap().to_string();

        assert_eq!(total(None, None), "22250.74");
        assert_eq!(total(Some("urgent"), None), "21250.75");
        assert_eq!(total(Some("urgent"), Some("Household")), "8500.25");
        assert_eq!(total(Some("all"), Some("Household")), "9500.24");
    }

    #[test]
    fn test_supplier_tier() {
        assert_eq!(supplier_tier(94.2), "good");
        assert_eq!(supplier_tier(97.0), "excellent");
        assert_eq!(supplier_tier(50.0), "poor");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn scenario_ids_lists_catalog() {
        let ids = scenario_ids();
        assert_eq!(ids.length(), 5);
        assert_eq!(ids.get(0).as_string().unwrap(), "monsoon");
    }

    #[wasm_bindgen_test]
    fn errors_carry_the_message() {
        let err = classify_stock(10, 0).unwrap_err();
        assert!(err.as_string().unwrap().contains("optimal"));

        let err = reorder_priority(4.0, 0).unwrap_err();
        assert!(err.as_string().unwrap().contains("leadTime"));
    }

    #[wasm_bindgen_test]
    fn pending_cost_accepts_missing_filters() {
        assert_eq!(pending_reorder_cost("[]", None, None).unwrap(), "0");
    }
}
