//! What-if scenario simulator handlers

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{scenario_catalog, simulate_by_id, ImpactResult, Permission, ScenarioSummary};

#[derive(Debug, Deserialize)]
pub struct RunScenarioRequest {
    pub scenario: String,
    /// Percent, 10 to 100
    pub intensity: i64,
    /// Days, 1 to 30
    pub duration: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScenarioResponse {
    pub scenario: String,
    pub name: String,
    #[serde(flatten)]
    pub impact: ImpactResult,
}

fn to_u32(field: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| AppError::validation(field, format!("{} is out of range", field)))
}

/// Available scenarios
pub async fn list_scenarios(current_user: CurrentUser) -> AppResult<Json<Vec<ScenarioSummary>>> {
    current_user.0.require(Permission::ViewDashboard)?;
    Ok(Json(scenario_catalog()))
}

/// Estimate the impact of a disruption scenario
pub async fn run_scenario(
    current_user: CurrentUser,
    Json(body): Json<RunScenarioRequest>,
) -> AppResult<Json<RunScenarioResponse>> {
    current_user.0.require(Permission::ViewDashboard)?;
    run(body).map(Json)
}

fn run(body: RunScenarioRequest) -> AppResult<RunScenarioResponse> {
    let intensity = to_u32("intensity", body.intensity)?;
    let duration = to_u32("duration", body.duration)?;
    let impact = simulate_by_id(&body.scenario, intensity, duration)?;

    let name = scenario_catalog()
        .into_iter()
        .find(|s| s.id.as_str() == body.scenario)
        .map(|s| s.name)
        .unwrap_or_default();

    tracing::debug!(
        scenario = %body.scenario,
        intensity,
        duration,
        severity = ?impact.severity,
        "Scenario simulated"
    );

    Ok(RunScenarioResponse {
        scenario: body.scenario,
        name,
        impact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CoreError;

    fn request(scenario: &str, intensity: i64, duration: i64) -> RunScenarioRequest {
        RunScenarioRequest {
            scenario: scenario.to_string(),
            intensity,
            duration,
        }
    }

    #[test]
    fn test_run_monsoon() {
        let response = run(request("monsoon", 50, 7)).unwrap();
        assert_eq!(response.impact.inventory_delta_pct, -8);
        assert_eq!(response.impact.recovery_days, 14);
        assert!(!response.name.is_empty());
    }

    #[test]
    fn test_unknown_scenario_is_invalid_input() {
        let err = run(request("alien_invasion", 50, 7)).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let err = run(request("monsoon", -5, 7)).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "intensity"));
    }

    #[test]
    fn test_out_of_range_duration_rejected() {
        assert!(run(request("cyber_attack", 50, 31)).is_err());
    }
}
