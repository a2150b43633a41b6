//! Domain models for the supply-chain backend
//!
//! Records and pure rules live in the shared crate so the wasm client
//! classifies stock and simulates scenarios exactly like the server.

pub use shared::models::*;
pub use shared::reorder::{
    sort_by_urgency, Priority, RecommendationFilter, ReorderAssessment, ReorderSummary,
};
pub use shared::scenario::{scenario_catalog, simulate_by_id, ImpactResult, ScenarioSummary};
pub use shared::stock_status::StockStatus;
pub use shared::types::{Coordinates, Selector, SortDirection};
