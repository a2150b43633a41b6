//! Shared types and computations for the supply-chain operations dashboard
//!
//! This crate contains the domain records and the pure computations used by
//! the backend and, via WASM, by the dashboard itself:
//! - stock status classification
//! - reorder recommendation engine
//! - scenario impact simulation

pub mod error;
pub mod models;
pub mod reorder;
pub mod scenario;
pub mod stock_status;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use reorder::*;
pub use scenario::*;
pub use stock_status::*;
pub use types::*;
pub use validation::*;
