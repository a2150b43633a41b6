//! HTTP handlers for the supply-chain dashboard API

pub mod auth;
pub mod dashboard;
pub mod delivery;
pub mod health;
pub mod inventory;
pub mod reorder;
pub mod seed;
pub mod simulator;
pub mod supplier;
pub mod sustainability;
pub mod user;

pub use auth::*;
pub use dashboard::*;
pub use delivery::*;
pub use health::*;
pub use inventory::*;
pub use reorder::*;
pub use seed::*;
pub use simulator::*;
pub use supplier::*;
pub use sustainability::*;
pub use user::*;
