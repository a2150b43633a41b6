//! Domain records for the supply-chain operations dashboard

mod delivery;
mod inventory;
mod reorder;
mod supplier;
mod sustainability;
mod user;

pub use delivery::*;
pub use inventory::*;
pub use reorder::*;
pub use supplier::*;
pub use sustainability::*;
pub use user::*;
