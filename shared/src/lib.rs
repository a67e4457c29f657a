//! Shared types for the ebi POS client
//!
//! Wire models and domain types shared by any consumer of the POS backend
//! API: tables, floors, menu catalog, order DTOs, accounting snapshots,
//! the item-status enumeration, and the kitchen ticket projection.

pub mod kitchen;
pub mod models;
pub mod order;
pub mod status;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use kitchen::KitchenTicket;
pub use status::ItemStatus;
