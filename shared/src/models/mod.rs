//! Data models
//!
//! Shared between the client library and any frontend (via API).
//! All IDs are `i64`, all amounts are integer currency units.

pub mod dining_table;
pub mod floor;
pub mod menu;
pub mod payment;

// Re-exports
pub use dining_table::*;
pub use floor::*;
pub use menu::*;
pub use payment::*;
