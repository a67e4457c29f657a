//! Ebi Client - POS client core for restaurant service
//!
//! Typed HTTP access to the order backend plus the session-scoped state
//! that a table-service frontend drives: the table board, the order/cart
//! session, the pure accounting calculator and the kitchen ticket poller.
//!
//! All observable state is exposed as `tokio::sync::watch` cells; a UI
//! layer subscribes and re-renders on change.

pub mod accounting;
pub mod board;
pub mod config;
pub mod error;
pub mod http;
pub mod kitchen;
pub mod session;

pub use board::TableBoard;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use kitchen::{KitchenPoller, PollerGuard};
pub use session::{CartLine, OrderSession, SubmitOutcome};

// Re-export shared types for convenience
pub use shared::{ItemStatus, KitchenTicket};
