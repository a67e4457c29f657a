//! Payment Method Model

use serde::{Deserialize, Serialize};

/// Payment method offered at checkout, as listed in the accounting
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub payment_id: i64,
    pub method_name: String,
}
