//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Wire value marking an occupied table.
pub const TABLE_STATUS_OCCUPIED: &str = "OCCUPIED";

/// Table status as reported by `GET tables/status`.
///
/// Tables are created server-side; the client only reads occupancy and the
/// linkage to an active order / menu book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStatus {
    pub id: i64,
    pub floor_id: i64,
    pub status: String,
    pub capacity: i32,
    /// Active order bound to this table, if any.
    #[serde(default)]
    pub order_id: Option<i64>,
    /// Menu book bound to this table, if any.
    #[serde(default)]
    pub book_id: Option<i64>,
}

impl TableStatus {
    pub fn is_occupied(&self) -> bool {
        self.status == TABLE_STATUS_OCCUPIED
    }

    /// The linked order id, if the table has a live one. Some server
    /// revisions send `0` for "none"; treat non-positive ids as absent.
    pub fn active_order_id(&self) -> Option<i64> {
        self.order_id.filter(|id| *id > 0)
    }
}
