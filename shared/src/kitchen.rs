//! Kitchen ticket projection
//!
//! `GET kds/items/pending` returns loosely-keyed JSON maps whose field
//! names have drifted between server revisions. Decoding accepts a fixed
//! set of alias keys per field and fails closed: a record without a usable
//! detail id is dropped (and logged by the caller), never given a
//! fabricated one.

use crate::status::ItemStatus;
use serde_json::Value;

/// One line projected for the kitchen display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenTicket {
    pub detail_id: i64,
    pub order_id: i64,
    pub menu_name: String,
    pub quantity: i32,
    pub status: ItemStatus,
    pub table_label: String,
}

/// Why a pending-items record could not be decoded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TicketDecodeError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no resolvable detail id")]
    MissingDetailId,
    #[error("unrecognized item status: {0:?}")]
    UnknownStatus(String),
}

/// Look up the first present alias and coerce it to an integer. JSON
/// numbers (including float-encoded integers) and digit strings are
/// accepted.
fn int_field(map: &serde_json::Map<String, Value>, aliases: &[&str]) -> Option<i64> {
    for key in aliases {
        if let Some(v) = map.get(*key) {
            match v {
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        return Some(i);
                    }
                    if let Some(f) = n.as_f64() {
                        return Some(f as i64);
                    }
                }
                Value::String(s) => {
                    if let Ok(i) = s.trim().parse::<i64>() {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

fn str_field<'a>(map: &'a serde_json::Map<String, Value>, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|key| map.get(*key)?.as_str())
}

impl KitchenTicket {
    /// Decode one pending-items record.
    ///
    /// Identity (`detail_id`) is mandatory; every other field falls back to
    /// a visible placeholder. Unknown status strings are rejected rather
    /// than passed through.
    pub fn from_value(value: &Value) -> Result<Self, TicketDecodeError> {
        let map = value.as_object().ok_or(TicketDecodeError::NotAnObject)?;

        let detail_id = int_field(map, &["detail_id", "detailId", "id"])
            .ok_or(TicketDecodeError::MissingDetailId)?;

        let status = match str_field(map, &["item_status", "itemStatus", "status"]) {
            Some(s) => ItemStatus::from_wire(s)
                .map_err(|e| TicketDecodeError::UnknownStatus(e.0))?,
            None => ItemStatus::Unprepared,
        };

        Ok(Self {
            detail_id,
            order_id: int_field(map, &["order_id", "orderId"]).unwrap_or(0),
            menu_name: str_field(map, &["menu_name", "menuName", "name"])
                .unwrap_or("(unknown)")
                .to_string(),
            quantity: int_field(map, &["quantity", "qty"]).unwrap_or(1) as i32,
            status,
            table_label: str_field(map, &["table_number", "tableNumber", "table_label"])
                .unwrap_or("-")
                .to_string(),
        })
    }
}
