//! Order line status
//!
//! The backend historically emitted a mixed vocabulary for line status:
//! Japanese labels for the kitchen stages, an uppercase English literal for
//! cancellation, and a few English spellings introduced by later server
//! revisions. This module maps every observed wire string onto one closed
//! enumeration and fails closed on anything unrecognized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Preparation / settlement status of a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemStatus {
    /// Not yet started (未調理)
    #[default]
    Unprepared,
    /// Being prepared (調理中)
    Cooking,
    /// Delivered to the table (提供済)
    Served,
    /// Settled (会計済)
    Paid,
    /// Cancelled
    Cancelled,
}

/// Error for an unrecognized wire status string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized item status: {0:?}")]
pub struct UnknownStatus(pub String);

impl ItemStatus {
    /// Canonical wire representation.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ItemStatus::Unprepared => "未調理",
            ItemStatus::Cooking => "調理中",
            ItemStatus::Served => "提供済",
            ItemStatus::Paid => "会計済",
            ItemStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parse a wire string, accepting the alias spellings observed across
    /// server revisions.
    pub fn from_wire(s: &str) -> Result<Self, UnknownStatus> {
        match s {
            "未調理" | "UNPREPARED" => Ok(ItemStatus::Unprepared),
            "調理中" | "COOKING" => Ok(ItemStatus::Cooking),
            "提供済" | "SERVED" => Ok(ItemStatus::Served),
            "会計済" | "PAID" => Ok(ItemStatus::Paid),
            "CANCELLED" | "cancelled" | "キャンセル" => Ok(ItemStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }

    /// Next stage in the kitchen workflow, driven by explicit staff action.
    ///
    /// Unprepared → Cooking → Served. Served, paid and cancelled lines have
    /// no further kitchen transition.
    pub fn kitchen_next(&self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Unprepared => Some(ItemStatus::Cooking),
            ItemStatus::Cooking => Some(ItemStatus::Served),
            _ => None,
        }
    }

    /// Whether this line can still be settled (individually or as part of
    /// a split). Paid and cancelled lines are excluded.
    pub fn is_settleable(&self) -> bool {
        !matches!(self, ItemStatus::Paid | ItemStatus::Cancelled)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}

impl Serialize for ItemStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ItemStatus::from_wire(&s).map_err(serde::de::Error::custom)
    }
}
