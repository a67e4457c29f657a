//! Floor Model

use serde::{Deserialize, Serialize};

/// Floor entity (1F, 2F, terrace, ...).
///
/// Older server revisions emitted `floorId` instead of `id`; the alias is
/// accepted on input, `id` is canonical on output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Floor {
    #[serde(alias = "floorId")]
    pub id: i64,
    pub name: String,
}
