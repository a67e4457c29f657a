//! Order wire DTOs
//!
//! Request/response payloads for the order, accounting, split and merge
//! endpoints. The canonical contract: client-originated requests are
//! camelCase, responses are snake_case except the accounting snapshot and
//! the split response, which the backend emits camelCase.

use crate::models::PaymentMethod;
use crate::status::ItemStatus;
use serde::{Deserialize, Serialize};

/// POST `order/start` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOrderRequest {
    pub table_id: i64,
    pub book_id: i64,
    pub customer_count: i32,
}

/// POST `order/start` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOrderResponse {
    pub order_id: i64,
    #[serde(default)]
    pub message: String,
}

/// POST `order/add` request — one staged cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub order_id: i64,
    pub menu_id: i64,
    pub quantity: i32,
    /// Unit price captured at add-to-cart time.
    pub price_at_order: i64,
    pub subtotal: i64,
    pub item_status: ItemStatus,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub option_ids: Vec<i64>,
    /// Display text for selected options, joined with commas.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options_text: Option<String>,
}

/// POST `order/add` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub detail_id: i64,
    #[serde(default)]
    pub message: String,
}

/// One line within a fetched accounting snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInfo {
    pub detail_id: i64,
    pub menu_id: i64,
    pub quantity: i32,
    pub subtotal: i64,
    pub item_status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options_text: Option<String>,
}

/// Header of a fetched accounting snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountingHeader {
    pub order_id: i64,
    pub total_amount: i64,
    pub order_status: String,
}

/// GET `accounting/details/{orderId}` response.
///
/// Treated as an immutable read of server state until the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountingSnapshot {
    #[serde(default)]
    pub header: Option<AccountingHeader>,
    #[serde(default)]
    pub details: Vec<OrderLineInfo>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl AccountingSnapshot {
    pub fn total_amount(&self) -> i64 {
        self.header.as_ref().map(|h| h.total_amount).unwrap_or(0)
    }

    /// Lines still eligible for settlement (not paid, not cancelled).
    pub fn settleable_lines(&self) -> impl Iterator<Item = &OrderLineInfo> {
        self.details.iter().filter(|d| d.item_status.is_settleable())
    }
}

/// POST `accounting/complete` request. `discount_id` 1 means "no discount".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAccountingRequest {
    pub order_id: i64,
    pub payment_id: i64,
    pub payment_amount: i64,
    pub discount_id: i64,
    pub discount_value: i64,
}

impl CompleteAccountingRequest {
    /// Settlement without discount.
    pub fn new(order_id: i64, payment_id: i64, payment_amount: i64) -> Self {
        Self {
            order_id,
            payment_id,
            payment_amount,
            discount_id: 1,
            discount_value: 0,
        }
    }
}

/// POST `order/split` request — extract the given lines into a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOrderRequest {
    pub source_order_id: i64,
    pub detail_ids: Vec<i64>,
}

/// POST `order/split` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOrderResponse {
    pub source_order_id: i64,
    pub new_order_id: i64,
    #[serde(default)]
    pub message: String,
}

/// POST `order/merge` request — fold source into target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOrderRequest {
    pub source_order_id: i64,
    pub target_order_id: i64,
}

/// Generic status object returned by merge, accounting-complete, stock and
/// kitchen-status endpoints. Extra keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: Option<String>,
}
