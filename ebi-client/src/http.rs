//! HTTP client for the POS backend API
//!
//! One typed method per wire operation. Paths are relative to the
//! configured base URL; see the shared crate for the payload types.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{Floor, MenuBook, MenuOption, MenuStructure, TableStatus};
use shared::order::{
    AccountingSnapshot, CompleteAccountingRequest, MergeOrderRequest, OrderLineRequest,
    OrderLineResponse, SplitOrderRequest, SplitOrderResponse, StartOrderRequest,
    StartOrderResponse, StatusMessage,
};
use shared::ItemStatus;

/// HTTP client for making network requests to the order backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with query parameters and no body
    async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Tables and Floors ==========

    /// GET `tables/status`
    pub async fn table_statuses(&self) -> ClientResult<Vec<TableStatus>> {
        self.get("tables/status").await
    }

    /// GET `floors`
    pub async fn floors(&self) -> ClientResult<Vec<Floor>> {
        self.get("floors").await
    }

    // ========== Menu ==========

    /// GET `menus/books`
    pub async fn menu_books(&self) -> ClientResult<Vec<MenuBook>> {
        self.get("menus/books").await
    }

    /// GET `menus/{bookId}`
    pub async fn menu_structure(&self, book_id: i64) -> ClientResult<MenuStructure> {
        self.get(&format!("menus/{book_id}")).await
    }

    /// GET `menus/options`
    pub async fn menu_options(&self) -> ClientResult<Vec<MenuOption>> {
        self.get("menus/options").await
    }

    /// POST `menus/{menuId}/stock` - toggle sold-out state
    pub async fn set_sold_out(&self, menu_id: i64, is_sold_out: bool) -> ClientResult<StatusMessage> {
        self.post(
            &format!("menus/{menu_id}/stock"),
            &serde_json::json!({ "isSoldOut": is_sold_out }),
        )
        .await
    }

    // ========== Order ==========

    /// POST `order/start`
    pub async fn start_order(&self, request: &StartOrderRequest) -> ClientResult<StartOrderResponse> {
        self.post("order/start", request).await
    }

    /// POST `order/add`
    pub async fn add_order_line(&self, request: &OrderLineRequest) -> ClientResult<OrderLineResponse> {
        self.post("order/add", request).await
    }

    /// POST `order/split`
    pub async fn split_order(&self, request: &SplitOrderRequest) -> ClientResult<SplitOrderResponse> {
        self.post("order/split", request).await
    }

    /// POST `order/merge`
    pub async fn merge_orders(&self, request: &MergeOrderRequest) -> ClientResult<StatusMessage> {
        self.post("order/merge", request).await
    }

    // ========== Accounting ==========

    /// GET `accounting/details/{orderId}`
    pub async fn accounting_details(&self, order_id: i64) -> ClientResult<AccountingSnapshot> {
        self.get(&format!("accounting/details/{order_id}")).await
    }

    /// POST `accounting/complete`
    pub async fn complete_accounting(
        &self,
        request: &CompleteAccountingRequest,
    ) -> ClientResult<StatusMessage> {
        self.post("accounting/complete", request).await
    }

    // ========== Kitchen ==========

    /// GET `kds/items/pending` - raw records; decoding is the caller's
    /// concern (field names drift between server revisions)
    pub async fn kitchen_pending(&self) -> ClientResult<Vec<serde_json::Value>> {
        self.get("kds/items/pending").await
    }

    /// POST `kds/item/{detailId}/status?status=`
    pub async fn update_kitchen_status(
        &self,
        detail_id: i64,
        status: ItemStatus,
    ) -> ClientResult<StatusMessage> {
        self.post_query(
            &format!("kds/item/{detail_id}/status"),
            &[("status", status.as_wire())],
        )
        .await
    }
}
