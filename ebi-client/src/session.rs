//! Order/cart session
//!
//! Owns the session-scoped relationship between a table, its order
//! identity on the server, and the locally staged cart. One session is
//! active per client at a time; `initialize` supersedes everything that
//! came before it.
//!
//! Every await-crossing operation captures the session epoch first and
//! re-checks it before committing state, so a response that arrives after
//! the session has been re-initialized for another table is discarded.

use crate::{ClientError, ClientResult, HttpClient};
use shared::models::{MenuCatalog, MenuItem, MenuOption};
use shared::order::{
    AccountingSnapshot, CompleteAccountingRequest, MergeOrderRequest, OrderLineRequest,
    SplitOrderRequest, StartOrderRequest,
};
use shared::ItemStatus;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// A locally staged order line. Quantity and options are captured by value
/// at add-to-cart time; the price never reconciles with later server-side
/// price changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: i32,
    pub options: Vec<MenuOption>,
}

impl CartLine {
    /// Subtotal as submitted on the wire: unit price times quantity.
    /// Option prices are settled server-side.
    pub fn subtotal(&self) -> i64 {
        self.item.price * self.quantity as i64
    }

    /// Line total for display, including selected option prices.
    pub fn display_total(&self) -> i64 {
        let option_sum: i64 = self.options.iter().map(|o| o.price).sum();
        (self.item.price + option_sum) * self.quantity as i64
    }

    fn to_request(&self, order_id: i64) -> OrderLineRequest {
        let options_text = if self.options.is_empty() {
            None
        } else {
            Some(
                self.options
                    .iter()
                    .map(|o| o.option_name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };
        OrderLineRequest {
            order_id,
            menu_id: self.item.menu_id,
            quantity: self.quantity,
            price_at_order: self.item.price,
            subtotal: self.subtotal(),
            item_status: ItemStatus::Unprepared,
            option_ids: self.options.iter().map(|o| o.option_id).collect(),
            options_text,
        }
    }
}

/// Aggregate result of a cart submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Lines accepted by the server and removed from the cart
    pub submitted: usize,
    /// Lines that failed and were retained in the cart for retry
    pub failed: usize,
}

/// The session state machine for a single active order.
pub struct OrderSession {
    http: HttpClient,
    /// Bumped by `initialize`; stale async results are discarded.
    epoch: AtomicU64,

    menu: watch::Sender<MenuCatalog>,
    order_id: watch::Sender<Option<i64>>,
    cart: watch::Sender<Vec<CartLine>>,
    history: watch::Sender<Option<AccountingSnapshot>>,
    accounting_done: watch::Sender<bool>,

    user_message: watch::Sender<Option<String>>,
    error_message: watch::Sender<Option<String>>,
}

impl OrderSession {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            epoch: AtomicU64::new(0),
            menu: watch::Sender::new(MenuCatalog::default()),
            order_id: watch::Sender::new(None),
            cart: watch::Sender::new(Vec::new()),
            history: watch::Sender::new(None),
            accounting_done: watch::Sender::new(false),
            user_message: watch::Sender::new(None),
            error_message: watch::Sender::new(None),
        }
    }

    // ========== Observable state ==========

    pub fn watch_menu(&self) -> watch::Receiver<MenuCatalog> {
        self.menu.subscribe()
    }

    pub fn watch_order_id(&self) -> watch::Receiver<Option<i64>> {
        self.order_id.subscribe()
    }

    pub fn watch_cart(&self) -> watch::Receiver<Vec<CartLine>> {
        self.cart.subscribe()
    }

    pub fn watch_history(&self) -> watch::Receiver<Option<AccountingSnapshot>> {
        self.history.subscribe()
    }

    pub fn watch_accounting_done(&self) -> watch::Receiver<bool> {
        self.accounting_done.subscribe()
    }

    pub fn watch_user_message(&self) -> watch::Receiver<Option<String>> {
        self.user_message.subscribe()
    }

    pub fn watch_error_message(&self) -> watch::Receiver<Option<String>> {
        self.error_message.subscribe()
    }

    pub fn current_order_id(&self) -> Option<i64> {
        *self.order_id.borrow()
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.cart.borrow().clone()
    }

    pub fn history_snapshot(&self) -> Option<AccountingSnapshot> {
        self.history.borrow().clone()
    }

    pub fn clear_user_message(&self) {
        self.user_message.send_replace(None);
    }

    pub fn clear_error_message(&self) {
        self.error_message.send_replace(None);
    }

    pub fn clear_accounting_done(&self) {
        self.accounting_done.send_replace(false);
    }

    pub fn show_user_message(&self, message: impl Into<String>) {
        self.user_message.send_replace(Some(message.into()));
    }

    // ========== Epoch guard ==========

    fn begin_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn report_error(&self, message: impl Into<String>) {
        self.error_message.send_replace(Some(message.into()));
    }

    // ========== Operations ==========

    /// Bind the session to a table: adopt an existing order or start a new
    /// one, then load the menu book. The order identity is bound before
    /// the menu becomes visible, so a populated menu implies a usable
    /// order id. All prior session state is discarded unconditionally.
    pub async fn initialize(
        &self,
        table_id: i64,
        book_id: i64,
        existing_order_id: Option<i64>,
        customer_count: i32,
    ) -> ClientResult<()> {
        let epoch = self.begin_epoch();

        self.menu.send_replace(MenuCatalog::default());
        self.order_id.send_replace(None);
        self.cart.send_replace(Vec::new());
        self.history.send_replace(None);
        self.accounting_done.send_replace(false);

        // 1. Secure the order identity, sequentially - the cart must never
        //    race ahead of a still-pending start-order call.
        match existing_order_id.filter(|id| *id > 0) {
            Some(id) => {
                self.order_id.send_replace(Some(id));
                self.fetch_snapshot(id, epoch, false).await?;
            }
            None => {
                let request = StartOrderRequest {
                    table_id,
                    book_id,
                    customer_count,
                };
                match self.http.start_order(&request).await {
                    Ok(response) => {
                        if !self.is_current(epoch) {
                            return Ok(());
                        }
                        tracing::debug!(
                            order_id = response.order_id,
                            table_id,
                            "order started"
                        );
                        self.order_id.send_replace(Some(response.order_id));
                    }
                    Err(e) => {
                        self.report_error("Failed to start order");
                        return Err(e);
                    }
                }
            }
        }

        // 2. Menu only after the identity is bound.
        self.load_menu(book_id, epoch).await
    }

    async fn load_menu(&self, book_id: i64, epoch: u64) -> ClientResult<()> {
        let structure = match self.http.menu_structure(book_id).await {
            Ok(s) => s,
            Err(e) => {
                self.report_error(format!("Failed to load menu: {e}"));
                return Err(e);
            }
        };
        let options = match self.http.menu_options().await {
            Ok(o) => o,
            Err(e) => {
                self.report_error(format!("Failed to load options: {e}"));
                return Err(e);
            }
        };
        if self.is_current(epoch) {
            self.menu.send_replace(MenuCatalog::new(structure, options));
        }
        Ok(())
    }

    /// Stage a line locally. No validation, no network.
    pub fn add_to_cart(&self, item: MenuItem, quantity: i32, options: Vec<MenuOption>) {
        let name = item.menu_name.clone();
        self.cart.send_modify(|cart| {
            cart.push(CartLine {
                item,
                quantity,
                options,
            })
        });
        self.show_user_message(format!("Added {name} to cart"));
    }

    /// Remove one structurally-equal line. With duplicate lines the
    /// last-added match is removed.
    pub fn remove_from_cart(&self, line: &CartLine) {
        self.cart.send_modify(|cart| {
            if let Some(idx) = cart.iter().rposition(|l| l == line) {
                cart.remove(idx);
            }
        });
    }

    /// Submit the staged cart, one line-add call per entry. Submission is
    /// per-line, not transactional: failed lines stay in the cart for
    /// retry and the aggregate outcome is reported.
    pub async fn submit_order(&self) -> ClientResult<SubmitOutcome> {
        let epoch = self.current_epoch();
        let Some(order_id) = self.current_order_id() else {
            return Err(ClientError::Validation(
                "order is not yet bound; cannot submit".into(),
            ));
        };
        let lines = self.cart_lines();
        if lines.is_empty() {
            return Ok(SubmitOutcome::default());
        }

        let mut submitted = 0usize;
        let mut failed: Vec<CartLine> = Vec::new();
        for line in lines {
            match self.http.add_order_line(&line.to_request(order_id)).await {
                Ok(_) => submitted += 1,
                Err(e) => {
                    tracing::warn!(
                        menu_id = line.item.menu_id,
                        error = %e,
                        "order line submission failed; keeping in cart"
                    );
                    failed.push(line);
                }
            }
        }

        let outcome = SubmitOutcome {
            submitted,
            failed: failed.len(),
        };

        // A superseding initialize already reset the cart; leave it alone.
        if !self.is_current(epoch) {
            return Ok(outcome);
        }

        self.cart.send_replace(failed);
        if outcome.failed == 0 {
            self.show_user_message("Order accepted");
            // Refresh is best-effort; the submitted lines are already safe.
            let _ = self.fetch_snapshot(order_id, epoch, false).await;
        } else {
            self.show_user_message(format!(
                "{} line(s) failed to send and were kept in the cart",
                outcome.failed
            ));
        }
        Ok(outcome)
    }

    /// Fetch the accounting snapshot for the bound order, or for an
    /// explicitly given order id. An explicit id rebinds the session -
    /// this is how slip-number call-up redirects the active session.
    pub async fn fetch_order_history(&self, target_order_id: Option<i64>) -> ClientResult<()> {
        let epoch = self.current_epoch();
        let order_id = match target_order_id.or_else(|| self.current_order_id()) {
            Some(id) => id,
            None => {
                return Err(ClientError::Validation("no active order".into()));
            }
        };
        self.fetch_snapshot(order_id, epoch, target_order_id.is_some())
            .await
    }

    async fn fetch_snapshot(&self, order_id: i64, epoch: u64, rebind: bool) -> ClientResult<()> {
        match self.http.accounting_details(order_id).await {
            Ok(snapshot) => {
                if self.is_current(epoch) {
                    self.history.send_replace(Some(snapshot));
                    if rebind {
                        self.order_id.send_replace(Some(order_id));
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.report_error("Slip not found");
                Err(e)
            }
        }
    }

    /// Resolve a table to its linked order and rebind to it. Soft-fails
    /// with a user message when the table is unknown or has no open slip.
    pub async fn search_by_table(&self, table_id: i64) -> ClientResult<()> {
        let epoch = self.current_epoch();
        let tables = match self.http.table_statuses().await {
            Ok(t) => t,
            Err(e) => {
                self.report_error("Failed to fetch table status");
                return Err(e);
            }
        };
        if !self.is_current(epoch) {
            return Ok(());
        }

        let Some(table) = tables.iter().find(|t| t.id == table_id) else {
            self.show_user_message(format!("Table {table_id} does not exist"));
            return Ok(());
        };
        match table.active_order_id() {
            Some(order_id) => {
                self.show_user_message(format!("Calling up the slip for table {table_id}"));
                self.fetch_order_history(Some(order_id)).await
            }
            None => {
                self.show_user_message(format!("Table {table_id} is vacant or has no slip"));
                self.history.send_replace(None);
                Ok(())
            }
        }
    }

    /// Call up a slip directly by its number.
    pub async fn search_by_slip(&self, order_id: i64) -> ClientResult<()> {
        self.show_user_message(format!("Looking up slip No. {order_id}"));
        self.fetch_order_history(Some(order_id)).await
    }

    /// Extract the given lines into a new order and rebind the session to
    /// it. No optimistic local mutation: the server owns split semantics.
    pub async fn execute_split(
        &self,
        source_order_id: i64,
        detail_ids: Vec<i64>,
    ) -> ClientResult<i64> {
        let request = SplitOrderRequest {
            source_order_id,
            detail_ids,
        };
        match self.http.split_order(&request).await {
            Ok(response) => {
                self.show_user_message(if response.message.is_empty() {
                    format!("Split slip No. {} off", response.new_order_id)
                } else {
                    response.message.clone()
                });
                self.fetch_order_history(Some(response.new_order_id)).await?;
                Ok(response.new_order_id)
            }
            Err(e) => {
                self.report_error("Split failed");
                Err(e)
            }
        }
    }

    /// Fold one order's lines into another. Merging a slip into itself is
    /// rejected locally, before any network call.
    pub async fn execute_merge(
        &self,
        source_order_id: i64,
        target_order_id: i64,
    ) -> ClientResult<()> {
        if source_order_id == target_order_id {
            self.show_user_message("Cannot merge a slip into itself");
            return Err(ClientError::Validation(
                "cannot merge an order into itself".into(),
            ));
        }
        let request = MergeOrderRequest {
            source_order_id,
            target_order_id,
        };
        match self.http.merge_orders(&request).await {
            Ok(_) => {
                self.show_user_message(format!(
                    "Merged slip No. {source_order_id} into No. {target_order_id}"
                ));
                self.fetch_order_history(Some(target_order_id)).await
            }
            Err(e) => {
                self.report_error("Merge failed");
                Err(e)
            }
        }
    }

    /// Finalize payment for the bound order. On success the session is
    /// cleared unconditionally - one order, one settlement.
    pub async fn complete_accounting(&self, payment_id: i64, amount: i64) -> ClientResult<()> {
        let epoch = self.current_epoch();
        let Some(order_id) = self.current_order_id() else {
            return Err(ClientError::Validation("no active order".into()));
        };
        let request = CompleteAccountingRequest::new(order_id, payment_id, amount);
        match self.http.complete_accounting(&request).await {
            Ok(_) => {
                if self.is_current(epoch) {
                    self.show_user_message("Accounting completed");
                    self.accounting_done.send_replace(true);
                    self.order_id.send_replace(None);
                    self.cart.send_replace(Vec::new());
                    self.history.send_replace(None);
                }
                Ok(())
            }
            Err(e) => {
                self.report_error(format!("Accounting failed: {e}"));
                Err(e)
            }
        }
    }
}
