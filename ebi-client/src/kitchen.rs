//! Kitchen ticket poller
//!
//! Fixed-interval refetch of the pending-items list for as long as the
//! kitchen screen is visible. Each tick replaces the entire displayed set;
//! records that cannot be decoded are dropped and logged. The loop is tied
//! to a `CancellationToken` so it stops when the session ends instead of
//! leaking background fetches.

use crate::{ClientResult, HttpClient};
use shared::{ItemStatus, KitchenTicket};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub struct KitchenPoller {
    http: HttpClient,
    interval: Duration,
    tickets: watch::Sender<Vec<KitchenTicket>>,
    error_message: watch::Sender<Option<String>>,
    shutdown: CancellationToken,
}

/// Cancels the polling task when dropped.
pub struct PollerGuard {
    token: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl PollerGuard {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub async fn join(mut self) {
        self.token.cancel();
        let _ = std::pin::Pin::new(&mut self.handle).await;
    }
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl KitchenPoller {
    pub fn new(http: HttpClient, interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            http,
            interval,
            tickets: watch::Sender::new(Vec::new()),
            error_message: watch::Sender::new(None),
            shutdown: CancellationToken::new(),
        })
    }

    pub fn watch_tickets(&self) -> watch::Receiver<Vec<KitchenTicket>> {
        self.tickets.subscribe()
    }

    pub fn watch_error_message(&self) -> watch::Receiver<Option<String>> {
        self.error_message.subscribe()
    }

    pub fn clear_error_message(&self) {
        self.error_message.send_replace(None);
    }

    pub fn current_tickets(&self) -> Vec<KitchenTicket> {
        self.tickets.borrow().clone()
    }

    /// Fetch pending items once and replace the displayed set. Undecodable
    /// records are dropped; a fetch error keeps the last good list.
    pub async fn refresh(&self) -> ClientResult<()> {
        let raw = match self.http.kitchen_pending().await {
            Ok(raw) => raw,
            Err(e) => {
                self.error_message
                    .send_replace(Some(format!("Kitchen fetch failed: {e}")));
                return Err(e);
            }
        };

        let mut items = Vec::with_capacity(raw.len());
        for value in &raw {
            match KitchenTicket::from_value(value) {
                Ok(ticket) => items.push(ticket),
                Err(e) => {
                    tracing::warn!(error = %e, record = %value, "dropping undecodable kitchen record");
                }
            }
        }
        self.tickets.send_replace(items);
        Ok(())
    }

    /// Advance a ticket one kitchen step (unprepared → cooking → served)
    /// and refetch immediately. Tickets past the served stage have no
    /// transition left.
    pub async fn advance(&self, detail_id: i64, current: ItemStatus) -> ClientResult<()> {
        let Some(next) = current.kitchen_next() else {
            return Err(crate::ClientError::Validation(format!(
                "no kitchen transition from {current}"
            )));
        };
        self.set_status(detail_id, next).await
    }

    /// Set a ticket's status explicitly and refetch immediately.
    pub async fn set_status(&self, detail_id: i64, status: ItemStatus) -> ClientResult<()> {
        match self.http.update_kitchen_status(detail_id, status).await {
            Ok(_) => self.refresh().await,
            Err(e) => {
                self.error_message
                    .send_replace(Some("Status update failed".into()));
                Err(e)
            }
        }
    }

    /// Start the polling loop on the current runtime. The first refresh
    /// fires immediately; the returned guard cancels the loop on drop.
    pub fn spawn(self: &Arc<Self>) -> PollerGuard {
        let poller = Arc::clone(self);
        let token = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            poller.run().await;
        });
        PollerGuard { token, handle }
    }

    async fn run(&self) {
        tracing::debug!(interval = ?self.interval, "kitchen poller started");
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("kitchen poller stopped");
                    return;
                }
            }
            // Errors already surfaced on the error cell; the last good
            // list stays on display.
            let _ = self.refresh().await;
        }
    }
}
