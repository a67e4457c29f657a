//! Table board
//!
//! Floor list, table occupancy and the per-table linkage to an active
//! order / menu book. Read-only from the client's point of view: tables
//! are created server-side, the board only fetches and filters.

use crate::{ClientResult, HttpClient};
use shared::models::{Floor, MenuBook, TableStatus};
use tokio::sync::watch;

pub struct TableBoard {
    http: HttpClient,

    floors: watch::Sender<Vec<Floor>>,
    books: watch::Sender<Vec<MenuBook>>,
    tables: watch::Sender<Vec<TableStatus>>,
    selected_floor: watch::Sender<Option<i64>>,
    loading: watch::Sender<bool>,
    error_message: watch::Sender<Option<String>>,
}

impl TableBoard {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            floors: watch::Sender::new(Vec::new()),
            books: watch::Sender::new(Vec::new()),
            tables: watch::Sender::new(Vec::new()),
            selected_floor: watch::Sender::new(None),
            loading: watch::Sender::new(false),
            error_message: watch::Sender::new(None),
        }
    }

    // ========== Observable state ==========

    pub fn watch_floors(&self) -> watch::Receiver<Vec<Floor>> {
        self.floors.subscribe()
    }

    pub fn watch_menu_books(&self) -> watch::Receiver<Vec<MenuBook>> {
        self.books.subscribe()
    }

    pub fn watch_tables(&self) -> watch::Receiver<Vec<TableStatus>> {
        self.tables.subscribe()
    }

    pub fn watch_selected_floor(&self) -> watch::Receiver<Option<i64>> {
        self.selected_floor.subscribe()
    }

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn watch_error_message(&self) -> watch::Receiver<Option<String>> {
        self.error_message.subscribe()
    }

    pub fn clear_error_message(&self) {
        self.error_message.send_replace(None);
    }

    // ========== Operations ==========

    /// Full refresh: floors, menu books, table statuses. The first floor
    /// becomes the selection if none is set yet.
    pub async fn refresh(&self) -> ClientResult<()> {
        self.loading.send_replace(true);
        let result = self.refresh_inner().await;
        self.loading.send_replace(false);
        result
    }

    async fn refresh_inner(&self) -> ClientResult<()> {
        match self.http.floors().await {
            Ok(floors) => {
                if self.selected_floor.borrow().is_none() {
                    if let Some(first) = floors.first() {
                        self.selected_floor.send_replace(Some(first.id));
                    }
                }
                self.floors.send_replace(floors);
            }
            Err(e) => {
                self.error_message
                    .send_replace(Some("Failed to fetch floors".into()));
                return Err(e);
            }
        }

        // Menu books are auxiliary; a failure is logged, not fatal to the
        // board refresh.
        match self.http.menu_books().await {
            Ok(books) => {
                self.books.send_replace(books);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch menu books");
            }
        }

        self.refresh_tables().await
    }

    /// Re-fetch table statuses only.
    pub async fn refresh_tables(&self) -> ClientResult<()> {
        match self.http.table_statuses().await {
            Ok(statuses) => {
                self.tables.send_replace(statuses);
                Ok(())
            }
            Err(e) => {
                self.error_message
                    .send_replace(Some("Failed to fetch table status".into()));
                Err(e)
            }
        }
    }

    pub fn select_floor(&self, floor_id: i64) {
        self.selected_floor.send_replace(Some(floor_id));
    }

    /// Tables on the currently selected floor.
    pub fn tables_for_current_floor(&self) -> Vec<TableStatus> {
        let Some(floor_id) = *self.selected_floor.borrow() else {
            return Vec::new();
        };
        self.tables
            .borrow()
            .iter()
            .filter(|t| t.floor_id == floor_id)
            .cloned()
            .collect()
    }
}
