//! In-process mock backend for integration tests
//!
//! Serves the canonical POS wire contract on an ephemeral port, records
//! every request and allows tests to stage failures per endpoint.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct BackendState {
    /// Next order id handed out by `order/start`
    pub next_order_id: i64,
    /// Recorded `order/start` request bodies
    pub started: Vec<Value>,
    /// Recorded `order/add` request bodies (successful only)
    pub added_lines: Vec<Value>,
    /// Menu ids for which `order/add` returns HTTP 500
    pub failing_menu_ids: HashSet<i64>,
    /// Accounting snapshots by order id
    pub snapshots: HashMap<i64, Value>,
    /// `tables/status` payload
    pub tables: Vec<Value>,
    /// `kds/items/pending` payload
    pub kitchen_items: Vec<Value>,
    /// Recorded kitchen status updates (detail_id, wire status)
    pub status_updates: Vec<(i64, String)>,
    /// Recorded merges (source, target)
    pub merges: Vec<(i64, i64)>,
    /// Recorded `accounting/complete` bodies
    pub completed: Vec<Value>,
    /// Recorded stock toggles (menu_id, is_sold_out)
    pub stock_updates: Vec<(i64, bool)>,
    /// Per-endpoint hit counters
    pub hits: HashMap<&'static str, usize>,
    /// Table id whose `order/start` is delayed, and the delay in millis
    pub slow_start_table: Option<(i64, u64)>,
    /// When true, `floors` returns HTTP 500
    pub fail_floors: bool,
    /// New order id returned by `order/split`
    pub split_new_order_id: i64,
}

pub type SharedState = Arc<Mutex<BackendState>>;

pub struct Backend {
    pub state: SharedState,
    pub base_url: String,
}

impl Backend {
    pub fn hits(&self, endpoint: &str) -> usize {
        *self.state.lock().unwrap().hits.get(endpoint).unwrap_or(&0)
    }

    /// Register an accounting snapshot for an order.
    pub fn put_snapshot(&self, order_id: i64, total: i64, details: Value) {
        self.state
            .lock()
            .unwrap()
            .snapshots
            .insert(order_id, snapshot(order_id, total, details));
    }
}

/// Build a snapshot payload in the backend's camelCase shape.
pub fn snapshot(order_id: i64, total: i64, details: Value) -> Value {
    json!({
        "header": {"orderId": order_id, "totalAmount": total, "orderStatus": "OPEN"},
        "details": details,
        "paymentMethods": [
            {"paymentId": 1, "methodName": "Cash"},
            {"paymentId": 2, "methodName": "Card"}
        ]
    })
}

pub fn table(id: i64, floor_id: i64, order_id: Option<i64>) -> Value {
    json!({
        "id": id,
        "floor_id": floor_id,
        "status": if order_id.is_some() { "OCCUPIED" } else { "VACANT" },
        "capacity": 4,
        "order_id": order_id,
        "book_id": order_id.map(|_| 1)
    })
}

fn hit(state: &SharedState, endpoint: &'static str) {
    *state.lock().unwrap().hits.entry(endpoint).or_insert(0) += 1;
}

async fn table_statuses(State(state): State<SharedState>) -> Json<Value> {
    hit(&state, "tables/status");
    let tables = state.lock().unwrap().tables.clone();
    Json(Value::Array(tables))
}

async fn floors(State(state): State<SharedState>) -> Response {
    hit(&state, "floors");
    if state.lock().unwrap().fail_floors {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(json!([{"id": 1, "name": "1F"}, {"id": 2, "name": "2F"}])).into_response()
}

async fn menu_books(State(state): State<SharedState>) -> Json<Value> {
    hit(&state, "menus/books");
    Json(json!([{"bookId": 1, "bookName": "Dinner"}]))
}

async fn menu_structure(State(state): State<SharedState>, Path(_book_id): Path<i64>) -> Json<Value> {
    hit(&state, "menus/structure");
    Json(json!({
        "Food": {
            "Grill": [
                {"menu_id": 1, "menu_name": "Yakitori", "price": 280, "category_id": 10},
                {"menu_id": 2, "menu_name": "Tsukune", "price": 320, "category_id": 10}
            ]
        },
        "Drink": {
            "Beer": [
                {"menu_id": 3, "menu_name": "Draft", "price": 550, "category_id": 20}
            ]
        }
    }))
}

async fn menu_options(State(state): State<SharedState>) -> Json<Value> {
    hit(&state, "menus/options");
    Json(json!([{"optionId": 7, "optionName": "Extra skewer", "price": 100}]))
}

async fn start_order(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    hit(&state, "order/start");

    let slow = {
        let s = state.lock().unwrap();
        s.slow_start_table
            .filter(|(table_id, _)| body["tableId"].as_i64() == Some(*table_id))
    };
    if let Some((_, millis)) = slow {
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
    }

    let order_id = {
        let mut s = state.lock().unwrap();
        s.next_order_id += 1;
        let id = s.next_order_id;
        s.started.push(body);
        // A fresh order has an empty snapshot until lines arrive.
        s.snapshots.insert(id, snapshot(id, 0, json!([])));
        id
    };
    Json(json!({"order_id": order_id, "message": "order started"}))
}

async fn add_order_line(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    hit(&state, "order/add");
    let mut s = state.lock().unwrap();
    if let Some(menu_id) = body["menuId"].as_i64() {
        if s.failing_menu_ids.contains(&menu_id) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "line rejected").into_response();
        }
    }
    let detail_id = s.added_lines.len() as i64 + 1;
    s.added_lines.push(body);
    Json(json!({"detail_id": detail_id, "message": "added"})).into_response()
}

async fn accounting_details(State(state): State<SharedState>, Path(order_id): Path<i64>) -> Response {
    hit(&state, "accounting/details");
    match state.lock().unwrap().snapshots.get(&order_id) {
        Some(snap) => Json(snap.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such order").into_response(),
    }
}

async fn complete_accounting(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    hit(&state, "accounting/complete");
    state.lock().unwrap().completed.push(body);
    Json(json!({"message": "completed"}))
}

async fn split_order(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    hit(&state, "order/split");
    let mut s = state.lock().unwrap();
    let new_id = s.split_new_order_id;
    let source = body["sourceOrderId"].as_i64().unwrap_or(0);
    s.snapshots.insert(new_id, snapshot(new_id, 0, json!([])));
    Json(json!({
        "sourceOrderId": source,
        "newOrderId": new_id,
        "message": "slip split"
    }))
}

async fn merge_orders(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    hit(&state, "order/merge");
    let source = body["sourceOrderId"].as_i64().unwrap_or(0);
    let target = body["targetOrderId"].as_i64().unwrap_or(0);
    state.lock().unwrap().merges.push((source, target));
    Json(json!({"message": "merged"}))
}

async fn set_stock(
    State(state): State<SharedState>,
    Path(menu_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    hit(&state, "menus/stock");
    let sold_out = body["isSoldOut"].as_bool().unwrap_or(false);
    state.lock().unwrap().stock_updates.push((menu_id, sold_out));
    Json(json!({"message": "stock updated"}))
}

async fn kitchen_pending(State(state): State<SharedState>) -> Json<Value> {
    hit(&state, "kds/pending");
    let items = state.lock().unwrap().kitchen_items.clone();
    Json(Value::Array(items))
}

async fn update_kitchen_status(
    State(state): State<SharedState>,
    Path(detail_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hit(&state, "kds/status");
    let Some(status) = params.get("status").cloned() else {
        return (StatusCode::BAD_REQUEST, "missing status").into_response();
    };
    let mut s = state.lock().unwrap();
    for item in &mut s.kitchen_items {
        if item["detail_id"].as_i64() == Some(detail_id) {
            item["item_status"] = Value::String(status.clone());
        }
    }
    s.status_updates.push((detail_id, status));
    Json(json!({"message": "updated"})).into_response()
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/tables/status", get(table_statuses))
        .route("/floors", get(floors))
        .route("/menus/books", get(menu_books))
        .route("/menus/options", get(menu_options))
        .route("/menus/{id}", get(menu_structure))
        .route("/menus/{id}/stock", post(set_stock))
        .route("/order/start", post(start_order))
        .route("/order/add", post(add_order_line))
        .route("/order/split", post(split_order))
        .route("/order/merge", post(merge_orders))
        .route("/accounting/details/{order_id}", get(accounting_details))
        .route("/accounting/complete", post(complete_accounting))
        .route("/kds/items/pending", get(kitchen_pending))
        .route("/kds/item/{detail_id}/status", post(update_kitchen_status))
        .with_state(state)
}

/// Start the mock backend on an ephemeral port.
pub async fn spawn_backend() -> Backend {
    let state: SharedState = Arc::new(Mutex::new(BackendState {
        next_order_id: 100,
        split_new_order_id: 900,
        ..Default::default()
    }));
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });
    Backend {
        state,
        base_url: format!("http://{addr}"),
    }
}
