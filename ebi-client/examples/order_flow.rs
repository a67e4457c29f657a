//! End-to-end order flow against a running backend.
//!
//! Usage:
//!   EBI_BASE_URL=http://localhost:8080 cargo run --example order_flow

use ebi_client::accounting::{self, Discount};
use ebi_client::{ClientConfig, OrderSession, TableBoard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base_url =
        std::env::var("EBI_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let config = ClientConfig::new(base_url).with_timeout(10);
    let http = config.build_http_client();

    // Table board: pick the first vacant table on the first floor.
    let board = TableBoard::new(http.clone());
    board.refresh().await?;
    let table = board
        .tables_for_current_floor()
        .into_iter()
        .find(|t| !t.is_occupied())
        .ok_or_else(|| anyhow::anyhow!("no vacant table"))?;
    println!("seating at table {} (capacity {})", table.id, table.capacity);

    // Open a session and order the first two items of the book.
    let session = OrderSession::new(http);
    session.initialize(table.id, 1, None, 2).await?;
    let menu = session.watch_menu().borrow().clone();
    let mut picked = 0;
    for minor in menu.structure.values() {
        for items in minor.values() {
            for item in items {
                if picked < 2 && !item.is_sold_out {
                    session.add_to_cart(item.clone(), 1, vec![]);
                    picked += 1;
                }
            }
        }
    }

    let outcome = session.submit_order().await?;
    println!(
        "submitted {} line(s), {} failed",
        outcome.submitted, outcome.failed
    );

    session.fetch_order_history(None).await?;
    let total = session
        .history_snapshot()
        .map(|s| s.total_amount())
        .unwrap_or(0);
    let due = accounting::final_total(total, Discount::None);
    let (per_person, remainder) = accounting::warikan(due, 2);
    println!("total {due}, split two ways: {per_person} each, {remainder} left over");

    Ok(())
}
