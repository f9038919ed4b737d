//! # Vendor Commands
//!
//! Order history tools for signed-in vendors.
//!
//! ```text
//! GET /order/all?storeId=<store>&pageNumber=1&limit=10
//!         │  (saved to history.json)
//!         ▼
//! storefront vendor orders history.json   ──► table rows
//! storefront vendor export history.json   ──► vendor_orders.csv
//! storefront vendor orders-by-month ...   ──► 12-month series
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use loop_core::analytics::{orders_by_month_from_dates, MonthlyOrderCount};
use loop_core::export::{history_to_csv, order_table_row, OrderTableRow, EXPORT_FILE_NAME};
use loop_core::OrderHistoryPage;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{read_json_file, require_user};
use crate::error::{ApiError, ErrorCode};
use crate::state::{ConfigState, SessionStore};

/// Result of writing the CSV.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: PathBuf,
    pub rows: usize,
    /// Where the history came from, for reference
    pub source_endpoint: String,
}

/// One page of the order history table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTableResponse {
    pub page_number: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub rows: Vec<OrderTableRow>,
}

/// Returns the signed-in vendor's store ID.
fn require_vendor(store: &SessionStore) -> Result<String, ApiError> {
    require_user(store)?.store_id.ok_or_else(|| {
        ApiError::new(
            ErrorCode::Unauthenticated,
            "Vendor commands need a store account",
        )
    })
}

fn load_history(store_id: &str, history_file: &Path) -> Result<OrderHistoryPage, ApiError> {
    let page: OrderHistoryPage = read_json_file(history_file)?;

    let foreign = page.orders.iter().filter(|o| o.store_id != store_id).count();
    if foreign > 0 {
        warn!(store_id, foreign, "history contains orders from other stores");
    }

    Ok(page)
}

/// Lists the order history the way the vendor orders table shows it.
pub fn list_orders(
    store: &SessionStore,
    history_file: &Path,
) -> Result<OrderTableResponse, ApiError> {
    debug!(file = %history_file.display(), "list_orders command");

    let store_id = require_vendor(store)?;
    let page = load_history(&store_id, history_file)?;

    Ok(OrderTableResponse {
        page_number: page.page_number,
        total_pages: page.total_pages,
        total_records: page.total_records,
        rows: page.orders.iter().map(order_table_row).collect(),
    })
}

/// Writes the order history as CSV.
///
/// ## Arguments
/// * `output` - Target file; defaults to `vendor_orders.csv` in the current directory
pub fn export_orders(
    config: &ConfigState,
    store: &SessionStore,
    history_file: &Path,
    output: Option<&Path>,
) -> Result<ExportResponse, ApiError> {
    debug!(file = %history_file.display(), "export_orders command");

    let store_id = require_vendor(store)?;
    let page = load_history(&store_id, history_file)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

    fs::write(&path, history_to_csv(&page)).map_err(|e| {
        ApiError::new(
            ErrorCode::StorageError,
            format!("Failed to write {}: {}", path.display(), e),
        )
    })?;

    info!(path = %path.display(), rows = page.orders.len(), "order history exported");

    Ok(ExportResponse {
        rows: page.orders.len(),
        path,
        source_endpoint: config.endpoint(&format!("/order/all?storeId={}", store_id)),
    })
}

/// Counts the vendor's orders by the month they were created.
pub fn orders_by_month(
    store: &SessionStore,
    history_file: &Path,
) -> Result<Vec<MonthlyOrderCount>, ApiError> {
    debug!(file = %history_file.display(), "vendor orders_by_month command");

    let store_id = require_vendor(store)?;
    let page = load_history(&store_id, history_file)?;

    Ok(orders_by_month_from_dates(
        page.orders.iter().map(|o| &o.created_at),
    ))
}
