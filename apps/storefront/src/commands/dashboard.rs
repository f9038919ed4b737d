//! # Dashboard Commands
//!
//! The admin dashboard's "orders by month" chart.

use std::path::Path;

use loop_core::analytics::{orders_by_month_from_records, MonthlyOrderCount};
use serde_json::Value;
use tracing::debug;

use super::read_json_file;
use crate::error::ApiError;

/// Buckets the saved `/stats/graphData` response into twelve months.
///
/// The file holds either the bare array of records or an object with the
/// array under `data`.
pub fn orders_by_month(records_file: &Path) -> Result<Vec<MonthlyOrderCount>, ApiError> {
    debug!(file = %records_file.display(), "orders_by_month command");

    let records = match read_json_file::<Value>(records_file)? {
        Value::Array(records) => records,
        Value::Object(mut body) => match body.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(ApiError::validation(
                    "Expected an array of records or { \"data\": [...] }",
                ))
            }
        },
        _ => return Err(ApiError::validation("Expected an array of records")),
    };

    Ok(orders_by_month_from_records(&records))
}
