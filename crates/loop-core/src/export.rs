//! # Vendor Order Export
//!
//! Renders a vendor's order history as CSV, plus the small display helpers
//! the order history table uses.
//!
//! ```text
//! Order ID,User ID,Date Created,Date Updated,Status,Products,Total
//! 65f1...,u-7,"Mar 05, 2025 4:07 PM","Mar 05, 2025 4:09 PM",Complete,"1x p1, 1x p2",4000
//! ```
//!
//! Fields containing commas, quotes or newlines are quoted (RFC 4180), so
//! the products column and the dates survive spreadsheet import.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::types::{OrderHistoryPage, OrderStatus, OrderedProduct, VendorOrder};

/// Header row of the export.
pub const CSV_HEADER: [&str; 7] = [
    "Order ID",
    "User ID",
    "Date Created",
    "Date Updated",
    "Status",
    "Products",
    "Total",
];

/// Suggested file name for the download.
pub const EXPORT_FILE_NAME: &str = "vendor_orders.csv";

/// Shortens an identifier for table display.
///
/// ## Example
/// ```rust
/// use loop_core::export::truncate_id;
///
/// assert_eq!(truncate_id("65f1a2b3c4d5e6f7"), "65f1a2b3...");
/// assert_eq!(truncate_id("short"), "short");
/// ```
pub fn truncate_id(id: &str) -> String {
    match id.char_indices().nth(8) {
        Some((cut, _)) => format!("{}...", &id[..cut]),
        None => id.to_string(),
    }
}

/// Formats a timestamp like `Mar 05, 2025 4:07 PM`.
pub fn format_order_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y %-I:%M %p").to_string()
}

/// Renders the products column: `"1x p1, 2x p2"`.
pub fn format_products(products: &[OrderedProduct]) -> String {
    products
        .iter()
        .map(|p| format!("{}x {}", p.quantity, p.product_id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row of the order history table, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTableRow {
    pub order_id: String,
    pub user_id: String,
    pub created: String,
    pub updated: String,
    pub status: OrderStatus,
    /// `"1x Item 65f1a2b3..."` per product
    pub products: Vec<String>,
    pub total: String,
}

/// Shortens the ids and formats the dates and total of one order.
pub fn order_table_row(order: &VendorOrder) -> OrderTableRow {
    OrderTableRow {
        order_id: truncate_id(&order.id),
        user_id: truncate_id(&order.user_id),
        created: format_order_date(&order.created_at),
        updated: format_order_date(&order.updated_at),
        status: order.status,
        products: order
            .products
            .iter()
            .map(|p| format!("{}x Item {}", p.quantity, truncate_id(&p.product_id)))
            .collect(),
        total: order.total_price.to_string(),
    }
}

/// Quotes a CSV field when it needs it.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

fn order_row(order: &VendorOrder) -> [String; 7] {
    [
        order.id.clone(),
        order.user_id.clone(),
        format_order_date(&order.created_at),
        format_order_date(&order.updated_at),
        order.status.as_str().to_string(),
        format_products(&order.products),
        order.total_price.rupees().to_string(),
    ]
}

/// Renders orders as CSV, header first. Totals are whole rupees.
pub fn orders_to_csv(orders: &[VendorOrder]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER);

    for order in orders {
        push_row(&mut out, order_row(order));
    }

    out
}

/// Renders one page of history as CSV.
pub fn history_to_csv(page: &OrderHistoryPage) -> String {
    orders_to_csv(&page.orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::OrderStatus;
    use chrono::TimeZone;

    fn order() -> VendorOrder {
        VendorOrder {
            id: "65f1a2b3c4d5e6f708091a2b".to_string(),
            user_id: "u-7".to_string(),
            store_id: "s-1".to_string(),
            status: OrderStatus::Complete,
            products: vec![
                OrderedProduct {
                    product_id: "p1".to_string(),
                    quantity: 1,
                },
                OrderedProduct {
                    product_id: "p2".to_string(),
                    quantity: 2,
                },
            ],
            total_price: Money::from_rupees(4000),
            created_at: Utc.with_ymd_and_hms(2025, 3, 5, 16, 7, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 3, 5, 9, 9, 0).unwrap(),
        }
    }

    #[test]
    fn test_truncate_id_handles_multibyte() {
        assert_eq!(truncate_id("ééééééééé"), "éééééééé...");
        assert_eq!(truncate_id("12345678"), "12345678");
        assert_eq!(truncate_id(""), "");
    }

    #[test]
    fn test_table_row_shortens_ids() {
        let row = order_table_row(&order());

        assert_eq!(row.order_id, "65f1a2b3...");
        assert_eq!(row.user_id, "u-7");
        assert_eq!(row.created, "Mar 05, 2025 4:07 PM");
        assert_eq!(row.products, vec!["1x Item p1", "2x Item p2"]);
        assert_eq!(row.total, "PKR 4,000");
    }

    #[test]
    fn test_format_order_date() {
        let at = Utc.with_ymd_and_hms(2025, 3, 5, 16, 7, 0).unwrap();
        assert_eq!(format_order_date(&at), "Mar 05, 2025 4:07 PM");

        let midnight = Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        assert_eq!(format_order_date(&midnight), "Jan 01, 2025 12:30 AM");
    }

    #[test]
    fn test_csv_rows() {
        let csv = orders_to_csv(&[order()]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Order ID,User ID,Date Created,Date Updated,Status,Products,Total"
        );
        assert_eq!(
            lines[1],
            "65f1a2b3c4d5e6f708091a2b,u-7,\"Mar 05, 2025 4:07 PM\",\"Mar 05, 2025 9:09 AM\",Complete,\"1x p1, 2x p2\",4000"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_csv_escapes_quotes() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_empty_history_is_header_only() {
        let page = OrderHistoryPage {
            page_number: 1,
            limit: 10,
            total_records: 0,
            total_pages: 0,
            orders: vec![],
        };
        assert_eq!(history_to_csv(&page).lines().count(), 1);
    }
}
