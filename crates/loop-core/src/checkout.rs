//! # Checkout Module
//!
//! Turns a priced cart into the body of `POST /order/create`.
//!
//! ```text
//! CartItem[] ──► OrderLine[] (productId, storeId, quantity: 1)
//!                     │
//! PricingResult ──────┼──► totalPrice   = amount due
//!                     │    rewardsUsage = rewards_applied
//!                     ▼
//!               OrderRequest { userId, status: "Complete", ... }
//! ```

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingResult;
use crate::types::{CartItem, OrderLine, OrderRequest, OrderStatus};
use crate::validation::validate_entity_id;
use crate::ORDER_LINE_QUANTITY;

/// Builds the order line for one cart item.
pub fn order_line(item: &CartItem) -> OrderLine {
    OrderLine {
        product_id: item.id.clone(),
        store_id: item.store_id.clone(),
        quantity: ORDER_LINE_QUANTITY,
    }
}

/// Builds the order creation request.
///
/// `pricing` must have been computed from the same `items`; the request
/// carries its amount due and the redemption flag verbatim.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] when there is nothing to order
/// - [`CoreError::Validation`] when `user_id` is blank
pub fn build_order_request(
    user_id: &str,
    items: &[CartItem],
    pricing: &PricingResult,
) -> CoreResult<OrderRequest> {
    validate_entity_id("userId", user_id)?;

    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    debug!(
        user_id,
        items = items.len(),
        total = pricing.amount_due().rupees(),
        rewards_usage = pricing.rewards_applied,
        "building order request"
    );

    Ok(OrderRequest {
        user_id: user_id.trim().to_string(),
        status: OrderStatus::Complete,
        products: items.iter().map(order_line).collect(),
        total_price: pricing.amount_due(),
        rewards_usage: pricing.rewards_applied,
    })
}
