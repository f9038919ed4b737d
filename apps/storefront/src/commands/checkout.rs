//! # Checkout Commands
//!
//! Turns the cart into the `/order/create` request.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  $ storefront checkout                                                  │
//! │    1. Require a signed-in user (session.json)                          │
//! │    2. Price the cart (rewards on or off)                               │
//! │    3. Build OrderRequest { userId, status, products, totalPrice, ... }  │
//! │    4. Print the POST it would make ──────► nothing changes              │
//! │                                                                         │
//! │  $ storefront checkout --confirm                                        │
//! │    Same as above, then the order counts as placed:                      │
//! │    5. Empty the cart                                                    │
//! │    6. Delete cart.json                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use loop_core::checkout::build_order_request;
use loop_core::pricing::PricingResult;
use loop_core::OrderRequest;
use serde::Serialize;
use tracing::{debug, info};

use super::{require_user, ApiCall};
use crate::error::ApiError;
use crate::state::{Cart, CartState, ConfigState, SessionStore};

pub const ORDER_CREATE_PATH: &str = "/order/create";

/// The order creation request plus what happened to the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub submission: ApiCall<OrderRequest>,
    pub pricing: PricingResult,
    /// Amount due, formatted for display
    pub amount_due: String,
    /// True when the cart was emptied because the order went through
    pub placed: bool,
}

/// Builds the order for the current cart.
///
/// ## Arguments
/// * `confirm` - The API accepted the order: empty the cart and forget it
///
/// ## Errors
/// - `UNAUTHENTICATED` when nobody is signed in
/// - `CART_ERROR` when the cart is empty
pub fn create_order(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
    confirm: bool,
) -> Result<CheckoutResponse, ApiError> {
    debug!(confirm, "create_order command");

    let user = require_user(store)?;

    let (request, pricing) = cart.with_cart(|c| {
        let pricing = c.pricing(config.conversion_rate);
        build_order_request(&user.user_id, &c.items, &pricing).map(|request| (request, pricing))
    })?;

    if confirm {
        cart.with_cart_mut(Cart::clear);
        store.clear_cart()?;
        info!(
            user_id = %user.user_id,
            total = request.total_price.rupees(),
            items = request.products.len(),
            "order placed, cart cleared"
        );
    }

    Ok(CheckoutResponse {
        submission: ApiCall::post(config.endpoint(ORDER_CREATE_PATH), request),
        amount_due: config.format_currency(pricing.amount_due()),
        pricing,
        placed: confirm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::UserSession;
    use chrono::Utc;
    use loop_core::{CartItem, ListingType, Money, OrderStatus, RewardsBalance};
    use tempfile::TempDir;

    fn listing(id: &str, price: i64) -> CartItem {
        CartItem {
            id: id.to_string(),
            store_id: "s1".to_string(),
            title: "Silk dupatta".to_string(),
            image: None,
            price: Money::from_rupees(price),
            size: "Free".to_string(),
            product_listing: ListingType::Sale,
            product_brand: "N/A".to_string(),
            date_added: Utc::now(),
        }
    }

    fn signed_in(dir: &TempDir) -> SessionStore {
        let store = SessionStore::open(dir.path()).unwrap();
        store
            .save_user(&UserSession {
                user_id: "u-7".to_string(),
                store_id: None,
                store_name: None,
            })
            .unwrap();
        store
    }

    fn filled_cart(store: &SessionStore) -> CartState {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            c.add_item(listing("p1", 1500)).unwrap();
            c.add_item(listing("p2", 2500)).unwrap();
            c.set_rewards_balance(RewardsBalance::new(10));
        });
        cart.with_cart(|c| store.save_cart(c)).unwrap();
        cart
    }

    #[test]
    fn test_requires_login() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let cart = filled_cart(&store);

        let err = create_order(&cart, &ConfigState::default(), &store, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = signed_in(&dir);

        let err =
            create_order(&CartState::new(), &ConfigState::default(), &store, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_dry_run_keeps_cart() {
        let dir = TempDir::new().unwrap();
        let store = signed_in(&dir);
        let cart = filled_cart(&store);

        let response = create_order(&cart, &ConfigState::default(), &store, false).unwrap();

        assert!(!response.placed);
        assert_eq!(response.submission.method, "POST");
        assert_eq!(
            response.submission.endpoint,
            "http://localhost:8000/order/create"
        );
        let order = &response.submission.payload;
        assert_eq!(order.user_id, "u-7");
        assert_eq!(order.status, OrderStatus::Complete);
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.total_price.rupees(), 4000);
        assert!(!order.rewards_usage);

        assert_eq!(store.load_cart().unwrap().item_count(), 2);
    }

    #[test]
    fn test_confirm_with_rewards_clears_cart() {
        let dir = TempDir::new().unwrap();
        let store = signed_in(&dir);
        let cart = filled_cart(&store);
        cart.with_cart_mut(|c| c.apply_rewards()).unwrap();

        let response = create_order(&cart, &ConfigState::default(), &store, true).unwrap();

        assert!(response.placed);
        assert_eq!(response.submission.payload.total_price.rupees(), 3000);
        assert!(response.submission.payload.rewards_usage);
        assert_eq!(response.pricing.rewards_consumed, 10);
        assert_eq!(response.amount_due, "PKR 3,000");

        assert!(cart.with_cart(Cart::is_empty));
        assert!(store.load_cart().unwrap().is_empty());
    }
}
