//! # Cart State
//!
//! Manages the shopper's cart and rewards redemption toggle.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command may read or modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. The library can be embedded in a multi-threaded host
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shopper Action           Command                 Cart State Change     │
//! │  ──────────────           ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ───────► items.push(item)     │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► items.remove(i)      │
//! │                                                                         │
//! │  Rewards fetched ────────► set_rewards() ───────► rewards_balance = n  │
//! │                                                                         │
//! │  "Redeem Rewards" ───────► redeem_rewards() ────► rewards_applied=true │
//! │                                                                         │
//! │  "Cancel Rewards" ───────► cancel_rewards() ────► rewards_applied=false│
//! │                                                                         │
//! │  Order accepted ─────────► checkout(confirm) ───► items.clear()        │
//! │                                                                         │
//! │  View cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use loop_core::pricing::{calculate_pricing, PricingResult};
use loop_core::validation::{validate_cart_size, validate_entity_id, validate_price};
use loop_core::{
    CartItem, ConversionRate, CoreError, CoreResult, LineItem, RewardsBalance,
    MAX_CART_ITEMS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (a listing is a single garment)
/// - Every item has a non-negative price
/// - `rewards_applied` implies `rewards_balance > 0`
/// - Maximum items: `MAX_CART_ITEMS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in the order they were added
    pub items: Vec<CartItem>,

    /// Points on the shopper's account, as last fetched
    #[serde(default)]
    pub rewards_balance: RewardsBalance,

    /// Set by "Redeem Rewards", cleared by "Cancel Rewards"
    #[serde(default)]
    pub rewards_applied: bool,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            rewards_balance: RewardsBalance::default(),
            rewards_applied: false,
            created_at: Utc::now(),
        }
    }

    /// Adds a listing to the cart.
    ///
    /// ## Behavior
    /// - Rejects a listing that is already in the cart
    /// - Rejects blank ids and negative prices before they can reach pricing
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        validate_entity_id("productId", &item.id)?;
        validate_entity_id("storeId", &item.store_id)?;
        validate_price(item.price)?;

        if self.contains(&item.id) {
            return Err(CoreError::AlreadyInCart(item.id));
        }

        if validate_cart_size(self.items.len()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Removes an item from the cart by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == product_id)
            .ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;

        Ok(self.items.remove(index))
    }

    /// Empties the cart after an order went through.
    ///
    /// Redemption is switched off: the API deducts the points, so the
    /// balance must be fetched again before the next redemption.
    pub fn clear(&mut self) {
        self.items.clear();
        self.rewards_applied = false;
        self.created_at = Utc::now();
    }

    /// Stores the balance returned by the rewards endpoint.
    pub fn set_rewards_balance(&mut self, balance: RewardsBalance) {
        self.rewards_balance = balance;

        if balance.is_zero() && self.rewards_applied {
            debug!("rewards balance dropped to zero, cancelling redemption");
            self.rewards_applied = false;
        }
    }

    /// "Redeem Rewards".
    pub fn apply_rewards(&mut self) -> CoreResult<()> {
        if self.rewards_balance.is_zero() {
            return Err(CoreError::NoRewardsAvailable);
        }
        self.rewards_applied = true;
        Ok(())
    }

    /// "Cancel Rewards".
    pub fn cancel_rewards(&mut self) {
        self.rewards_applied = false;
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.id == product_id)
    }

    /// Returns the number of items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::line_item).collect()
    }

    /// Prices the cart as it stands.
    pub fn pricing(&self, rate: ConversionRate) -> PricingResult {
        calculate_pricing(
            &self.line_items(),
            self.rewards_balance,
            self.rewards_applied,
            rate,
        )
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>` because:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread modifies the cart at a time
///
/// A poisoned lock is recovered rather than propagated: every cart
/// mutation leaves the cart valid before it can panic.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::from_cart(Cart::new())
    }

    /// Wraps a cart loaded from the session store.
    pub fn from_cart(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use loop_storefront::state::CartState;
    ///
    /// let cart_state = CartState::new();
    /// let count = cart_state.with_cart(|cart| cart.item_count());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
