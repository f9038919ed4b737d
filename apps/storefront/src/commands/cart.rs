//! # Cart Commands
//!
//! Cart manipulation and rewards redemption.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Rewards  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ Redeemed │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       redeem_rewards    create_order     │
//! │                   remove_from_cart  cancel_rewards    (checkout.rs)    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command saves `cart.json` before returning.

use loop_core::pricing::PricingResult;
use loop_core::validation::{validate_rental_request, validate_rewards_points};
use loop_core::{CartItem, RentalRequest, RewardsBalance};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{Cart, CartState, ConfigState, SessionStore};

/// Cart response including items and pricing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub rewards_balance: RewardsBalance,
    pub pricing: PricingResult,
    /// Amount due, formatted for display (`"PKR 3,000"`)
    pub amount_due: String,
}

impl CartResponse {
    pub fn new(cart: &Cart, config: &ConfigState) -> Self {
        let pricing = cart.pricing(config.conversion_rate);
        CartResponse {
            items: cart.items.clone(),
            rewards_balance: cart.rewards_balance,
            amount_due: config.format_currency(pricing.amount_due()),
            pricing,
        }
    }
}

/// Applies a change to a copy of the cart, saves the copy, and only then
/// makes it the live cart. A failed change or save leaves the cart untouched.
fn update_cart<F>(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
    change: F,
) -> Result<CartResponse, ApiError>
where
    F: FnOnce(&mut Cart) -> Result<(), ApiError>,
{
    cart.with_cart_mut(|c| {
        let mut next = c.clone();
        change(&mut next)?;
        store.save_cart(&next)?;
        *c = next;
        Ok(CartResponse::new(c, config))
    })
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated pricing
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::new(c, config))
}

/// Adds a listing to the cart.
///
/// ## Behavior
/// - A listing already in the cart is rejected
/// - Price is "frozen" at time of adding
/// - The rent/buy form is required and validated first (rentals need a
///   date, purchases don't)
pub fn add_to_cart(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
    item: CartItem,
    request: &RentalRequest,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %item.id, price = item.price.rupees(), "add_to_cart command");

    validate_rental_request(request, item.product_listing).map_err(|e| {
        ApiError::validation(format!(
            "Please fill in all required fields before adding to cart: {}",
            e
        ))
    })?;

    update_cart(cart, config, store, |c| Ok(c.add_item(item)?))
}

/// Removes an item from the cart.
pub fn remove_from_cart(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    update_cart(cart, config, store, |c| {
        c.remove_item(product_id)?;
        Ok(())
    })
}

/// Clears all items from the cart.
pub fn clear_cart(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    update_cart(cart, config, store, |c| {
        c.clear();
        Ok(())
    })
}

/// Records the balance from `/order/rewards/{userId}`.
pub fn set_rewards_balance(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
    points: i64,
) -> Result<CartResponse, ApiError> {
    debug!(points, "set_rewards_balance command");

    let points = validate_rewards_points(points).map_err(|e| ApiError::validation(e.to_string()))?;

    update_cart(cart, config, store, |c| {
        c.set_rewards_balance(RewardsBalance::new(points));
        Ok(())
    })
}

/// "Redeem Rewards": switches the discount on.
pub fn redeem_rewards(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
) -> Result<CartResponse, ApiError> {
    debug!("redeem_rewards command");
    update_cart(cart, config, store, |c| Ok(c.apply_rewards()?))
}

/// "Cancel Rewards": switches the discount off.
pub fn cancel_rewards(
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
) -> Result<CartResponse, ApiError> {
    debug!("cancel_rewards command");

    update_cart(cart, config, store, |c| {
        c.cancel_rewards();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use loop_core::{ListingType, Money};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        cart: CartState,
        config: ConfigState,
        store: SessionStore,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        Fixture {
            _dir: dir,
            cart: CartState::new(),
            config: ConfigState::default(),
            store,
        }
    }

    fn item(id: &str, price: i64, listing: ListingType) -> CartItem {
        CartItem {
            id: id.to_string(),
            store_id: "s1".to_string(),
            title: "Embroidered lehenga".to_string(),
            image: None,
            price: Money::from_rupees(price),
            size: "M".to_string(),
            product_listing: listing,
            product_brand: "N/A".to_string(),
            date_added: Utc::now(),
        }
    }

    fn rental_form(date: Option<&str>) -> RentalRequest {
        RentalRequest {
            first_name: "Sana".to_string(),
            last_name: "Iqbal".to_string(),
            email: "sana@example.pk".to_string(),
            city: "Lahore".to_string(),
            address: "12 Mall Road".to_string(),
            phone: "03001234567".to_string(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_add_persists_cart() {
        let f = fixture();

        let response = add_to_cart(
            &f.cart,
            &f.config,
            &f.store,
            item("p1", 1500, ListingType::Sale),
            &rental_form(None),
        )
        .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.amount_due, "PKR 1,500");
        assert_eq!(f.store.load_cart().unwrap().item_count(), 1);
    }

    #[test]
    fn test_rental_needs_date() {
        let f = fixture();

        let err = add_to_cart(
            &f.cart,
            &f.config,
            &f.store,
            item("p1", 1500, ListingType::Rent),
            &rental_form(None),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(f.cart.with_cart(Cart::is_empty));

        add_to_cart(
            &f.cart,
            &f.config,
            &f.store,
            item("p1", 1500, ListingType::Rent),
            &rental_form(Some("2025-04-01")),
        )
        .unwrap();
    }

    #[test]
    fn test_blank_form_is_refused() {
        let f = fixture();
        let blank = RentalRequest::default();

        let err = add_to_cart(
            &f.cart,
            &f.config,
            &f.store,
            item("p1", 1500, ListingType::Sale),
            &blank,
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Please fill in all required fields"));
        assert!(f.cart.with_cart(Cart::is_empty));
        assert!(f.store.load_cart().unwrap().is_empty());
    }

    #[test]
    fn test_failed_save_leaves_cart_unchanged() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let store = SessionStore::open(&data).unwrap();
        let cart = CartState::new();
        let config = ConfigState::default();
        let form = rental_form(None);

        add_to_cart(&cart, &config, &store, item("p1", 100, ListingType::Sale), &form).unwrap();
        set_rewards_balance(&cart, &config, &store, 5).unwrap();

        // A directory where the temp file should go makes every save fail.
        std::fs::create_dir(data.join("cart.json.tmp")).unwrap();

        let err = add_to_cart(&cart, &config, &store, item("p2", 200, ListingType::Sale), &form)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(redeem_rewards(&cart, &config, &store).is_err());

        cart.with_cart(|c| {
            assert_eq!(c.item_count(), 1);
            assert!(!c.contains("p2"));
            assert!(!c.rewards_applied);
        });
    }

    #[test]
    fn test_failed_change_is_not_saved() {
        let f = fixture();
        let form = rental_form(None);
        add_to_cart(&f.cart, &f.config, &f.store, item("p1", 100, ListingType::Sale), &form)
            .unwrap();

        let err = add_to_cart(&f.cart, &f.config, &f.store, item("p1", 100, ListingType::Sale), &form)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let err = remove_from_cart(&f.cart, &f.config, &f.store, "p2").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(f.store.load_cart().unwrap().item_count(), 1);
    }

    #[test]
    fn test_redeem_flow() {
        let f = fixture();
        let form = rental_form(None);
        add_to_cart(&f.cart, &f.config, &f.store, item("p1", 1500, ListingType::Sale), &form)
            .unwrap();
        add_to_cart(&f.cart, &f.config, &f.store, item("p2", 2500, ListingType::Sale), &form)
            .unwrap();

        let err = redeem_rewards(&f.cart, &f.config, &f.store).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        set_rewards_balance(&f.cart, &f.config, &f.store, 10).unwrap();
        let redeemed = redeem_rewards(&f.cart, &f.config, &f.store).unwrap();
        assert_eq!(redeemed.pricing.discount.rupees(), 1000);
        assert_eq!(redeemed.amount_due, "PKR 3,000");
        assert!(f.store.load_cart().unwrap().rewards_applied);

        let cancelled = cancel_rewards(&f.cart, &f.config, &f.store).unwrap();
        assert_eq!(cancelled.amount_due, "PKR 4,000");
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        let f = fixture();
        let err = set_rewards_balance(&f.cart, &f.config, &f.store, -1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_clear_cart() {
        let f = fixture();
        let form = rental_form(None);
        add_to_cart(&f.cart, &f.config, &f.store, item("p1", 100, ListingType::Sale), &form)
            .unwrap();

        let response = clear_cart(&f.cart, &f.config, &f.store).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.pricing.original_total, Money::zero());
        assert!(get_cart(&f.cart, &f.config).items.is_empty());
    }
}
