//! # Pricing Module
//!
//! Computes what the shopper owes for the cart, with optional rewards
//! redemption.
//!
//! ## Rewards Redemption
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart: PKR 1,500 + PKR 2,500                  Rewards balance: 10 pts  │
//! │                                                                         │
//! │  original_total   = 1500 + 2500               = 4000                    │
//! │                                                                         │
//! │  "Redeem Rewards" clicked (rate: 100 per point)                        │
//! │  max_discount     = 10 × 100                  = 1000                    │
//! │  discount         = min(1000, 4000)           = 1000                    │
//! │  discounted_total = 4000 - 1000               = 3000                    │
//! │  rewards_consumed = min(10, floor(4000/100))  = 10                      │
//! │                                                                         │
//! │  "Cancel Rewards" clicked                                              │
//! │  discounted_total = original_total            = 4000                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator is a plain function of its inputs. It never reads the
//! cart, the session or the rewards endpoint; callers pass those in and
//! call it again whenever any of them change.
//!
//! ## Invariants
//! For non-negative prices (checked by [`crate::validation::validate_price`]
//! before an item enters a cart):
//! - `discounted_total <= original_total`
//! - `discounted_total >= 0`
//! - `rewards_consumed <= rewards_balance`

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ConversionRate, LineItem, RewardsBalance};

// =============================================================================
// Pricing Result
// =============================================================================

/// Original and discounted totals for one cart state.
///
/// Derived on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingResult {
    /// Sum of all unit prices.
    pub original_total: Money,

    /// Amount taken off by redeemed rewards (zero when not applied).
    pub discount: Money,

    /// `original_total - discount`.
    pub discounted_total: Money,

    /// Whether the shopper asked to redeem rewards.
    pub rewards_applied: bool,

    /// Points reported as used by this order.
    pub rewards_consumed: u32,
}

impl PricingResult {
    /// Result for a cart with no redemption.
    pub const fn undiscounted(original_total: Money) -> Self {
        PricingResult {
            original_total,
            discount: Money::zero(),
            discounted_total: original_total,
            rewards_applied: false,
            rewards_consumed: 0,
        }
    }

    /// The amount to submit as the order total.
    #[inline]
    pub const fn amount_due(&self) -> Money {
        if self.rewards_applied {
            self.discounted_total
        } else {
            self.original_total
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices a cart.
///
/// ## Arguments
/// * `items` - Line items; order doesn't matter
/// * `rewards` - Points on the shopper's account
/// * `rewards_applied` - Set only by an explicit "Redeem Rewards" action
/// * `rate` - Rupee value of one point
///
/// ## Example
/// ```rust
/// use loop_core::pricing::calculate_pricing;
/// use loop_core::{ConversionRate, LineItem, Money, RewardsBalance};
///
/// let items = [LineItem::new("p1", Money::from_rupees(50))];
/// let result = calculate_pricing(&items, RewardsBalance::new(100), true, ConversionRate::default());
///
/// // Discount is capped at the cart total
/// assert_eq!(result.discounted_total.rupees(), 0);
/// assert_eq!(result.rewards_consumed, 0);
/// ```
pub fn calculate_pricing(
    items: &[LineItem],
    rewards: RewardsBalance,
    rewards_applied: bool,
    rate: ConversionRate,
) -> PricingResult {
    let original_total: Money = items.iter().map(|item| item.unit_price).sum();

    if !rewards_applied {
        return PricingResult::undiscounted(original_total);
    }

    let max_discount = rate
        .point_value()
        .saturating_mul(i64::from(rewards.points()));
    let discount = max_discount.min(original_total).max(Money::zero());
    let discounted_total = original_total.saturating_sub(discount);

    // Whole points the total can absorb; any remainder below one point's
    // value is still discounted but not counted as a consumed point.
    let affordable_points = original_total.rupees().max(0) / rate.rupees_per_point();
    let rewards_consumed = affordable_points
        .min(i64::from(rewards.points()))
        .try_into()
        .unwrap_or(rewards.points());

    PricingResult {
        original_total,
        discount,
        discounted_total,
        rewards_applied: true,
        rewards_consumed,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
