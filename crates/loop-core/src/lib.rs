//! # loop-core: Pure Business Logic for the Loop Wear Storefront
//!
//! This crate holds the storefront logic that does not depend on a browser,
//! a network or a disk: cart pricing with rewards, order payloads, dashboard
//! aggregation, order export and the password reset flow.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Loop Wear Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (apps/storefront)                    │   │
//! │  │   CLI ──► commands ──► CartState / UserSession ──► JSON files   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ loop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │ Rewards   │  │   Money   │  │ OrderReq  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────────┐ ┌───────┐ │   │
//! │  │   │ analytics │  │  export   │  │ password_reset │ │catalog│ │   │
//! │  │   └───────────┘  └───────────┘  └────────────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                    Remote commerce API (external)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, LineItem, OrderRequest, etc.)
//! - [`money`] - Money type with integer arithmetic (whole PKR)
//! - [`pricing`] - Cart pricing calculator with rewards redemption
//! - [`checkout`] - Order payload construction
//! - [`catalog`] - Product listing query from the catalog filters
//! - [`analytics`] - Month-bucketed order counts for the dashboard chart
//! - [`export`] - Vendor order history CSV and display helpers
//! - [`password_reset`] - OTP-gated password reset flow
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use loop_core::pricing::calculate_pricing;
//! use loop_core::{ConversionRate, LineItem, Money, RewardsBalance};
//!
//! let items = vec![
//!     LineItem::new("a", Money::from_rupees(1500)),
//!     LineItem::new("b", Money::from_rupees(2500)),
//! ];
//!
//! let result = calculate_pricing(&items, RewardsBalance::new(10), true, ConversionRate::default());
//! assert_eq!(result.original_total.rupees(), 4000);
//! assert_eq!(result.discounted_total.rupees(), 3000);
//! assert_eq!(result.rewards_consumed, 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod export;
pub mod money;
pub mod password_reset;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::PricingResult;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency value of one reward point when nothing else is configured.
pub const DEFAULT_CONVERSION_RATE: i64 = 100;

/// Maximum items allowed in a single cart.
///
/// Every listing is a single garment, so this is also the largest order.
pub const MAX_CART_ITEMS: usize = 50;

/// Quantity sent for every ordered product. Listings are one-off garments.
pub const ORDER_LINE_QUANTITY: u32 = 1;

/// Photos allowed on one product review.
pub const MAX_REVIEW_PHOTOS: usize = 4;
