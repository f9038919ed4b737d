//! # Error Types
//!
//! Domain-specific error types for loop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  loop-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  ├── SessionError     - Session file failures                          │
//! │  ├── ConfigError      - Bad environment configuration                  │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stdout JSON            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing calculator itself never fails; these errors come from the
//! cart, checkout and password reset operations around it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item is not in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotInCart(String),

    /// The same listing was added twice.
    ///
    /// Listings are single garments, so the cart holds each one at most once.
    #[error("Product {0} is already in your cart")]
    AlreadyInCart(String),

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Redeem requested while the account holds no reward points.
    #[error("No rewards available to redeem")]
    NoRewardsAvailable,

    /// The submitted OTP does not match the one the server issued.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A password reset step was called out of order.
    #[error("Password reset is {current}, cannot {operation}")]
    InvalidResetState {
        current: &'static str,
        operation: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation at the boundary, before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
