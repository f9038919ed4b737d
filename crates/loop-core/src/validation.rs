//! # Validation Module
//!
//! Input validation for the storefront boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── Immediate user feedback (required fields, lengths)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront commands (Rust)                                   │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: prices, ids, emails, OTPs, form fields               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pure logic (pricing, checkout)                               │
//! │  └── Assumes inputs already passed layer 2                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing calculator stays total by relying on these checks: a
//! negative price is rejected here, before the item is ever added to a cart.
//!
//! ## Usage
//! ```rust
//! use loop_core::validation::{validate_email, validate_price};
//! use loop_core::Money;
//!
//! validate_price(Money::from_rupees(1500)).unwrap();
//! assert!(validate_email("shopper@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use url::Url;

use crate::types::{ListingType, RentalRequest, ReviewRequest};
use crate::{MAX_CART_ITEMS, MAX_REVIEW_PHOTOS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted on reset.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum password length accepted on reset.
pub const MAX_PASSWORD_LEN: usize = 128;

fn min_chars(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an identifier issued by the commerce API (product, store, user).
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
/// - ASCII letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use loop_core::validation::validate_entity_id;
///
/// assert!(validate_entity_id("productId", "65f1a2b3c4d5e6f708091a2b").is_ok());
/// assert!(validate_entity_id("productId", "").is_err());
/// assert!(validate_entity_id("productId", "has space").is_err());
/// ```
pub fn validate_entity_id(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a listing price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (giveaways)
///
/// ## Example
/// ```rust
/// use loop_core::validation::validate_price;
/// use loop_core::Money;
///
/// assert!(validate_price(Money::from_rupees(1500)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_rupees(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a rewards balance as read from an untyped source.
///
/// The API returns a JSON number; anything negative or beyond `u32` is
/// rejected instead of being clamped.
pub fn validate_rewards_points(points: i64) -> ValidationResult<u32> {
    u32::try_from(points).map_err(|_| ValidationError::OutOfRange {
        field: "rewards".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more item fits in a cart holding `current_items`.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
///
/// ## Example
/// ```rust
/// use loop_core::validation::validate_email;
///
/// assert!(validate_email("ayesha@loopwear.pk").is_ok());
/// assert!(validate_email("ayesha@loopwear").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must have exactly one @ with a name before it"));
    }

    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid("must have a valid domain")),
    }
}

/// Validates a new password.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    let len = password.chars().count();

    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates an OTP as typed by the user: digits only, 4 to 8 of them.
///
/// ## Returns
/// The trimmed OTP.
pub fn validate_otp(otp: &str) -> ValidationResult<String> {
    let otp = otp.trim();

    if otp.is_empty() {
        return Err(ValidationError::Required {
            field: "otp".to_string(),
        });
    }

    if !(4..=8).contains(&otp.len()) || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "otp".to_string(),
            reason: "must be 4 to 8 digits".to_string(),
        });
    }

    Ok(otp.to_string())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the rent/buy request form on a product page.
///
/// ## Rules
/// ```text
/// firstName, lastName  ≥ 2 chars
/// email                valid address
/// city                 required
/// address              ≥ 5 chars
/// phone                ≥ 10 chars
/// date                 required for rentals only
/// ```
///
/// Reports the first failing field.
pub fn validate_rental_request(
    request: &RentalRequest,
    listing: ListingType,
) -> ValidationResult<()> {
    min_chars("firstName", &request.first_name, 2)?;
    min_chars("lastName", &request.last_name, 2)?;
    validate_email(&request.email)?;
    min_chars("city", &request.city, 1)?;
    min_chars("address", &request.address, 5)?;
    min_chars("phone", &request.phone, 10)?;

    if listing.requires_date() {
        let date = request.date.as_deref().unwrap_or_default();
        min_chars("date", date, 1)?;
    }

    Ok(())
}

/// Validates a product review before it is posted.
///
/// ## Rules
/// ```text
/// productId   valid id
/// name        ≥ 2 chars
/// email       valid address
/// reviewNote  ≥ 5 chars
/// photos      at most 4, each an http(s) URL
/// ```
pub fn validate_review(review: &ReviewRequest) -> ValidationResult<()> {
    validate_entity_id("productId", &review.product_id)?;
    min_chars("name", &review.name, 2)?;
    validate_email(&review.email)?;
    min_chars("reviewNote", &review.review_note, 5)?;

    if review.photos.len() > MAX_REVIEW_PHOTOS {
        return Err(ValidationError::OutOfRange {
            field: "photos".to_string(),
            min: 0,
            max: MAX_REVIEW_PHOTOS as i64,
        });
    }

    for photo in &review.photos {
        let is_web_url = Url::parse(photo.trim())
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !is_web_url {
            return Err(ValidationError::InvalidFormat {
                field: "photos".to_string(),
                reason: format!("'{}' is not an image URL", photo),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
