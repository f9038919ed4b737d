//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  $ storefront rewards redeem                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Session Error? ─── SessionError::Io { .. } ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Business Error? ─── CoreError::NoRewards... ──── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"code":"BUSINESS_LOGIC","message":"No rewards available..."} │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use loop_core::CoreError;
use serde::Serialize;

use crate::state::{ConfigError, SessionError};

/// API error returned from commands.
///
/// ## Serialization
/// This is what the caller receives when a command fails:
/// ```json
/// {
///   "code": "CART_ERROR",
///   "message": "Product 65f1c0ffee is already in your cart"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Business rule refused the operation
    BusinessLogic,

    /// Command needs a signed-in user
    Unauthenticated,

    /// Reading or writing session files failed
    StorageError,

    /// Bad configuration or unexpected failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Please log in first")
    }

    /// Renders the error as the JSON object printed on failure.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{{\"code\":\"INTERNAL\",\"message\":{:?}}}", self.message))
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotInCart(id) => return ApiError::not_found("Cart item", id),
            CoreError::AlreadyInCart(_) | CoreError::CartTooLarge { .. } | CoreError::EmptyCart => {
                ErrorCode::CartError
            }
            CoreError::NoRewardsAvailable | CoreError::InvalidResetState { .. } => {
                ErrorCode::BusinessLogic
            }
            CoreError::InvalidOtp | CoreError::PasswordMismatch | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session storage failed: {}", err);
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(format!("Invalid configuration: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
