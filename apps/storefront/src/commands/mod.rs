//! # Storefront Commands Module
//!
//! All operations exposed on the command line.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (shared helpers)
//! ├── cart.rs       ◄─── Cart and rewards redemption
//! ├── checkout.rs   ◄─── Order request for /order/create
//! ├── product.rs    ◄─── Catalog query, product reviews
//! ├── account.rs    ◄─── Login session, password reset
//! ├── dashboard.rs  ◄─── Admin orders-by-month chart
//! ├── vendor.rs     ◄─── Vendor order history export
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ storefront cart add item.json --request form.json                    │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      cart: &CartState,        ◄── Loaded from cart.json                 │
//! │      config: &ConfigState,    ◄── From LOOP_* env vars                  │
//! │      store: &SessionStore,    ◄── Saves cart.json afterwards            │
//! │      item: CartItem,          ◄── From the item file                    │
//! │      request: &RentalRequest, ◄── From the form file                    │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: { "items": [...], "pricing": {...} }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never talk to the network. Where the web storefront would call
//! the commerce API, a command returns the [`ApiCall`] it would make.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod product;
pub mod vendor;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ErrorCode};
use crate::state::{SessionStore, UserSession};

/// A request the storefront would send to the commerce API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCall<T> {
    pub method: &'static str,
    pub endpoint: String,
    pub payload: T,
}

impl<T> ApiCall<T> {
    pub fn post(endpoint: String, payload: T) -> Self {
        ApiCall {
            method: "POST",
            endpoint,
            payload,
        }
    }
}

impl ApiCall<()> {
    /// A request with everything in the URL; the payload prints as `null`.
    pub fn get(endpoint: String) -> Self {
        ApiCall {
            method: "GET",
            endpoint,
            payload: (),
        }
    }
}

/// Reads a JSON input file given on the command line.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let bytes = fs::read(path).map_err(|e| {
        ApiError::new(
            ErrorCode::NotFound,
            format!("Cannot read {}: {}", path.display(), e),
        )
    })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::validation(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Returns the signed-in user or an `UNAUTHENTICATED` error.
pub fn require_user(store: &SessionStore) -> Result<UserSession, ApiError> {
    store.load_user()?.ok_or_else(ApiError::unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_core::CartItem;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_errors() {
        let dir = TempDir::new().unwrap();

        let missing = read_json_file::<CartItem>(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2").unwrap();
        let invalid = read_json_file::<CartItem>(&bad).unwrap_err();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_require_user() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        assert_eq!(
            require_user(&store).unwrap_err().code,
            ErrorCode::Unauthenticated
        );

        store
            .save_user(&UserSession {
                user_id: "u1".to_string(),
                store_id: None,
                store_name: None,
            })
            .unwrap();
        assert_eq!(require_user(&store).unwrap().user_id, "u1");
    }
}
