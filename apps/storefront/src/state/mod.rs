//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. Each command declares exactly the
//! state it needs, and tests build only what they exercise.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      storefront::run                            │   │
//! │  │  let config = ConfigState::from_env()?;                         │   │
//! │  │  let store  = SessionStore::open(dir)?;                         │   │
//! │  │  let cart   = CartState::from_cart(store.load_cart()?);         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionStore │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  cart.json   │  │  Arc<Mutex<  │  │  api_base_url    │              │
//! │  │  session.json│  │    Cart      │  │  conversion_rate │              │
//! │  │              │  │  >>          │  │  currency_code   │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionStore: one file per concern, replaced atomically             │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod session;

pub use cart::{Cart, CartState};
pub use config::{ConfigError, ConfigState};
pub use session::{SessionError, SessionStore, UserSession};
