//! # Loop Wear Storefront
//!
//! Library behind the `storefront` binary: state, commands and the
//! dispatcher that wires them to the command line.
//!
//! ## Module Organization
//! ```text
//! loop_storefront/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── session.rs  ◄─── cart.json / session.json
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared helpers
//! │   ├── cart.rs     ◄─── Cart and rewards commands
//! │   ├── checkout.rs ◄─── Order creation request
//! │   ├── product.rs  ◄─── Catalog query, reviews
//! │   ├── account.rs  ◄─── Login session, password reset
//! │   ├── dashboard.rs◄─── Orders by month
//! │   ├── vendor.rs   ◄─── Order history export
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! Each command receives only the state it needs:
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐
//! │  SessionStore    │ │    CartState     │ │    ConfigState       │
//! │                  │ │                  │ │                      │
//! │  • cart.json     │ │  • Cart items    │ │  • API base URL      │
//! │  • session.json  │ │  • Rewards       │ │  • Point value       │
//! └──────────────────┘ └──────────────────┘ └──────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{CartCommand, Cli, Command, DashboardCommand, RewardsCommand, VendorCommand};
use commands::account::ResetPasswordInput;
use loop_core::catalog::CatalogQuery;
use loop_core::{Money, ReviewRequest};
use error::ApiError;
use state::{CartState, ConfigState, SessionStore};

/// Runs one command and returns its JSON output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or --verbose)                 │
/// │  2. Load ConfigState from LOOP_* environment variables                 │
/// │  3. Open the session store (--data-dir, LOOP_DATA_DIR, platform dir)   │
/// │  4. Load cart.json into CartState                                      │
/// │  5. Dispatch the command                                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> Result<Value, ApiError> {
    init_tracing(cli.verbose);

    let config = ConfigState::from_env()?;
    let data_dir = resolve_data_dir(cli.data_dir, &config)?;
    let store = SessionStore::open(&data_dir)?;
    info!(data_dir = %data_dir.display(), "session store opened");

    let cart = CartState::from_cart(store.load_cart()?);

    dispatch(cli.command, &cart, &config, &store)
}

/// Routes a parsed command to its handler.
pub fn dispatch(
    command: Command,
    cart: &CartState,
    config: &ConfigState,
    store: &SessionStore,
) -> Result<Value, ApiError> {
    match command {
        Command::Cart { command } => match command {
            CartCommand::Show => to_json(commands::cart::get_cart(cart, config)),
            CartCommand::Add { item, request } => {
                let item = commands::read_json_file(&item)?;
                let request = commands::read_json_file(&request)?;
                to_json(commands::cart::add_to_cart(
                    cart, config, store, item, &request,
                )?)
            }
            CartCommand::Remove { product_id } => to_json(commands::cart::remove_from_cart(
                cart,
                config,
                store,
                &product_id,
            )?),
            CartCommand::Clear => to_json(commands::cart::clear_cart(cart, config, store)?),
        },
        Command::Rewards { command } => match command {
            RewardsCommand::Set { points } => to_json(commands::cart::set_rewards_balance(
                cart, config, store, points,
            )?),
            RewardsCommand::Redeem => to_json(commands::cart::redeem_rewards(cart, config, store)?),
            RewardsCommand::Cancel => to_json(commands::cart::cancel_rewards(cart, config, store)?),
        },
        Command::Products {
            categories,
            max_price,
            page,
            limit,
        } => to_json(commands::product::browse_catalog(
            config,
            &CatalogQuery {
                categories,
                max_price: Money::from_rupees(max_price),
                page,
                limit,
            },
        )?),
        Command::Review {
            product_id,
            name,
            email,
            note,
            photos,
        } => to_json(commands::product::submit_review(
            config,
            ReviewRequest {
                name,
                email,
                photos,
                review_note: note,
                product_id,
            },
        )?),
        Command::Checkout { confirm } => to_json(commands::checkout::create_order(
            cart, config, store, confirm,
        )?),
        Command::Login {
            user_id,
            store_id,
            store_name,
        } => to_json(commands::account::login(
            store,
            &user_id,
            store_id.as_deref(),
            store_name.as_deref(),
        )?),
        Command::Logout => {
            commands::account::logout(store)?;
            Ok(serde_json::json!({ "loggedOut": true }))
        }
        Command::ResetPassword {
            email,
            issued_otp,
            otp,
            password,
            confirm_password,
        } => to_json(commands::account::reset_password(
            config,
            &ResetPasswordInput {
                email: &email,
                issued_otp: &issued_otp,
                otp: &otp,
                password: &password,
                confirm_password: &confirm_password,
            },
        )?),
        Command::Dashboard { command } => match command {
            DashboardCommand::OrdersByMonth { records } => {
                to_json(commands::dashboard::orders_by_month(&records)?)
            }
        },
        Command::Vendor { command } => match command {
            VendorCommand::Orders { history } => {
                to_json(commands::vendor::list_orders(store, &history)?)
            }
            VendorCommand::Export { history, output } => to_json(
                commands::vendor::export_orders(config, store, &history, output.as_deref())?,
            ),
            VendorCommand::OrdersByMonth { history } => {
                to_json(commands::vendor::orders_by_month(store, &history)?)
            }
        },
        Command::Config => to_json(commands::config::get_config(config)),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize output: {}", e)))
}

/// Picks the session directory: flag, then `LOOP_DATA_DIR`, then platform default.
fn resolve_data_dir(flag: Option<PathBuf>, config: &ConfigState) -> Result<PathBuf, ApiError> {
    match flag.or_else(|| config.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(SessionStore::default_dir()?),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=loop_core=trace` - Show trace for the core crate only
/// - `--verbose` - Debug for everything
/// - Default: INFO, DEBUG for our crates
///
/// Logs go to stderr; stdout carries only command output.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "info,loop_storefront=debug,loop_core=debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn run_args(dir: &TempDir, args: &[&str]) -> Result<Value, ApiError> {
        let cli = Cli::parse_from(std::iter::once("storefront").chain(args.iter().copied()));
        let store = SessionStore::open(dir.path().join("data")).unwrap();
        let cart = CartState::from_cart(store.load_cart().unwrap());
        dispatch(cli.command, &cart, &ConfigState::default(), &store)
    }

    fn write_item(dir: &TempDir, id: &str, price: i64) -> String {
        let path = dir.path().join(format!("{}.json", id));
        fs::write(
            &path,
            format!(
                r#"{{"_id":"{}","storeId":"s1","title":"Kurta","price":{},"size":"M","productListing":"Sale","dateAdded":"2025-03-05T16:07:00Z"}}"#,
                id, price
            ),
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    fn write_form(dir: &TempDir) -> String {
        let path = dir.path().join("form.json");
        fs::write(
            &path,
            r#"{"firstName":"Sana","lastName":"Iqbal","email":"sana@example.pk","city":"Lahore","address":"12 Mall Road","phone":"03001234567"}"#,
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_shopping_session_across_invocations() {
        let dir = TempDir::new().unwrap();
        let p1 = write_item(&dir, "p1", 1500);
        let p2 = write_item(&dir, "p2", 2500);
        let form = write_form(&dir);

        run_args(&dir, &["cart", "add", &p1, "--request", &form]).unwrap();
        run_args(&dir, &["cart", "add", &p2, "--request", &form]).unwrap();
        run_args(&dir, &["rewards", "set", "10"]).unwrap();
        let redeemed = run_args(&dir, &["rewards", "redeem"]).unwrap();
        assert_eq!(redeemed["pricing"]["discountedTotal"], 3000);
        assert_eq!(redeemed["items"][0]["productBrand"], "N/A");

        let err = run_args(&dir, &["checkout"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);

        run_args(&dir, &["login", "--user-id", "u-7"]).unwrap();
        let placed = run_args(&dir, &["checkout", "--confirm"]).unwrap();
        assert_eq!(placed["submission"]["payload"]["totalPrice"], 3000);
        assert_eq!(placed["submission"]["payload"]["rewardsUsage"], true);

        let shown = run_args(&dir, &["cart", "show"]).unwrap();
        assert_eq!(shown["items"].as_array().unwrap().len(), 0);

        let out = run_args(&dir, &["logout"]).unwrap();
        assert_eq!(out["loggedOut"], true);
    }

    #[test]
    fn test_error_output_is_structured() {
        let dir = TempDir::new().unwrap();
        let err = run_args(&dir, &["cart", "remove", "ghost"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let form = write_form(&dir);
        let err =
            run_args(&dir, &["cart", "add", "/no/such/item.json", "--request", &form]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let item = write_item(&dir, "p1", 1500);
        let blank = dir.path().join("blank.json");
        fs::write(
            &blank,
            r#"{"firstName":"","lastName":"","email":"","city":"","address":"","phone":""}"#,
        )
        .unwrap();
        let err = run_args(
            &dir,
            &["cart", "add", &item, "--request", &blank.to_string_lossy()],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_catalog_and_review_requests() {
        let dir = TempDir::new().unwrap();

        let listing = run_args(
            &dir,
            &["products", "--category", "Bridal Wear", "--max-price", "9000"],
        )
        .unwrap();
        assert_eq!(listing["method"], "GET");
        assert_eq!(
            listing["endpoint"],
            "http://localhost:8000/product/getAllProducts?limit=10&page=1&category=Bridal%20Wear&max=9000"
        );
        assert!(listing["payload"].is_null());

        let review = run_args(
            &dir,
            &[
                "review",
                "--product-id",
                "p1",
                "--name",
                "Hira",
                "--email",
                "hira@example.pk",
                "--note",
                "Lovely fabric",
            ],
        )
        .unwrap();
        assert_eq!(review["endpoint"], "http://localhost:8000/reviews/add");
        assert_eq!(review["payload"]["photos"], serde_json::json!([]));

        let err = run_args(
            &dir,
            &[
                "review",
                "--product-id",
                "p1",
                "--name",
                "Hira",
                "--email",
                "hira@example.pk",
                "--note",
                "ok",
            ],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = ConfigState {
            data_dir: Some(PathBuf::from("/env/dir")),
            ..ConfigState::default()
        };

        let dir = resolve_data_dir(Some(PathBuf::from("/flag/dir")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/flag/dir"));

        let dir = resolve_data_dir(None, &config).unwrap();
        assert_eq!(dir, PathBuf::from("/env/dir"));
    }
}
