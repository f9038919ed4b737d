//! # Command Line Interface
//!
//! `clap` definitions for the `storefront` binary. Every subcommand maps to
//! one function in [`crate::commands`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Loop Wear storefront: cart, rewards and checkout")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding cart.json and session.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cart contents
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Rewards balance and redemption
    Rewards {
        #[command(subcommand)]
        command: RewardsCommand,
    },
    /// Build the catalog listing request
    Products {
        /// Category filter; repeat for several
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,
        /// Price ceiling in rupees; 200000 or more means no filter
        #[arg(long, default_value_t = 200_000)]
        max_price: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Post a product review
    Review {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Review text
        #[arg(long)]
        note: String,
        /// Uploaded image URL; up to four
        #[arg(long = "photo", value_name = "URL")]
        photos: Vec<String>,
    },
    /// Build the order for the current cart
    Checkout {
        /// The order was accepted: empty the cart
        #[arg(long)]
        confirm: bool,
    },
    /// Record the signed-in user
    Login {
        #[arg(long)]
        user_id: String,
        /// Vendor store ID
        #[arg(long)]
        store_id: Option<String>,
        #[arg(long)]
        store_name: Option<String>,
    },
    /// Forget the signed-in user
    Logout,
    /// Reset a forgotten password with an emailed OTP
    ResetPassword {
        #[arg(long)]
        email: String,
        /// Code issued by the server
        #[arg(long)]
        issued_otp: String,
        /// Code typed by the user
        #[arg(long)]
        otp: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Admin dashboard data
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Vendor order history
    Vendor {
        #[command(subcommand)]
        command: VendorCommand,
    },
    /// Show the active configuration
    Config,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show items and pricing
    Show,
    /// Add a listing (JSON file with the product snapshot)
    Add {
        item: PathBuf,
        /// Rent/buy request form, validated before adding (JSON file)
        #[arg(long)]
        request: PathBuf,
    },
    /// Remove a listing by product ID
    Remove { product_id: String },
    /// Remove everything
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum RewardsCommand {
    /// Record the balance from the rewards endpoint
    Set {
        #[arg(allow_negative_numbers = true)]
        points: i64,
    },
    /// Apply the rewards discount
    Redeem,
    /// Remove the rewards discount
    Cancel,
}

#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Bucket /stats/graphData records into months
    OrdersByMonth { records: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum VendorCommand {
    /// Show order history as the orders table does
    Orders { history: PathBuf },
    /// Write order history as CSV
    Export {
        history: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Count order history by creation month
    OrdersByMonth { history: PathBuf },
}
