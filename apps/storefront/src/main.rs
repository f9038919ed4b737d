//! # Storefront Entry Point
//!
//! ```text
//! $ storefront cart show
//! { "items": [...], "pricing": { "originalTotal": 4000, ... } }   exit 0
//!
//! $ storefront rewards redeem
//! {"code":"BUSINESS_LOGIC","message":"No rewards available to redeem"}   exit 1
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use loop_storefront::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match loop_storefront::run(cli) {
        Ok(output) => {
            println!("{:#}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", err.to_json());
            ExitCode::FAILURE
        }
    }
}
