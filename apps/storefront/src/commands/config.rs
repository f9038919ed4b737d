//! # Config Commands
//!
//! Retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - Checking which API the storefront points at
/// - Checking the reward point value before redeeming
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
