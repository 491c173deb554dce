//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Deadline applied to every outbound request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the per-user data directory under the home directory
pub const APP_DIR_NAME: &str = ".reqterm";

/// Environment variable overriding the data directory
pub const HOME_ENV_VAR: &str = "REQTERM_HOME";

/// Saved requests file inside the data directory
pub const STORE_FILE_NAME: &str = "requests.json";

/// Log file inside the data directory
pub const LOG_FILE_NAME: &str = "reqterm.log";

/// Style theme used for response highlighting
pub const THEME_NAME: &str = "base16-ocean.dark";

/// Application name
pub const APP_NAME: &str = "reqterm";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
