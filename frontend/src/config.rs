//! Application configuration.
//!
//! Centralized configuration for the Geoflip account screens. The API URL
//! is baked in at build time from `GEOFLIP_API_URL`.

use geoflip_client::config::DEFAULT_API_URL;

/// Accounts API base URL.
pub const API_URL: &str = match option_env!("GEOFLIP_API_URL") {
    Some(url) => url,
    None => DEFAULT_API_URL,
};

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 5_000;

/// Maximum toasts shown at once; the oldest go first.
pub const MAX_TOASTS: usize = 4;

/// Ignore a second submit while one is still running.
pub const GUARD_IN_FLIGHT: bool = false;
