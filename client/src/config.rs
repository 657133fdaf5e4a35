//! Client configuration.
//!
//! Constants shared by every front end, plus [`ClientConfig`] which carries
//! the API base URL and the submission options. The native build reads
//! overrides from the environment; the CLI loads `.env` into it first.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// API base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "GEOFLIP_API_URL";

/// Environment variable enabling the in-flight submission guard.
pub const GUARD_IN_FLIGHT_ENV: &str = "GEOFLIP_GUARD_IN_FLIGHT";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "GEOFLIP_TIMEOUT_SECS";

/// Request timeout for the native transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Debounce window for the login trigger.
pub const LOGIN_DEBOUNCE_MS: u64 = 300;

/// Length of the one-time codes sent by email.
pub const OTP_LENGTH: usize = 6;

/// Minimum length of first and last names at sign-up.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Runtime configuration for a [`crate::pipeline::FormSubmitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    /// Suppress a submission while another one on the same submitter is
    /// still outstanding.
    pub guard_in_flight: bool,
    /// Request timeout (native transport only; browsers use their own).
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given API base URL.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended as is.
    pub fn new(api_url: impl Into<String>) -> ConfigResult<Self> {
        let api_url = api_url.into();
        let trimmed = api_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        Ok(Self {
            api_url: trimmed.to_string(),
            guard_in_flight: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load the configuration from the environment.
    ///
    /// Reads [`API_URL_ENV`], [`GUARD_IN_FLIGHT_ENV`] and [`TIMEOUT_ENV`],
    /// falling back to the defaults for anything unset.
    #[cfg(feature = "native")]
    pub fn from_env() -> ConfigResult<Self> {
        let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(api_url)?;

        if let Ok(flag) = std::env::var(GUARD_IN_FLIGHT_ENV) {
            config.guard_in_flight = matches!(flag.trim(), "1" | "true" | "yes" | "on");
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            config.timeout = parse_timeout(&secs)?;
        }

        Ok(config)
    }

    /// Enable or disable the in-flight guard.
    pub fn with_guard_in_flight(mut self, guard: bool) -> Self {
        self.guard_in_flight = guard;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for an API path such as `/accounts/user/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            guard_in_flight: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Parse a timeout given in whole seconds.
pub fn parse_timeout(value: &str) -> ConfigResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("https://api.geoflip.io/").unwrap();
        assert_eq!(config.api_url(), "https://api.geoflip.io");
        assert_eq!(
            config.endpoint("/accounts/user/login"),
            "https://api.geoflip.io/accounts/user/login"
        );
        assert_eq!(
            config.endpoint("accounts/user/verify"),
            "https://api.geoflip.io/accounts/user/verify"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = ClientConfig::new("ftp://example.com").unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiUrl("ftp://example.com".into()));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert!(!config.guard_in_flight);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
