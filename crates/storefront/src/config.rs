//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `SEKO_HOST` - Bind address (default: 127.0.0.1)
//! - `SEKO_PORT` - Listen port (default: 3000)
//! - `SEKO_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `SEKO_CATALOG_PATH` - JSON file with the product list (default: built-in catalog)
//! - `SEKO_CONTACT_EMAIL` - Inbox contact messages are addressed to
//! - `SEKO_CONTACT_RATE_LIMIT` - Rate limit the contact endpoint per IP (default: true)
//! - `SEKO_LOG_JSON` - Emit JSON logs instead of text (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use seko_core::Email;
use thiserror::Error;
use url::Url;

/// Default inbox for contact form messages.
pub const DEFAULT_CONTACT_EMAIL: &str = "deshidratadosseko@gmail.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Optional JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Inbox contact messages are addressed to
    pub contact_email: Email,
    /// Whether the contact endpoint is rate limited per client IP
    pub contact_rate_limit: bool,
    /// Emit JSON logs
    pub log_json: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN; Sentry stays disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Error event sample rate (0.0 - 1.0)
    pub sample_rate: f32,
    /// Transaction sample rate (0.0 - 1.0)
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup };

        let host = env.parse_or("SEKO_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("SEKO_PORT", 3000)?;
        let base_url = env.parse_or(
            "SEKO_BASE_URL",
            Url::parse("http://localhost:3000").map_err(|e| {
                ConfigError::InvalidEnvVar("SEKO_BASE_URL".to_string(), e.to_string())
            })?,
        )?;
        let catalog_path = env.optional("SEKO_CATALOG_PATH").map(PathBuf::from);
        let contact_email = match env.optional("SEKO_CONTACT_EMAIL") {
            Some(value) => Email::parse(value.trim()).map_err(|e| {
                ConfigError::InvalidEnvVar("SEKO_CONTACT_EMAIL".to_string(), e.to_string())
            })?,
            None => default_contact_email()?,
        };
        let contact_rate_limit = env.parse_or("SEKO_CONTACT_RATE_LIMIT", true)?;
        let log_json = env.parse_or("SEKO_LOG_JSON", false)?;

        let sentry = SentryConfig {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.optional("SENTRY_ENVIRONMENT"),
            sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            contact_email,
            contact_rate_limit,
            log_json,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

fn default_contact_email() -> Result<Email, ConfigError> {
    Email::parse(DEFAULT_CONTACT_EMAIL).map_err(|e| {
        ConfigError::InvalidEnvVar("SEKO_CONTACT_EMAIL".to_string(), e.to_string())
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
