//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_BASE_URL` - Origin of the storefront (e.g., `https://shop.example`)
//!
//! ## Optional
//! - `SHOPFRONT_SIGNIN_PATH` - Sign-in page (default: /signin)
//! - `SHOPFRONT_CHECKOUT_PATH` - Checkout session endpoint (default: /api/checkout)
//! - `SHOPFRONT_LOGIN_NOTICE` - Show a login notice on 401 (default: false)
//! - `SHOPFRONT_SESSION_COOKIE` - `Cookie` header sent with every request
//! - `SENTRY_DSN` - Sentry error tracking DSN

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use shopfront_core::keys::{CHECKOUT_PATH, SIGNIN_PATH};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
///
/// Implements `Debug` manually to redact the session cookie.
#[derive(Clone)]
pub struct ClientConfig {
    /// Origin every relative address is resolved against
    pub base_url: Url,
    /// Page to navigate to on an unauthorized response
    pub signin_path: String,
    /// Checkout session endpoint
    pub checkout_path: String,
    /// Whether to show the login notice on an unauthorized response
    pub login_notice: bool,
    /// Raw `Cookie` header value carrying the storefront session
    pub session_cookie: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("signin_path", &self.signin_path)
            .field("checkout_path", &self.checkout_path)
            .field("login_notice", &self.login_notice)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            signin_path: SIGNIN_PATH.to_string(),
            checkout_path: CHECKOUT_PATH.to_string(),
            login_notice: false,
            session_cookie: None,
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "SHOPFRONT_BASE_URL",
            &get_required_env("SHOPFRONT_BASE_URL")?,
        )?;
        let signin_path = parse_path(
            "SHOPFRONT_SIGNIN_PATH",
            get_env_or_default("SHOPFRONT_SIGNIN_PATH", SIGNIN_PATH),
        )?;
        let checkout_path = parse_path(
            "SHOPFRONT_CHECKOUT_PATH",
            get_env_or_default("SHOPFRONT_CHECKOUT_PATH", CHECKOUT_PATH),
        )?;
        let login_notice = parse_bool(
            "SHOPFRONT_LOGIN_NOTICE",
            &get_env_or_default("SHOPFRONT_LOGIN_NOTICE", "false"),
        )?;
        let session_cookie = get_optional_env("SHOPFRONT_SESSION_COOKIE").map(SecretString::from);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            base_url,
            signin_path,
            checkout_path,
            login_notice,
            session_cookie,
            sentry_dsn,
        })
    }

    /// Override the sign-in page.
    #[must_use]
    pub fn with_signin_path(mut self, path: impl Into<String>) -> Self {
        self.signin_path = path.into();
        self
    }

    /// Override the checkout session endpoint.
    #[must_use]
    pub fn with_checkout_path(mut self, path: impl Into<String>) -> Self {
        self.checkout_path = path.into();
        self
    }

    /// Enable or disable the login notice on unauthorized responses.
    #[must_use]
    pub const fn with_login_notice(mut self, enabled: bool) -> Self {
        self.login_notice = enabled;
        self
    }

    /// Send the given `Cookie` header with every request.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: SecretString) -> Self {
        self.session_cookie = Some(cookie);
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the storefront origin; only `http` and `https` are accepted.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Paths are resolved against the base URL, so they must be root-relative.
fn parse_path(key: &str, value: String) -> Result<String, ConfigError> {
    if value.starts_with('/') && !value.starts_with("//") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("'{value}' must start with '/'"),
        ))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
