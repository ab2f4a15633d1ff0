//! Unified error handling with Sentry breadcrumbs.
//!
//! Every fallible client operation returns [`Result<T>`]. Transport and JSON
//! failures are carried unchanged inside their variants.

use thiserror::Error;

/// Client-level error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 401. The sign-in redirect has already happened;
    /// callers should stop processing and let this propagate.
    #[error("Unauthorized")]
    Unauthorized,

    /// The checkout endpoint rejected the request.
    #[error("{0}")]
    Checkout(String),

    /// HTTP request failed or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request address could not be resolved against the base URL.
    #[error("Invalid address '{address}': {source}")]
    InvalidAddress {
        address: String,
        source: url::ParseError,
    },

    /// A request header name or value was malformed.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// Returns true for the sign-in redirect case.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Add a breadcrumb for client events.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of requests
/// leading up to an error. Without an initialized Sentry client this is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("auth", "Redirecting to sign-in", Some(&[("return_path", "/cart")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::Unauthorized.to_string(), "Unauthorized");

        let err = ClientError::Checkout("Cart empty".to_string());
        assert_eq!(err.to_string(), "Cart empty");

        let err = ClientError::InvalidHeader("bad name".to_string());
        assert_eq!(err.to_string(), "Invalid header: bad name");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ClientError::Unauthorized.is_unauthorized());
        assert!(!ClientError::Checkout("x".to_string()).is_unauthorized());
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = parse_err.into();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn test_breadcrumb_without_sentry_is_noop() {
        add_breadcrumb("auth", "Redirecting to sign-in", Some(&[("return_path", "/cart")]));
    }
}
