//! Checkout endpoint wire types.

use serde::{Deserialize, Serialize};

use crate::keys::CHECKOUT_FALLBACK_ERROR;

/// Request body for creating a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Where the payment provider sends the user after paying.
    pub success_url: String,
    /// Where the payment provider sends the user if they back out.
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build a request from the two return URLs.
    #[must_use]
    pub fn new(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

/// Successful checkout response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutResponse {
    /// Payment page for the newly created session.
    pub url: String,
}

/// Error payload returned by the checkout endpoint on failure.
///
/// The server is expected to send `{"error": "..."}`, but any body is
/// accepted: a missing, empty or non-string `error` (or a body that is not
/// JSON at all) resolves to [`CHECKOUT_FALLBACK_ERROR`]. Non-string values
/// are never stringified: `{"error": 42}` or `{"error": true}` surface the
/// fallback, not `"42"` or `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutErrorBody {
    error: Option<String>,
}

impl CheckoutErrorBody {
    /// Extract the error message from a raw response body.
    #[must_use]
    pub fn from_slice(body: &[u8]) -> Self {
        let error = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("error") {
                Some(serde_json::Value::String(message)) if !message.is_empty() => {
                    Some(message.clone())
                }
                _ => None,
            });

        Self { error }
    }

    /// The server-provided message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The message to surface to the user.
    #[must_use]
    pub fn into_message(self) -> String {
        self.error
            .unwrap_or_else(|| CHECKOUT_FALLBACK_ERROR.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_snake_case() {
        let req = CheckoutRequest::new("https://x/success", "https://x/cancel");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success_url": "https://x/success",
                "cancel_url": "https://x/cancel",
            })
        );
    }

    #[test]
    fn test_response_deserializes_url() {
        let resp: CheckoutResponse =
            serde_json::from_str(r#"{"url":"https://pay.example/sess_1","id":"sess_1"}"#)
                .unwrap();
        assert_eq!(resp.url, "https://pay.example/sess_1");
    }

    #[test]
    fn test_error_body_uses_server_message() {
        let body = CheckoutErrorBody::from_slice(br#"{"error":"Cart empty"}"#);
        assert_eq!(body.server_message(), Some("Cart empty"));
        assert_eq!(body.into_message(), "Cart empty");
    }

    #[test]
    fn test_error_body_ignores_non_string_values() {
        for raw in [
            &br#"{"error":42}"#[..],
            br#"{"error":true}"#,
            br#"{"error":{"code":"cart_empty"}}"#,
            br#"{"error":["Cart empty"]}"#,
        ] {
            let body = CheckoutErrorBody::from_slice(raw);
            assert_eq!(body.server_message(), None);
            assert_eq!(body.into_message(), CHECKOUT_FALLBACK_ERROR);
        }
    }

    #[test]
    fn test_error_body_fallbacks() {
        for raw in [
            &b""[..],
            b"<html>Bad Gateway</html>",
            b"{}",
            br#"{"error":""}"#,
            br#"{"error":null}"#,
            br#"{"error":42}"#,
            b"[]",
        ] {
            assert_eq!(
                CheckoutErrorBody::from_slice(raw).into_message(),
                CHECKOUT_FALLBACK_ERROR,
                "body: {}",
                String::from_utf8_lossy(raw)
            );
        }
    }
}
