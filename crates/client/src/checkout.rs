//! Checkout session client.

use std::sync::Arc;

use reqwest::Method;

use shopfront_core::{CheckoutErrorBody, CheckoutRequest, CheckoutResponse};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, add_breadcrumb};
use crate::fetch::{ApiClient, RequestInit};

/// Creates checkout sessions on the storefront API.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    api: Arc<ApiClient>,
    checkout_path: String,
}

impl CheckoutClient {
    /// Create a checkout client on top of a shared [`ApiClient`].
    #[must_use]
    pub fn new(api: Arc<ApiClient>, config: &ClientConfig) -> Self {
        Self {
            api,
            checkout_path: config.checkout_path.clone(),
        }
    }

    /// The underlying API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Create a checkout session and return the payment page to redirect to.
    ///
    /// Single attempt: no retry, no timeout, no caching.
    ///
    /// # Errors
    ///
    /// - `ClientError::Unauthorized` if the user must sign in first
    /// - `ClientError::Checkout` with the server's `error` message, or
    ///   "Failed to create checkout session" when it gives none
    /// - `ClientError::Http` / `ClientError::Json` for transport failures or a
    ///   malformed success body
    pub async fn create_checkout_session(
        &self,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String> {
        let init = RequestInit::with_method(Method::POST)
            .json(&CheckoutRequest::new(success_url, cancel_url))?;

        let response = self
            .api
            .fetch_with_auth_handling(&self.checkout_path, Some(init))
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = CheckoutErrorBody::from_slice(&body).into_message();
            tracing::warn!(
                status = status.as_u16(),
                error = %message,
                "Checkout session request failed"
            );
            add_breadcrumb(
                "checkout",
                "Checkout session request failed",
                Some(&[("status", status.as_str()), ("error", message.as_str())]),
            );
            return Err(ClientError::Checkout(message));
        }

        let session: CheckoutResponse = serde_json::from_slice(&body)?;

        tracing::debug!(url = %session.url, "Checkout session created");

        Ok(session.url)
    }
}
