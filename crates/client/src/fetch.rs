//! Authenticated fetch wrapper.
//!
//! [`ApiClient::fetch_with_auth_handling`] behaves like a plain fetch except
//! for `401 Unauthorized`: the current page is remembered under
//! `redirectAfterLogin`, the user is optionally notified, the page navigates
//! to the sign-in address and the call fails with
//! [`ClientError::Unauthorized`]. Every other status, error statuses
//! included, is handed back untouched.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use url::Url;

use shopfront_core::keys::LOGIN_REQUIRED_MESSAGE;

use crate::browser::{self, BrowserContext, TracingNotifier};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result, add_breadcrumb};

/// Optional request configuration: method, headers and body.
///
/// Defaults to a `GET` with no extra headers and no body.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestInit {
    /// An empty `GET` request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A request with the given method.
    #[must_use]
    pub fn with_method(method: Method) -> Self {
        Self::new().method(method)
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header, replacing any previous value for the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header from strings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if the name or value is malformed.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        Ok(self.header(name, value))
    }

    /// Set a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Json` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body))
    }

    /// The configured method.
    #[must_use]
    pub const fn method_ref(&self) -> &Method {
        &self.method
    }

    /// The configured headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The configured body, if any.
    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// HTTP client for the storefront API.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections and the browser capabilities are reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    signin_path: String,
    browser: BrowserContext,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// When `config.login_notice` is set and `browser` has no notifier, a
    /// [`TracingNotifier`] is attached.
    ///
    /// # Errors
    ///
    /// Returns error if the session cookie is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &ClientConfig, browser: BrowserContext) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie.expose_secret()).map_err(|_| {
                ClientError::InvalidHeader("Invalid session cookie format".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let browser = if config.login_notice && browser.notifier().is_none() {
            browser.with_notifier(Arc::new(TracingNotifier))
        } else {
            browser
        };

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            signin_path: config.signin_path.clone(),
            browser,
        })
    }

    /// The browser capabilities this client acts on.
    #[must_use]
    pub const fn browser(&self) -> &BrowserContext {
        &self.browser
    }

    /// The origin relative addresses are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `address` against the base URL. Absolute URLs pass through.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidAddress` if the address cannot be joined.
    pub fn resolve(&self, address: &str) -> Result<Url> {
        self.base_url
            .join(address)
            .map_err(|source| ClientError::InvalidAddress {
                address: address.to_string(),
                source,
            })
    }

    /// Issue a request, turning `401 Unauthorized` into a sign-in redirect.
    ///
    /// Any status other than 401 is returned as-is; deciding whether it is a
    /// success is up to the caller.
    ///
    /// # Errors
    ///
    /// - `ClientError::Unauthorized` after the sign-in redirect on a 401
    /// - `ClientError::Http` if the request fails in transport
    /// - `ClientError::InvalidAddress` if `address` cannot be resolved
    pub async fn fetch_with_auth_handling(
        &self,
        address: &str,
        init: Option<RequestInit>,
    ) -> Result<Response> {
        let url = self.resolve(address)?;
        let RequestInit {
            method,
            headers,
            body,
        } = init.unwrap_or_default();

        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(%url, status = status.as_u16(), "Received response");

        if status == StatusCode::UNAUTHORIZED {
            self.redirect_to_signin();
            return Err(ClientError::Unauthorized);
        }

        Ok(response)
    }

    /// Remember the current page, notify, and navigate to the sign-in page.
    fn redirect_to_signin(&self) {
        let return_path = browser::remember_return_path(&self.browser);

        if let Some(notifier) = self.browser.notifier() {
            notifier.notify(LOGIN_REQUIRED_MESSAGE);
        }

        tracing::info!(
            return_path = %return_path,
            signin = %self.signin_path,
            "Unauthorized response, redirecting to sign-in"
        );
        add_breadcrumb(
            "auth",
            "Redirecting to sign-in",
            Some(&[("return_path", return_path.as_str())]),
        );

        self.browser.navigator().navigate(&self.signin_path);
    }
}
