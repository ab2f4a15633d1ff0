//! Integration tests for shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Tests run against [`MockStorefront`], an in-process axum server bound to an
//! ephemeral port, so no external services are needed.
//!
//! # Test Categories
//!
//! - `fetch_with_auth_handling` - 401 interception and passthrough
//! - `checkout_session` - checkout endpoint success and failure handling

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::task::JoinHandle;
use url::Url;

use shopfront_client::browser::{HeadlessNavigator, MemorySessionStorage, Notifier};
use shopfront_client::{ApiClient, BrowserContext, CheckoutClient, ClientConfig};
use shopfront_core::PageLocation;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Request body is not JSON")
    }
}

/// In-process storefront that answers every request with a canned response.
pub struct MockStorefront {
    base_url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: JoinHandle<()>,
}

impl MockStorefront {
    /// Answer every request with `status` and a raw `body`.
    pub async fn respond(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let router = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, request_body: Bytes| {
                let body = body.clone();
                let recorder = recorder.clone();
                async move {
                    recorder
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(RecordedRequest {
                            method,
                            path_and_query: uri
                                .path_and_query()
                                .map_or_else(|| uri.path().to_string(), ToString::to_string),
                            headers,
                            body: request_body,
                        });
                    canned(status, body)
                }
            },
        );

        Self::serve(router, requests).await
    }

    /// Answer every request with `status` and a JSON body.
    pub async fn respond_json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::respond(status, body.to_string()).await
    }

    async fn serve(router: Router, requests: Arc<Mutex<Vec<RecordedRequest>>>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock storefront");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock storefront address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("Invalid mock storefront URL"),
            requests,
            server,
        }
    }

    /// Origin of the mock server.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for MockStorefront {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn canned(status: StatusCode, body: String) -> Response {
    if body.is_empty() {
        status.into_response()
    } else {
        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

/// Notifier that records every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Messages shown so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Headless browser with handles kept for assertions.
pub struct TestBrowser {
    pub navigator: Arc<HeadlessNavigator>,
    pub storage: Arc<MemorySessionStorage>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestBrowser {
    /// A browser sitting on `location`.
    ///
    /// # Panics
    ///
    /// Panics if `location` is not a valid page location.
    #[must_use]
    pub fn at(location: &str) -> Self {
        Self {
            navigator: Arc::new(HeadlessNavigator::new(
                PageLocation::parse(location).expect("Invalid test location"),
            )),
            storage: Arc::new(MemorySessionStorage::new()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    /// Capabilities without a notifier.
    #[must_use]
    pub fn context(&self) -> BrowserContext {
        BrowserContext::new(self.navigator.clone(), self.storage.clone())
    }

    /// Capabilities with the recording notifier attached.
    #[must_use]
    pub fn context_with_notifier(&self) -> BrowserContext {
        self.context().with_notifier(self.notifier.clone())
    }
}

/// Build an [`ApiClient`] against `server`.
///
/// # Panics
///
/// Panics if the client fails to build.
#[must_use]
pub fn api_client(server: &MockStorefront, browser: BrowserContext) -> ApiClient {
    ApiClient::new(&server.config(), browser).expect("Failed to build API client")
}

/// Build a [`CheckoutClient`] against `server`.
///
/// # Panics
///
/// Panics if the client fails to build.
#[must_use]
pub fn checkout_client(server: &MockStorefront, browser: BrowserContext) -> CheckoutClient {
    CheckoutClient::new(Arc::new(api_client(server, browser)), &server.config())
}
