//! Integration tests for the authenticated fetch wrapper.
//!
//! Each test starts its own mock storefront; no external services needed.

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use reqwest::Method;
use serde_json::json;

use shopfront_client::browser::{SessionStorage, take_redirect_after_login};
use shopfront_client::{ClientError, RequestInit};
use shopfront_core::keys::{LOGIN_REQUIRED_MESSAGE, REDIRECT_AFTER_LOGIN_KEY};
use shopfront_integration_tests::{MockStorefront, TestBrowser, api_client};

// ============================================================================
// Unauthorized Handling
// ============================================================================

#[tokio::test]
async fn test_unauthorized_stores_marker_and_redirects() {
    let server =
        MockStorefront::respond_json(StatusCode::UNAUTHORIZED, &json!({"error": "login"})).await;
    let browser = TestBrowser::at("/products/matcha?size=30g&qty=2");
    let client = api_client(&server, browser.context());

    let result = client.fetch_with_auth_handling("/api/cart", None).await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(
        result.expect_err("401 must fail").to_string(),
        "Unauthorized"
    );
    assert_eq!(
        browser.storage.get_item(REDIRECT_AFTER_LOGIN_KEY).as_deref(),
        Some("/products/matcha?size=30g&qty=2")
    );
    assert_eq!(browser.navigator.history(), vec!["/signin".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_regardless_of_method_and_body() {
    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
        let browser = TestBrowser::at("/cart");
        let client = api_client(&server, browser.context());

        let init = RequestInit::with_method(method.clone())
            .json(&json!({"variant_id": "gid://shop/ProductVariant/1", "quantity": 1}))
            .expect("Failed to build request");
        let result = client.fetch_with_auth_handling("/api/cart/add", Some(init)).await;

        assert!(matches!(result, Err(ClientError::Unauthorized)), "{method}");
        assert_eq!(
            browser.storage.get_item(REDIRECT_AFTER_LOGIN_KEY).as_deref(),
            Some("/cart"),
            "{method}"
        );
        assert_eq!(
            browser.navigator.last_navigation().as_deref(),
            Some("/signin"),
            "{method}"
        );

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, method);
    }
}

#[tokio::test]
async fn test_second_unauthorized_overwrites_marker() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/collections/tea");
    let client = api_client(&server, browser.context());

    let _ = client.fetch_with_auth_handling("/api/cart", None).await;

    // User lands somewhere else before the next failure
    browser
        .navigator
        .set_location("/account/orders?page=2".parse().expect("valid location"));
    let _ = client.fetch_with_auth_handling("/api/orders", None).await;

    assert_eq!(
        browser.storage.get_item(REDIRECT_AFTER_LOGIN_KEY).as_deref(),
        Some("/account/orders?page=2")
    );
    assert_eq!(browser.storage.len(), 1);
}

#[tokio::test]
async fn test_concurrent_unauthorized_keep_original_page() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/products/matcha?size=30g");
    let client = api_client(&server, browser.context());

    let (first, second) = tokio::join!(
        client.fetch_with_auth_handling("/api/cart", None),
        client.fetch_with_auth_handling("/api/wishlist", None),
    );

    assert!(matches!(first, Err(ClientError::Unauthorized)));
    assert!(matches!(second, Err(ClientError::Unauthorized)));
    assert_eq!(
        browser.navigator.history(),
        vec!["/signin".to_string(), "/signin".to_string()]
    );

    let return_path = take_redirect_after_login(browser.storage.as_ref())
        .expect("Marker should be stored");
    assert_eq!(return_path.as_str(), "/products/matcha?size=30g");
}

#[tokio::test]
async fn test_unauthorized_after_redirect_keeps_original_page() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/cart?coupon=SPRING");
    let client = api_client(&server, browser.context());

    let _ = client.fetch_with_auth_handling("/api/cart", None).await;
    let _ = client.fetch_with_auth_handling("/api/cart/add", None).await;

    assert_eq!(
        browser.storage.get_item(REDIRECT_AFTER_LOGIN_KEY).as_deref(),
        Some("/cart?coupon=SPRING")
    );
}

#[tokio::test]
async fn test_unauthorized_notifies_when_notifier_configured() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/products/hojicha");
    let client = api_client(&server, browser.context_with_notifier());

    let result = client.fetch_with_auth_handling("/api/cart/add", None).await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(
        browser.notifier.messages(),
        vec![LOGIN_REQUIRED_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn test_unauthorized_without_notifier_stays_silent() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/products/hojicha");
    let client = api_client(&server, browser.context());

    let _ = client.fetch_with_auth_handling("/api/cart/add", None).await;

    assert!(browser.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_unauthorized_uses_configured_signin_path() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/cart");
    let config = server.config().with_signin_path("/account/login");
    let client = shopfront_client::ApiClient::new(&config, browser.context())
        .expect("Failed to build API client");

    let _ = client.fetch_with_auth_handling("/api/cart", None).await;

    assert_eq!(
        browser.navigator.last_navigation().as_deref(),
        Some("/account/login")
    );
}

// ============================================================================
// Passthrough
// ============================================================================

#[tokio::test]
async fn test_non_unauthorized_statuses_pass_through() {
    for status in [
        StatusCode::OK,
        StatusCode::CREATED,
        StatusCode::NO_CONTENT,
        StatusCode::BAD_REQUEST,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
        StatusCode::UNPROCESSABLE_ENTITY,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::from_u16(599).expect("valid status"),
    ] {
        let server = MockStorefront::respond(status, "").await;
        let browser = TestBrowser::at("/cart");
        let client = api_client(&server, browser.context_with_notifier());

        let response = client
            .fetch_with_auth_handling("/api/cart", None)
            .await
            .expect("Non-401 responses must not fail");

        assert_eq!(response.status(), status);
        assert!(browser.storage.is_empty(), "{status}: storage written");
        assert!(browser.navigator.history().is_empty(), "{status}: navigated");
        assert!(browser.notifier.messages().is_empty(), "{status}: notified");
    }
}

#[tokio::test]
async fn test_passthrough_returns_body_unmodified() {
    let body = json!({"lines": [{"sku": "MATCHA-30", "quantity": 2}], "total": "42.00"});
    let server = MockStorefront::respond_json(StatusCode::OK, &body).await;
    let browser = TestBrowser::at("/cart");
    let client = api_client(&server, browser.context());

    let response = client
        .fetch_with_auth_handling("/api/cart", None)
        .await
        .expect("Request failed");

    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    let received: serde_json::Value = response.json().await.expect("Body is JSON");
    assert_eq!(received, body);
}

#[tokio::test]
async fn test_request_is_sent_as_given() {
    let server = MockStorefront::respond(StatusCode::OK, "").await;
    let browser = TestBrowser::at("/");
    let client = api_client(&server, browser.context());

    let init = RequestInit::with_method(Method::PATCH)
        .try_header("x-cart-token", "abc123")
        .expect("valid header")
        .body("quantity=3");
    client
        .fetch_with_auth_handling("/api/cart/lines/7?merge=true", Some(init))
        .await
        .expect("Request failed");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path_and_query, "/api/cart/lines/7?merge=true");
    assert_eq!(request.headers["x-cart-token"], "abc123");
    assert_eq!(&request.body[..], b"quantity=3");
}

#[tokio::test]
async fn test_session_cookie_is_sent() {
    let server = MockStorefront::respond(StatusCode::OK, "").await;
    let browser = TestBrowser::at("/");
    let config = server
        .config()
        .with_session_cookie(secrecy::SecretString::from("sid=s3ss10n"));
    let client = shopfront_client::ApiClient::new(&config, browser.context())
        .expect("Failed to build API client");

    client
        .fetch_with_auth_handling("/api/cart", None)
        .await
        .expect("Request failed");

    assert_eq!(server.requests()[0].headers["cookie"], "sid=s3ss10n");
}

// ============================================================================
// Sign-in Round Trip
// ============================================================================

#[tokio::test]
async fn test_signin_flow_consumes_marker() {
    let server = MockStorefront::respond(StatusCode::UNAUTHORIZED, "").await;
    let browser = TestBrowser::at("/products/sencha?size=100g");
    let client = api_client(&server, browser.context());

    let _ = client.fetch_with_auth_handling("/api/cart/add", None).await;

    let return_path = take_redirect_after_login(browser.storage.as_ref())
        .expect("Marker should be stored");
    assert_eq!(return_path.as_str(), "/products/sencha?size=100g");
    assert!(browser.storage.get_item(REDIRECT_AFTER_LOGIN_KEY).is_none());
}
