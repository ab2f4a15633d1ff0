//! Well-known keys, paths and messages shared by the client and its callers.

/// Session storage key holding the page to return to after signing in.
pub const REDIRECT_AFTER_LOGIN_KEY: &str = "redirectAfterLogin";

/// Sign-in page the client navigates to on an unauthorized response.
pub const SIGNIN_PATH: &str = "/signin";

/// Checkout session endpoint.
pub const CHECKOUT_PATH: &str = "/api/checkout";

/// Notification shown to the user when a request requires login.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in before adding to cart";

/// Message used when the checkout endpoint fails without an `error` field.
pub const CHECKOUT_FALLBACK_ERROR: &str = "Failed to create checkout session";
