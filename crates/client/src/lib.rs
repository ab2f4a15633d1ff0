//! Shopfront client library.
//!
//! HTTP glue for the storefront front end:
//!
//! - [`fetch::ApiClient`] issues requests and turns `401 Unauthorized` into a
//!   sign-in redirect, remembering the page the user was on.
//! - [`checkout::CheckoutClient`] creates checkout sessions and returns the
//!   payment redirect URL.
//!
//! Browser state (location, session storage, notifications) is reached only
//! through the capabilities in [`browser`], so everything here runs outside a
//! browser too.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browser;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fetch;

pub use browser::BrowserContext;
pub use checkout::CheckoutClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use fetch::{ApiClient, RequestInit};
