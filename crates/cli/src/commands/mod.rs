//! CLI command implementations.

pub mod checkout;
pub mod fetch;
pub mod marker;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use shopfront_client::browser::{FileSessionStorage, HeadlessNavigator};
use shopfront_client::config::ConfigError;
use shopfront_client::{ApiClient, BrowserContext, CheckoutClient, ClientConfig, ClientError};
use shopfront_core::{LocationError, PageLocation};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The client call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// `--page` is not a valid location.
    #[error("Invalid page: {0}")]
    InvalidPage(#[from] LocationError),

    /// `--method` is not a valid HTTP method.
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// `--data` is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// A headless browser session: a page, file-backed storage and clients.
pub struct Session {
    pub api: Arc<ApiClient>,
    pub checkout: CheckoutClient,
}

impl Session {
    /// Open a session on `page`, persisting storage to `session_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is not a valid location or the client
    /// fails to build.
    pub fn open(
        config: ClientConfig,
        session_file: &Path,
        page: &str,
    ) -> Result<Self, CommandError> {
        let location = PageLocation::parse(page)?;
        let browser = BrowserContext::new(
            Arc::new(HeadlessNavigator::new(location)),
            Arc::new(FileSessionStorage::new(session_file)),
        );

        let api = Arc::new(ApiClient::new(&config, browser)?);
        let checkout = CheckoutClient::new(api.clone(), &config);

        Ok(Self { api, checkout })
    }
}
