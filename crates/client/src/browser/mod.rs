//! Browser capabilities.
//!
//! The client never touches global browser state directly. Everything it
//! needs from the page goes through these traits:
//!
//! - [`Navigator`] - read the current location, navigate elsewhere
//! - [`SessionStorage`] - tab-scoped key/value storage
//! - [`Notifier`] - transient user-facing messages (toasts)
//!
//! They are object-safe and used as `Arc<dyn Trait>` so [`BrowserContext`]
//! can be shared between the fetch wrapper and the sign-in flow without
//! generic parameters leaking into every client type.

mod headless;
mod notifier;
mod storage;

use std::sync::Arc;

use shopfront_core::keys::REDIRECT_AFTER_LOGIN_KEY;
use shopfront_core::{PageLocation, ReturnPath};

pub use headless::HeadlessNavigator;
pub use notifier::TracingNotifier;
pub use storage::{FileSessionStorage, MemorySessionStorage};

/// Access to the page location.
pub trait Navigator: Send + Sync {
    /// The page the user is on right now.
    fn current_location(&self) -> PageLocation;

    /// Full-page navigation to `href`.
    fn navigate(&self, href: &str);
}

/// Session-scoped string storage with web storage semantics.
///
/// `set_item` overwrites any previous value for the key.
pub trait SessionStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set_item(&self, key: &str, value: &str);

    /// Removes `key`; no-op when absent.
    fn remove_item(&self, key: &str);
}

/// Transient user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    fn notify(&self, message: &str);
}

/// The set of browser capabilities the client works against.
#[derive(Clone)]
pub struct BrowserContext {
    navigator: Arc<dyn Navigator>,
    storage: Arc<dyn SessionStorage>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl BrowserContext {
    /// Create a context without a notifier.
    pub fn new(navigator: Arc<dyn Navigator>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            navigator,
            storage,
            notifier: None,
        }
    }

    /// A context backed by a [`HeadlessNavigator`] at `location` and
    /// in-memory storage.
    #[must_use]
    pub fn headless(location: PageLocation) -> Self {
        Self::new(
            Arc::new(HeadlessNavigator::new(location)),
            Arc::new(MemorySessionStorage::new()),
        )
    }

    /// Attach a notifier, invoked on unauthorized responses.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The navigation capability.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// The session storage capability.
    #[must_use]
    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    /// The notifier, when one is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&dyn Notifier> {
        self.notifier.as_deref()
    }
}

impl std::fmt::Debug for BrowserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserContext")
            .field("location", &self.navigator.current_location())
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

/// Remember where the user is so the sign-in flow can send them back.
///
/// Returns the stored value.
pub fn remember_return_path(browser: &BrowserContext) -> String {
    let return_path = browser.navigator().current_location().return_path();
    browser
        .storage()
        .set_item(REDIRECT_AFTER_LOGIN_KEY, &return_path);
    return_path
}

/// Consume the redirect-after-login marker.
///
/// Called by the sign-in flow once the user has authenticated. The marker is
/// removed whether or not it is valid; values that would navigate off-site
/// are discarded.
pub fn take_redirect_after_login(storage: &dyn SessionStorage) -> Option<ReturnPath> {
    let raw = storage.get_item(REDIRECT_AFTER_LOGIN_KEY)?;
    storage.remove_item(REDIRECT_AFTER_LOGIN_KEY);

    match ReturnPath::parse(&raw) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding invalid redirect-after-login marker");
            None
        }
    }
}
