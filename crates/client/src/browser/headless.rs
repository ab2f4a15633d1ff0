//! Navigator for running outside a browser.

use std::sync::{PoisonError, RwLock};

use shopfront_core::PageLocation;

use super::Navigator;

/// A navigator that tracks location in memory.
///
/// `navigate` only records the target. As with assigning `location.href`,
/// the current page stays put until the navigation completes, so every
/// request still in flight from this page captures the same location. Use
/// [`HeadlessNavigator::set_location`] to land on a new page.
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    current: RwLock<PageLocation>,
    history: RwLock<Vec<String>>,
}

impl HeadlessNavigator {
    /// Start at `location`.
    #[must_use]
    pub fn new(location: PageLocation) -> Self {
        Self {
            current: RwLock::new(location),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Move to `location` without recording a navigation, as if the user
    /// followed an in-page link.
    pub fn set_location(&self, location: PageLocation) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = location;
    }

    /// Every `navigate` target, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent `navigate` target.
    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HeadlessNavigator {
    fn current_location(&self) -> PageLocation {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, href: &str) {
        tracing::debug!(href, "Navigating");

        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(href.to_string());
    }
}
