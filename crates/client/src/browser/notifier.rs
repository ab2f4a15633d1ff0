//! Notifier that reports through `tracing`.

use super::Notifier;

/// Emits each notification as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "shopfront::notice", "{message}");
    }
}
