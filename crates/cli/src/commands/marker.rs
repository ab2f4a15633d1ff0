//! Redirect-after-login marker command.

use std::path::Path;

use shopfront_client::browser::{FileSessionStorage, take_redirect_after_login};

/// Consume the marker left by the last unauthorized response and log it.
pub fn run(session_file: &Path) {
    let storage = FileSessionStorage::new(session_file);

    match take_redirect_after_login(&storage) {
        Some(path) => tracing::info!("Return after sign-in to: {}", path),
        None => tracing::info!("No redirect-after-login marker stored"),
    }
}
