//! Checkout session command.

use super::{CommandError, Session};

/// Create a checkout session and log the payment URL.
///
/// # Errors
///
/// Returns an error if the session cannot be created. On a 401 the sign-in
/// redirect has already been recorded in session storage.
pub async fn run(
    session: &Session,
    success_url: &str,
    cancel_url: &str,
) -> Result<(), CommandError> {
    tracing::info!("Creating checkout session...");

    let url = session
        .checkout
        .create_checkout_session(success_url, cancel_url)
        .await?;

    tracing::info!("Checkout session created. Redirect the customer to:");
    tracing::info!("  {}", url);
    Ok(())
}
