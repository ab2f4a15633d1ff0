//! Raw request command.

use reqwest::Method;

use shopfront_client::RequestInit;

use super::{CommandError, Session};

/// Send a request through the sign-in-aware wrapper and log the response.
///
/// # Errors
///
/// Returns an error if the method or body is invalid, the request fails in
/// transport, or the server answers 401.
pub async fn run(
    session: &Session,
    address: &str,
    method: &str,
    data: Option<&str>,
) -> Result<(), CommandError> {
    let init = build_request(method, data)?;

    let response = session
        .api
        .fetch_with_auth_handling(address, Some(init))
        .await?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(shopfront_client::ClientError::from)?;

    tracing::info!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""));
    if !body.is_empty() {
        tracing::info!("{}", body);
    }
    Ok(())
}

/// Build the request from command-line arguments.
fn build_request(method: &str, data: Option<&str>) -> Result<RequestInit, CommandError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| CommandError::InvalidMethod(method.to_string()))?;
    let init = RequestInit::with_method(method);

    match data {
        Some(raw) => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            Ok(init.json(&value)?)
        }
        None => Ok(init),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::header::CONTENT_TYPE;

    use super::*;

    #[test]
    fn test_build_request_defaults() {
        let init = build_request("get", None).unwrap();
        assert_eq!(init.method_ref(), &Method::GET);
        assert!(init.body_bytes().is_none());
    }

    #[test]
    fn test_build_request_with_json() {
        let init = build_request("POST", Some(r#"{"quantity": 2}"#)).unwrap();
        assert_eq!(init.method_ref(), &Method::POST);
        assert_eq!(init.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(init.body_bytes(), Some(&br#"{"quantity":2}"#[..]));
    }

    #[test]
    fn test_build_request_invalid_method() {
        assert!(matches!(
            build_request("GE T", None),
            Err(CommandError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_build_request_invalid_json() {
        assert!(matches!(
            build_request("POST", Some("{not json")),
            Err(CommandError::InvalidBody(_))
        ));
    }
}
