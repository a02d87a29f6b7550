//! Request headers for the marketplace supplier API.

use base64::{engine::general_purpose, Engine as _};
use mpsync_core::Credentials;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::error::FetchError;

/// Builds the headers sent with every catalog request.
///
/// - `Authorization: Basic base64(key:secret)`, flagged sensitive so it never
///   shows up in `Debug` output.
/// - `Accept` / `Content-Type: application/json`.
/// - `User-Agent`: some API deployments answer 403 to requests without a
///   recognisable agent, so one is always set.
///
/// # Errors
///
/// Returns [`FetchError::InvalidHeader`] if the user agent or the encoded
/// credentials contain bytes that are not valid in an HTTP header.
pub fn build_auth_headers(
    credentials: &Credentials,
    user_agent: &str,
) -> Result<HeaderMap, FetchError> {
    let token = general_purpose::STANDARD.encode(format!(
        "{}:{}",
        credentials.api_key(),
        credentials.api_secret()
    ));

    let mut authorization =
        HeaderValue::from_str(&format!("Basic {token}")).map_err(|e| FetchError::InvalidHeader {
            header: "Authorization",
            reason: e.to_string(),
        })?;
    authorization.set_sensitive(true);

    let user_agent = HeaderValue::from_str(user_agent.trim()).map_err(|e| {
        FetchError::InvalidHeader {
            header: "User-Agent",
            reason: e.to_string(),
        }
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, user_agent);
    Ok(headers)
}
