//! HTTP client for the marketplace product-listing API.

mod fetch_all;

use std::time::Duration;

use mpsync_core::{AppConfig, Credentials};
use reqwest::{Client, StatusCode};

use crate::auth::build_auth_headers;
use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::rate_limit::{reset_secs_from_headers, retry_with_backoff, RetryPolicy};
use crate::types::{CatalogPage, RawProduct};

/// Maximum number of pages to fetch before returning an error.
/// Guards against a server that keeps reporting more pages.
///
/// Note: each page request may be retried on transient errors and waits out
/// any number of 429s, so this bounds pages, not requests.
pub(crate) const MAX_PAGES: usize = 1_000;

/// Result of a full catalog walk.
#[derive(Debug)]
pub struct CatalogFetch {
    /// Endpoint that served the catalog.
    pub endpoint: Endpoint,
    /// Number of pages requested.
    pub pages: u32,
    /// Every listing, in page order.
    pub products: Vec<RawProduct>,
}

/// Authenticated client for the product-listing endpoint.
///
/// Credentials, `Accept` and `User-Agent` are installed as default headers,
/// so every request is authenticated. Rate limits (429) are waited out,
/// transient failures retried per the [`RetryPolicy`], and every other
/// non-2xx status surfaces as a typed [`FetchError`].
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) retry: RetryPolicy,
}

impl CatalogClient {
    /// Creates a client with configured timeout, auth headers and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidHeader`] if the credentials or user agent
    /// cannot be sent as header values, or [`FetchError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(
        credentials: &Credentials,
        user_agent: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(build_auth_headers(credentials, user_agent)?)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, retry })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.credentials,
            &config.user_agent,
            config.request_timeout_secs,
            RetryPolicy::new(config.max_retries, config.retry_backoff_base_ms),
        )
    }

    /// Fetches one page of listings, waiting out rate limits and retrying
    /// transient errors.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Rejected`] — HTTP 401/403 (not retried).
    /// - [`FetchError::NotFound`] — HTTP 404 (not retried).
    /// - [`FetchError::UnexpectedStatus`] — any other non-2xx status (5xx retried, 4xx not).
    /// - [`FetchError::Http`] — network or TLS failure after all retries exhausted.
    /// - [`FetchError::Deserialize`] — response body is not a catalog page (not retried).
    pub async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        page: u32,
        size: u32,
    ) -> Result<CatalogPage, FetchError> {
        let url = endpoint.page_url(page, size);

        retry_with_backoff(self.retry, || {
            let url = url.clone();
            async move {
                tracing::debug!(url = %url, page, "requesting catalog page");
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    return Err(FetchError::RateLimited {
                        url: url.to_string(),
                        reset_secs: reset_secs_from_headers(response.headers()),
                    });
                }

                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(FetchError::Rejected {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(FetchError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<CatalogPage>(&body).map_err(|e| FetchError::Deserialize {
                    context: format!("catalog page {page} from {}", endpoint.kind()),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
