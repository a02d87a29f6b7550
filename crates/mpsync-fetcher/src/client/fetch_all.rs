//! Multi-page catalog walk with endpoint fallback.

use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::pagination::has_next_page;
use crate::types::CatalogPage;

use super::{CatalogClient, CatalogFetch, MAX_PAGES};

impl CatalogClient {
    /// Fetches every listing, walking pages from index 0 in order.
    ///
    /// The first page is requested from each endpoint in `endpoints` until one
    /// accepts it (see [`Self::open_catalog`]). That endpoint then serves every
    /// remaining page; there is no per-page fallback.
    ///
    /// `inter_page_delay_ms` is slept between consecutive page requests.
    ///
    /// **All-or-nothing semantics**: any failure after the first page discards
    /// the pages fetched so far and returns the error. A partial catalog would
    /// publish a storefront with silently missing products.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::open_catalog`] and [`Self::fetch_page`].
    /// Returns [`FetchError::PaginationLimit`] if the server keeps reporting
    /// pages beyond [`MAX_PAGES`].
    pub async fn fetch_all_products(
        &self,
        endpoints: &[Endpoint],
        page_size: u32,
        inter_page_delay_ms: u64,
    ) -> Result<CatalogFetch, FetchError> {
        let (endpoint, mut page) = self.open_catalog(endpoints, page_size).await?;
        let mut products = Vec::new();
        let mut page_index = 0u32;

        loop {
            let more = has_next_page(&page, page_index, page_size);
            tracing::debug!(
                endpoint = %endpoint.kind(),
                page = page_index,
                items = page.content.len(),
                total_pages = ?page.total_pages,
                total_elements = ?page.total_elements,
                "fetched catalog page"
            );
            products.extend(page.content);

            if !more {
                break;
            }

            page_index += 1;
            if page_index as usize >= MAX_PAGES {
                return Err(FetchError::PaginationLimit {
                    url: endpoint.products_url().to_string(),
                    max_pages: MAX_PAGES,
                });
            }

            if inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_page_delay_ms)).await;
            }

            page = self.fetch_page(endpoint, page_index, page_size).await?;
        }

        tracing::info!(
            endpoint = %endpoint.kind(),
            pages = page_index + 1,
            products = products.len(),
            "catalog fetch complete"
        );

        Ok(CatalogFetch {
            endpoint: endpoint.clone(),
            pages: page_index + 1,
            products,
        })
    }

    /// Requests page 0 from each candidate endpoint in priority order and
    /// returns the first endpoint that serves it, along with the page.
    ///
    /// A client-error rejection ([`FetchError::is_endpoint_rejection`]) moves
    /// on to the next candidate. Any other failure (5xx after retries,
    /// network, parse) is returned at once.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NoEndpoints`] if `endpoints` is empty.
    /// - [`FetchError::EndpointsExhausted`] if every candidate rejected the
    ///   request; the last rejection is its source.
    /// - Any non-rejection error from [`Self::fetch_page`].
    pub async fn open_catalog<'a>(
        &self,
        endpoints: &'a [Endpoint],
        page_size: u32,
    ) -> Result<(&'a Endpoint, CatalogPage), FetchError> {
        let mut tried = Vec::new();
        let mut last_rejection = None;

        for endpoint in endpoints {
            match self.fetch_page(endpoint, 0, page_size).await {
                Ok(page) => {
                    if !tried.is_empty() {
                        tracing::info!(
                            endpoint = %endpoint.kind(),
                            rejected = ?tried,
                            "using fallback endpoint"
                        );
                    }
                    return Ok((endpoint, page));
                }
                Err(err) if err.is_endpoint_rejection() => {
                    tracing::warn!(
                        endpoint = %endpoint.kind(),
                        error = %err,
                        "endpoint rejected the first page — trying next candidate"
                    );
                    tried.push(endpoint.kind().to_string());
                    last_rejection = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        match last_rejection {
            Some(last) => Err(FetchError::EndpointsExhausted {
                tried,
                last: Box::new(last),
            }),
            None => Err(FetchError::NoEndpoints),
        }
    }
}
