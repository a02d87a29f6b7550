//! Candidate product-listing endpoints.
//!
//! Marketplace accounts are served from one of two API path families (see
//! [`EndpointKind`]). The fetcher is handed an ordered list of [`Endpoint`]s
//! and uses the first one that accepts the initial page request.

use mpsync_core::{AppConfig, EndpointKind};
use reqwest::Url;

use crate::error::FetchError;

/// A resolved product-listing URL for one endpoint family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    kind: EndpointKind,
    products_url: Url,
}

impl Endpoint {
    /// Resolves `{base_url}/suppliers/{id}/products` (gateway) or
    /// `{base_url}/sellers/{id}/products` (integration).
    ///
    /// The supplier id is appended as a single, percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if `base_url` is not an
    /// absolute `http(s)` URL.
    pub fn new(kind: EndpointKind, base_url: &str, supplier_id: &str) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidEndpoint {
            url: base_url.to_owned(),
            reason,
        };

        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
        }

        let collection = match kind {
            EndpointKind::Gateway => "suppliers",
            EndpointKind::Integration => "sellers",
        };
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend([collection, supplier_id, "products"]);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            kind,
            products_url: url,
        })
    }

    /// Resolves every endpoint listed in `config.endpoints`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] for the first base URL that
    /// does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Vec<Self>, FetchError> {
        config
            .endpoints
            .iter()
            .map(|&kind| {
                Self::new(
                    kind,
                    config.base_url_for(kind),
                    config.credentials.supplier_id(),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    #[must_use]
    pub fn products_url(&self) -> &Url {
        &self.products_url
    }

    /// URL for one page: `?approved=true&page=<page>&size=<size>`.
    #[must_use]
    pub fn page_url(&self, page: u32, size: u32) -> Url {
        let mut url = self.products_url.clone();
        url.query_pairs_mut()
            .append_pair("approved", "true")
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        url
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.products_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_path() {
        let endpoint =
            Endpoint::new(EndpointKind::Gateway, "https://api.trendyol.com/sapigw", "123456")
                .unwrap();
        assert_eq!(
            endpoint.products_url().as_str(),
            "https://api.trendyol.com/sapigw/suppliers/123456/products"
        );
    }

    #[test]
    fn integration_path() {
        let endpoint = Endpoint::new(
            EndpointKind::Integration,
            "https://apigw.trendyol.com/integration/product",
            "123456",
        )
        .unwrap();
        assert_eq!(
            endpoint.products_url().as_str(),
            "https://apigw.trendyol.com/integration/product/sellers/123456/products"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_collapsed() {
        let endpoint =
            Endpoint::new(EndpointKind::Gateway, "http://127.0.0.1:8080/", "42").unwrap();
        assert_eq!(
            endpoint.products_url().as_str(),
            "http://127.0.0.1:8080/suppliers/42/products"
        );
    }

    #[test]
    fn supplier_id_is_a_single_encoded_segment() {
        let endpoint =
            Endpoint::new(EndpointKind::Gateway, "https://api.example.com", "12/../34").unwrap();
        assert_eq!(
            endpoint.products_url().as_str(),
            "https://api.example.com/suppliers/12%2F..%2F34/products"
        );
    }

    #[test]
    fn page_url_carries_query() {
        let endpoint = Endpoint::new(EndpointKind::Gateway, "https://api.example.com", "7").unwrap();
        assert_eq!(
            endpoint.page_url(2, 200).as_str(),
            "https://api.example.com/suppliers/7/products?approved=true&page=2&size=200"
        );
    }

    #[test]
    fn rejects_relative_base() {
        let err = Endpoint::new(EndpointKind::Gateway, "api.example.com", "7").unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = Endpoint::new(EndpointKind::Gateway, "ftp://api.example.com", "7").unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
    }

    #[test]
    fn display_names_kind_and_url() {
        let endpoint = Endpoint::new(EndpointKind::Integration, "https://api.example.com", "7")
            .unwrap();
        assert_eq!(
            endpoint.to_string(),
            "integration (https://api.example.com/sellers/7/products)"
        );
    }
}
