use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (reset in {reset_secs}s)")]
    RateLimited { url: String, reset_secs: u64 },

    #[error(
        "request rejected with HTTP {status} by {url}; check the User-Agent header, \
         the API key/secret pair and the supplier id"
    )]
    Rejected { status: u16, url: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("normalization error for product #{position}: {reason}")]
    Normalization { position: usize, reason: String },

    #[error("pagination limit reached for {url}: exceeded {max_pages} pages")]
    PaginationLimit { url: String, max_pages: usize },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("invalid value for header {header}: {reason}")]
    InvalidHeader {
        header: &'static str,
        reason: String,
    },

    #[error("no candidate endpoints configured")]
    NoEndpoints,

    #[error("every candidate endpoint rejected the catalog request (tried: {})", .tried.join(", "))]
    EndpointsExhausted {
        tried: Vec<String>,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Returns `true` when the server refused the request itself (4xx other
    /// than 429). On the first page this means the account lives on a
    /// different API path, so the next candidate endpoint is worth a try.
    #[must_use]
    pub fn is_endpoint_rejection(&self) -> bool {
        match self {
            FetchError::Rejected { .. } | FetchError::NotFound { .. } => true,
            FetchError::UnexpectedStatus { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> FetchError {
        FetchError::UnexpectedStatus {
            status,
            url: "https://api.example.com/products".to_owned(),
        }
    }

    #[test]
    fn client_errors_are_endpoint_rejections() {
        assert!(FetchError::Rejected {
            status: 403,
            url: String::new()
        }
        .is_endpoint_rejection());
        assert!(FetchError::NotFound { url: String::new() }.is_endpoint_rejection());
        assert!(status(400).is_endpoint_rejection());
        assert!(status(410).is_endpoint_rejection());
    }

    #[test]
    fn server_errors_and_rate_limits_are_not_endpoint_rejections() {
        assert!(!status(500).is_endpoint_rejection());
        assert!(!status(503).is_endpoint_rejection());
        assert!(!FetchError::RateLimited {
            url: String::new(),
            reset_secs: 2
        }
        .is_endpoint_rejection());
        assert!(!FetchError::NoEndpoints.is_endpoint_rejection());
    }

    #[test]
    fn rejected_message_is_actionable() {
        let err = FetchError::Rejected {
            status: 403,
            url: "https://api.example.com/suppliers/1/products".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("User-Agent"));
        assert!(message.contains("supplier id"));
    }

    #[test]
    fn exhausted_lists_tried_endpoints() {
        let err = FetchError::EndpointsExhausted {
            tried: vec!["gateway".to_owned(), "integration".to_owned()],
            last: Box::new(FetchError::NotFound {
                url: "https://api.example.com".to_owned(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "every candidate endpoint rejected the catalog request (tried: gateway, integration)"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
