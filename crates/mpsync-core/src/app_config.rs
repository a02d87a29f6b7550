use std::path::PathBuf;

use crate::ConfigError;

/// Marketplace API path families. Accounts are provisioned on one or the
/// other, so the fetcher tries them in configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Legacy supplier gateway: `{base}/suppliers/{id}/products`.
    Gateway,
    /// Newer integration path: `{base}/sellers/{id}/products`.
    Integration,
}

impl EndpointKind {
    /// Parses a single endpoint name as used in `MPSYNC_ENDPOINTS`.
    ///
    /// # Errors
    ///
    /// Returns the unrecognised name when it matches neither family.
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gateway" | "sapigw" => Ok(Self::Gateway),
            "integration" => Ok(Self::Integration),
            other => Err(format!("unknown endpoint \"{other}\"")),
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKind::Gateway => write!(f, "gateway"),
            EndpointKind::Integration => write!(f, "integration"),
        }
    }
}

/// Marketplace API credentials.
///
/// Every field is guaranteed non-empty: there is no way to build a
/// `Credentials` value that would send an anonymous request.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    supplier_id: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] naming the first value that is
    /// empty or whitespace-only.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        supplier_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        let supplier_id = supplier_id.into();

        for (name, value) in [
            ("api_key", &api_key),
            ("api_secret", &api_secret),
            ("supplier_id", &supplier_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyCredential(name));
            }
        }

        Ok(Self {
            api_key,
            api_secret,
            supplier_id: supplier_id.trim().to_owned(),
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    #[must_use]
    pub fn supplier_id(&self) -> &str {
        &self.supplier_id
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .field("supplier_id", &self.supplier_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub output_path: PathBuf,
    pub log_level: String,
    pub page_size: u32,
    pub inter_page_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
    /// Candidate endpoints in priority order. Never empty.
    pub endpoints: Vec<EndpointKind>,
    pub gateway_base_url: String,
    pub integration_base_url: String,
}

impl AppConfig {
    /// Base URL configured for the given endpoint family.
    #[must_use]
    pub fn base_url_for(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::Gateway => &self.gateway_base_url,
            EndpointKind::Integration => &self.integration_base_url,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("credentials", &self.credentials)
            .field("output_path", &self.output_path)
            .field("log_level", &self.log_level)
            .field("page_size", &self.page_size)
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("user_agent", &self.user_agent)
            .field("endpoints", &self.endpoints)
            .field("gateway_base_url", &self.gateway_base_url)
            .field("integration_base_url", &self.integration_base_url)
            .finish()
    }
}
