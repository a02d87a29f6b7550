pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod rate_limit;
pub mod types;

pub use auth::build_auth_headers;
pub use client::{CatalogClient, CatalogFetch};
pub use endpoint::Endpoint;
pub use error::FetchError;
pub use normalize::{normalize_all, normalize_product};
pub use rate_limit::RetryPolicy;
pub use types::{CatalogPage, RawProduct};
