pub mod app_config;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, Credentials, EndpointKind};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use products::{NormalizedProduct, Snapshot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("credential `{0}` must not be empty")]
    EmptyCredential(&'static str),
}
