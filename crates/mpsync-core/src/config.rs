use std::path::PathBuf;

use crate::app_config::{AppConfig, Credentials, EndpointKind};
use crate::ConfigError;

pub const API_KEY_VAR: &str = "TRENDYOL_API_KEY";
pub const API_SECRET_VAR: &str = "TRENDYOL_API_SECRET";
pub const SUPPLIER_ID_VAR: &str = "TRENDYOL_SUPPLIER_ID";

const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.trendyol.com/sapigw";
const DEFAULT_INTEGRATION_BASE_URL: &str = "https://apigw.trendyol.com/integration/product";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a plain `HashMap` lookup.
///
/// Empty or whitespace-only values for the three credential variables are
/// reported as missing.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let api_key = require(API_KEY_VAR)?;
    let api_secret = require(API_SECRET_VAR)?;
    let supplier_id = require(SUPPLIER_ID_VAR)?;
    let credentials = Credentials::new(api_key, api_secret, supplier_id)?;

    let output_path = PathBuf::from(or_default("MPSYNC_OUTPUT_PATH", "public/urunler.json"));
    let log_level = or_default("MPSYNC_LOG_LEVEL", "info");

    let page_size = parse_u32("MPSYNC_PAGE_SIZE", "200")?;
    if page_size == 0 {
        return Err(invalid("MPSYNC_PAGE_SIZE", "must be greater than 0".into()));
    }
    let inter_page_delay_ms = parse_u64("MPSYNC_INTER_PAGE_DELAY_MS", "300")?;
    let request_timeout_secs = parse_u64("MPSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("MPSYNC_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("MPSYNC_RETRY_BACKOFF_BASE_MS", "1500")?;

    let default_user_agent = format!("{} - SelfIntegration", credentials.supplier_id());
    let user_agent = or_default("MPSYNC_USER_AGENT", &default_user_agent);

    let endpoints = parse_endpoints(&or_default("MPSYNC_ENDPOINTS", "gateway,integration"))
        .map_err(|reason| invalid("MPSYNC_ENDPOINTS", reason))?;
    let gateway_base_url = or_default("MPSYNC_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL);
    let integration_base_url =
        or_default("MPSYNC_INTEGRATION_BASE_URL", DEFAULT_INTEGRATION_BASE_URL);

    Ok(AppConfig {
        credentials,
        output_path,
        log_level,
        page_size,
        inter_page_delay_ms,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        user_agent,
        endpoints,
        gateway_base_url,
        integration_base_url,
    })
}

/// Parses a comma-separated endpoint priority list, dropping duplicates.
fn parse_endpoints(raw: &str) -> Result<Vec<EndpointKind>, String> {
    let mut endpoints = Vec::new();
    for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
        let kind = EndpointKind::parse(name)?;
        if !endpoints.contains(&kind) {
            endpoints.push(kind);
        }
    }
    if endpoints.is_empty() {
        return Err("at least one endpoint is required".into());
    }
    Ok(endpoints)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
