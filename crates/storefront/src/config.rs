//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_API_URL` - Account, order and payment API (default: `http://localhost:8000`)
//! - `STOREFRONT_CATALOG_URL` - Product catalog API (default: `https://dummyjson.com/`)
//! - `STOREFRONT_DATA_DIR` - Where local storage lives (default: `<data dir>/cartwheel`)
//! - `STOREFRONT_DELIVERY_CHARGE` - Flat delivery charge added at checkout (default: 40)
//! - `STOREFRONT_CURRENCY` - Display currency (default: USD)
//! - `STOREFRONT_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `STOREFRONT_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use cartwheel_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/";
const DEFAULT_DELIVERY_CHARGE: &str = "40";
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No data directory could be determined; set STOREFRONT_DATA_DIR")]
    NoDataDir,
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the account/order/payment API (no trailing slash)
    pub api_url: Url,
    /// Base URL of the product catalog (always ends with `/`)
    pub catalog_url: Url,
    /// Directory backing local storage
    pub data_dir: PathBuf,
    /// Flat delivery charge added to every checkout
    pub delivery_charge: Decimal,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
    /// How long catalog responses stay cached
    pub catalog_cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// no data directory can be found.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url(
            "STOREFRONT_API_URL",
            &get_env_or_default("STOREFRONT_API_URL", DEFAULT_API_URL),
        )?;
        let catalog_url = parse_url(
            "STOREFRONT_CATALOG_URL",
            &with_trailing_slash(&get_env_or_default(
                "STOREFRONT_CATALOG_URL",
                DEFAULT_CATALOG_URL,
            )),
        )?;

        let data_dir = match get_optional_env("STOREFRONT_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("cartwheel"),
        };

        let delivery_charge = parse_env::<Decimal>(
            "STOREFRONT_DELIVERY_CHARGE",
            DEFAULT_DELIVERY_CHARGE,
        )?;
        if delivery_charge.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_DELIVERY_CHARGE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let currency = get_env_or_default("STOREFRONT_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_CURRENCY".to_string(), e))?;

        let http_timeout = Duration::from_secs(parse_env::<u64>(
            "STOREFRONT_HTTP_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_env::<u64>(
            "STOREFRONT_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);

        Ok(Self {
            api_url,
            catalog_url,
            data_dir,
            delivery_charge,
            currency,
            http_timeout,
            catalog_cache_ttl,
        })
    }

    /// Configuration pointing at explicit endpoints, with defaults elsewhere.
    ///
    /// Used by tests and by embedders that do not read the environment.
    #[must_use]
    pub fn new(api_url: Url, catalog_url: Url, data_dir: PathBuf) -> Self {
        let catalog_url = if catalog_url.path().ends_with('/') {
            catalog_url
        } else {
            Url::parse(&with_trailing_slash(catalog_url.as_str())).unwrap_or(catalog_url)
        };
        Self {
            api_url,
            catalog_url,
            data_dir,
            delivery_charge: Decimal::from(40),
            currency: CurrencyCode::USD,
            http_timeout: Duration::from_secs(30),
            catalog_cache_ttl: Duration::from_secs(300),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn with_trailing_slash(value: &str) -> String {
    if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_rejects_other_schemes() {
        let err = parse_url("X", "ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "X"));
        assert!(parse_url("X", "not a url").is_err());
        assert!(parse_url("X", "https://api.example.com").is_ok());
    }

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(with_trailing_slash("https://a.io"), "https://a.io/");
        assert_eq!(with_trailing_slash("https://a.io/"), "https://a.io/");
    }

    #[test]
    fn test_catalog_url_gets_trailing_slash() {
        let config = StorefrontConfig::new(
            Url::parse("http://localhost:8000/").unwrap(),
            Url::parse("https://dummyjson.com").unwrap(),
            PathBuf::from("/tmp/cartwheel"),
        );
        assert!(config.catalog_url.as_str().ends_with('/'));
    }

    #[test]
    fn test_catalog_url_with_path_gets_trailing_slash() {
        let config = StorefrontConfig::new(
            Url::parse("http://localhost:8000").unwrap(),
            Url::parse("http://127.0.0.1:9000/catalog").unwrap(),
            PathBuf::from("/tmp/cartwheel"),
        );
        assert_eq!(
            config.catalog_url.join("products/1").unwrap().as_str(),
            "http://127.0.0.1:9000/catalog/products/1"
        );
    }
}
