//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOEBOX_API_BASE_URL` - Base URL of the commerce API (stock + catalog)
//!
//! ## Optional
//! - `SHOEBOX_STORAGE_PATH` - Path of the local snapshot file
//!   (default: shoebox-cart.json)
//! - `SHOEBOX_CART_KEY` - Key the cart snapshot is stored under
//!   (default: @shoebox:cart)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::storage::DEFAULT_CART_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart client configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the commerce API.
    pub api_base_url: Url,
    /// Path of the local key-value snapshot file.
    pub storage_path: PathBuf,
    /// Key the serialized cart snapshot is stored under.
    pub cart_key: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("SHOEBOX_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOEBOX_API_BASE_URL".to_string(), e.to_string())
            })?;
        let storage_path =
            PathBuf::from(get_env_or_default("SHOEBOX_STORAGE_PATH", "shoebox-cart.json"));
        let cart_key = get_env_or_default("SHOEBOX_CART_KEY", DEFAULT_CART_KEY);

        Ok(Self {
            api_base_url,
            storage_path,
            cart_key,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Get an environment variable with a fallback default.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
// Env mutation is an unsafe fn in edition 2024; the workspace-wide
// `unsafe_code` deny is lifted for this module only.
#[allow(unsafe_code)]
mod tests {
    use super::*;

    // Single test so env var mutations don't race across parallel tests.
    #[test]
    fn test_from_env() {
        unsafe {
            std::env::remove_var("SHOEBOX_API_BASE_URL");
            std::env::remove_var("SHOEBOX_STORAGE_PATH");
            std::env::remove_var("SHOEBOX_CART_KEY");
        }
        assert!(matches!(
            CartConfig::from_env(),
            Err(ConfigError::MissingEnvVar(_))
        ));

        unsafe {
            std::env::set_var("SHOEBOX_API_BASE_URL", "not a url");
        }
        assert!(matches!(
            CartConfig::from_env(),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));

        unsafe {
            std::env::set_var("SHOEBOX_API_BASE_URL", "http://localhost:3333/");
        }
        let config = CartConfig::from_env().expect("config should load");
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.storage_path, PathBuf::from("shoebox-cart.json"));
        assert_eq!(config.cart_key, DEFAULT_CART_KEY);
    }
}
