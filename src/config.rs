//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! The schemas themselves are configuration-free; only logging, link building
//! and pagination defaults read from here.

use std::env;

use url::Url;

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_RUST_LOG, MAX_PAGE_SIZE};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub log: LogConfig,
    pub links: LinkConfig,
    pub pagination: PaginationConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
    pub format: LogFormat,
}

/// Navigation link configuration
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub base_url: Url,
}

/// Pagination defaults for collection queries
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            log: LogConfig::from_env()?,
            links: LinkConfig::from_env()?,
            pagination: PaginationConfig::from_env()?,
        })
    }
}

impl LogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        };

        Ok(Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            format,
        })
    }
}

impl LinkConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Ok(Self {
            base_url: parse_base_url(&raw)?,
        })
    }
}

impl PaginationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_page_size: u32 = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DEFAULT_PAGE_SIZE".to_string()))?;
        let max_page_size: u32 = env::var("MAX_PAGE_SIZE")
            .unwrap_or_else(|_| MAX_PAGE_SIZE.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("MAX_PAGE_SIZE".to_string()))?;

        if max_page_size == 0 {
            return Err(ConfigError::InvalidValue("MAX_PAGE_SIZE".to_string()));
        }
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::InvalidValue("DEFAULT_PAGE_SIZE".to_string()));
        }

        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }
}

/// Parse a link base URL; it must be an absolute http(s) URL that can carry paths
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidValue("API_BASE_URL".to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue("API_BASE_URL".to_string()));
    }
    Ok(url)
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.default_page_size, 20);
        assert_eq!(pagination.max_page_size, 100);
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("http://localhost:8000").is_ok());
        assert!(parse_base_url("https://api.example.com/v1/").is_ok());
        assert!(parse_base_url("ftp://files.example.com").is_err());
        assert!(parse_base_url("mailto:admin@example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}
