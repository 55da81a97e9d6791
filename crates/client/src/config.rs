//! Client configuration.

use reqwest::Url;

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "PRODUTO_API_URL";

/// Base URL used when [`BASE_URL_ENV`] is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Where the product API lives.
///
/// The base URL always ends in `/`, so relative resource paths such as
/// `api/products` resolve underneath it rather than replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { base_url: url })
    }

    /// Read the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_var(std::env::var(BASE_URL_ENV).ok())
    }

    fn from_var(value: Option<String>) -> Result<Self, ConfigError> {
        match value {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => {
                tracing::warn!("{} not set; using {}", BASE_URL_ENV, DEFAULT_BASE_URL);
                Self::new(DEFAULT_BASE_URL)
            }
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
