//! Runtime configuration for the API origin.
//!
//! The base URL is looked up, in order, from a `<meta name="api-base-url">`
//! tag in the host page, the `API_BASE_URL` variable at compile time, and
//! finally [`DEFAULT_API_BASE_URL`].

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

const BASE_URL_META: &str = "meta[name=\"api-base-url\"]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Validate a base URL and strip any trailing slash so paths can be appended.
    pub fn from_base_url(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            api_base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn load() -> Self {
        let candidate = meta_base_url().or_else(|| option_env!("API_BASE_URL").map(String::from));

        match candidate {
            Some(raw) => Self::from_base_url(&raw).unwrap_or_else(|e| {
                warn!("{}; using {}", e, DEFAULT_API_BASE_URL);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

fn meta_base_url() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(BASE_URL_META).ok()??;
    meta.get_attribute("content")
        .filter(|content| !content.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_base_url("https://api.example.com/").unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn test_path_prefix_kept() {
        let config = AppConfig::from_base_url(" https://example.com/api/ ").unwrap();
        assert_eq!(config.api_base_url, "https://example.com/api");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = AppConfig::from_base_url("not a url").unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = AppConfig::from_base_url("ftp://files.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_default_points_at_local_api() {
        assert_eq!(AppConfig::default().api_base_url, "http://localhost:3001");
    }
}
