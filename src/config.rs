//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client can talk to a locally running
//! backend with no configuration at all.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const BASE_URL: &str = "http://localhost:5000";
const TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin. Relative image references are resolved against it and
    /// the REST root is `{base_url}/api/`.
    /// Env: `HLOPG_BASE_URL`
    pub base_url: Url,

    /// Blanket timeout applied to every request.
    /// Env: `HLOPG_TIMEOUT_SECS`
    pub timeout: Duration,

    /// Bearer token sent with authenticated calls.
    /// Env: `HLOPG_TOKEN`
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(TIMEOUT_SECS),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("HLOPG_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = std::env::var("HLOPG_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }

        config.token = std::env::var("HLOPG_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(config)
    }

    /// Root under which all REST endpoints live.
    pub fn api_root(&self) -> Url {
        let mut root = self.base_url.clone();
        if let Ok(mut segments) = root.path_segments_mut() {
            segments.pop_if_empty().push("api").push("");
        }
        root
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("HLOPG_BASE_URL");
        std::env::remove_var("HLOPG_TIMEOUT_SECS");
        std::env::remove_var("HLOPG_TOKEN");
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert!(config.token.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("HLOPG_BASE_URL", "https://pg.example.com");
        std::env::set_var("HLOPG_TIMEOUT_SECS", "5");
        std::env::set_var("HLOPG_TOKEN", "abc");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url.host_str(), Some("pg.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token.as_deref(), Some("abc"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_timeout_is_rejected() {
        clear_env();
        std::env::set_var("HLOPG_TIMEOUT_SECS", "soon");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::InvalidTimeout(_))
        ));
        std::env::set_var("HLOPG_TIMEOUT_SECS", "0");
        assert!(ApiConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_api_root_appends_api_segment() {
        let config = ApiConfig::new("http://localhost:5000").unwrap();
        assert_eq!(config.api_root().as_str(), "http://localhost:5000/api/");

        let nested = ApiConfig::new("https://host.in/backend/").unwrap();
        assert_eq!(nested.api_root().as_str(), "https://host.in/backend/api/");
    }

    #[test]
    fn test_rejects_non_url() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
