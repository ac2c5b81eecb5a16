//! Runtime configuration for the browsing core.
//!
//! Defaults are compiled in and cover local development against a
//! backend on port 8080. Deployments override them through `BACKOFFICE_*`
//! environment variables; anything unset keeps its default.

use std::env;

use thiserror::Error;

/// Default page size for list windows.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Default request timeout for the HTTP adapter.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const ENV_API_URL: &str = "BACKOFFICE_API_URL";
const ENV_PAGE_LIMIT: &str = "BACKOFFICE_PAGE_LIMIT";
const ENV_STRIP_WIDTH: &str = "BACKOFFICE_STRIP_WIDTH";
const ENV_TIMEOUT_SECS: &str = "BACKOFFICE_TIMEOUT_SECS";

/// Configuration error with the offending variable attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key} (expected a positive integer)")]
    InvalidValue { key: String, value: String },
}

/// Settings shared by browsers and the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Base URL of the backoffice API, without a trailing slash.
    pub base_url: String,
    /// Records per list window.
    pub page_limit: usize,
    /// Page numbers shown in the pagination strip.
    pub strip_width: usize,
    /// Request timeout for the HTTP adapter.
    pub timeout_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            strip_width: crate::pagination::DEFAULT_MAX_VISIBLE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CoreConfig {
    /// Build from defaults plus `BACKOFFICE_*` environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Some(limit) = positive_usize(ENV_PAGE_LIMIT)? {
            config.page_limit = limit;
        }
        if let Some(width) = positive_usize(ENV_STRIP_WIDTH)? {
            config.strip_width = width;
        }
        if let Some(secs) = positive_u64(ENV_TIMEOUT_SECS)? {
            config.timeout_secs = secs;
        }
        Ok(config)
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the page size.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Override the pagination strip width.
    pub fn with_strip_width(mut self, width: usize) -> Self {
        self.strip_width = width.max(1);
        self
    }

    /// Override the HTTP request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }
}

fn positive_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn positive_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_PAGE_LIMIT);
        env::remove_var(ENV_STRIP_WIDTH);
        env::remove_var(ENV_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_when_nothing_set() {
        clear_env();
        let config = CoreConfig::from_env().unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.strip_width, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        env::set_var(ENV_API_URL, "https://backoffice.internal/api/");
        env::set_var(ENV_PAGE_LIMIT, "25");
        env::set_var(ENV_STRIP_WIDTH, "7");
        env::set_var(ENV_TIMEOUT_SECS, "5");
        let config = CoreConfig::from_env().unwrap();
        clear_env();
        assert_eq!(config.base_url, "https://backoffice.internal/api");
        assert_eq!(config.page_limit, 25);
        assert_eq!(config.strip_width, 7);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_limit() {
        clear_env();
        env::set_var(ENV_PAGE_LIMIT, "plenty");
        let err = CoreConfig::from_env().unwrap_err();
        clear_env();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_PAGE_LIMIT.to_string(),
                value: "plenty".to_string(),
            }
        );
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_width() {
        clear_env();
        env::set_var(ENV_STRIP_WIDTH, "0");
        assert!(CoreConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_builders_clamp_to_one() {
        let config = CoreConfig::default().with_page_limit(0).with_strip_width(0);
        assert_eq!(config.page_limit, 1);
        assert_eq!(config.strip_width, 1);
    }
}
