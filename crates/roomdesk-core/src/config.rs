//! Configuration
//!
//! Defaults, then build-time environment (`ROOMDESK_API_BASE`,
//! `ROOMDESK_LOG_LEVEL`, `ROOMDESK_PAGE_SIZE`), then an optional JSON
//! document served next to the app.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::DEFAULT_PAGE_SIZE;

const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("api_base_url must not be empty")]
    EmptyBaseUrl,
    #[error("default_page_size must be greater than zero")]
    ZeroPageSize,
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub default_page_size: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by variables captured at compile time
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("ROOMDESK_API_BASE"),
            option_env!("ROOMDESK_LOG_LEVEL"),
            option_env!("ROOMDESK_PAGE_SIZE"),
        )
    }

    fn from_vars(api_base: Option<&str>, log_level: Option<&str>, page_size: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.filter(|s| !s.trim().is_empty()) {
            config.api_base_url = base.trim().to_string();
        }
        if let Some(level) = log_level.filter(|s| !s.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }
        if let Some(size) = page_size.and_then(|s| s.trim().parse().ok()) {
            config.default_page_size = size;
        }
        config
    }

    /// Overlay a JSON document; absent keys keep the current value
    pub fn merge_json(&self, json: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self)?;
        let overlay: serde_json::Value = serde_json::from_str(json)?;
        if let (Some(base), Some(overlay)) = (base.as_object_mut(), overlay.as_object()) {
            for (key, value) in overlay {
                base.insert(key.clone(), value.clone());
            }
        }
        let merged: AppConfig = serde_json::from_value(base)?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        log::LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn test_build_vars_override() {
        let config = AppConfig::from_vars(Some("https://api.example.com"), Some("debug"), Some("25"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Debug);

        let config = AppConfig::from_vars(Some("  "), None, Some("lots"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_merge_json_keeps_unset_keys() {
        let base = AppConfig::from_vars(Some("https://a.example"), None, None);
        let merged = base.merge_json(r#"{"default_page_size": 50}"#).unwrap();
        assert_eq!(merged.api_base_url, "https://a.example");
        assert_eq!(merged.default_page_size, 50);
    }

    #[test]
    fn test_invalid_documents_rejected() {
        let base = AppConfig::default();
        assert!(matches!(base.merge_json(r#"{"default_page_size": 0}"#), Err(ConfigError::ZeroPageSize)));
        assert!(matches!(base.merge_json(r#"{"api_base_url": ""}"#), Err(ConfigError::EmptyBaseUrl)));
        assert!(matches!(base.merge_json(r#"{"log_level": "loud"}"#), Err(ConfigError::LogLevel(_))));
        assert!(matches!(base.merge_json("nope"), Err(ConfigError::Parse(_))));
    }
}
