use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, ShopcatError};

/// Global shopcat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store origin to crawl when no URL is given on the command line
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds to sleep between page fetches
    #[serde(default = "default_request_delay")]
    pub request_delay_secs: f64,

    /// Maximum number of pages fetched in a single crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// GHS -> USD conversion rate used for catalog pricing
    #[serde(default = "default_usd_rate")]
    pub usd_rate: f64,

    /// Currency glyph used in console output
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_base_url() -> String {
    "https://shopdydy.com".to_string()
}

fn default_request_delay() -> f64 {
    1.0
}

fn default_max_pages() -> usize {
    40
}

fn default_usd_rate() -> f64 {
    0.08
}

fn default_currency_symbol() -> String {
    "₵".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_delay_secs: default_request_delay(),
            max_pages: default_max_pages(),
            usd_rate: default_usd_rate(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShopcatError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "shopcat")
            .ok_or_else(|| ShopcatError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "shopcat")
            .ok_or_else(|| ShopcatError::ConfigError("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the database path
    ///
    /// Supports SHOPCAT_DB environment variable for test isolation
    pub fn db_path() -> Result<PathBuf> {
        // Check for environment variable override first
        if let Ok(path) = std::env::var("SHOPCAT_DB") {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::data_dir()?.join("shopcat.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://shopdydy.com");
        assert_eq!(config.max_pages, 40);
        assert!((config.request_delay_secs - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("max_pages = 5").unwrap();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.base_url, "https://shopdydy.com");
        assert!((config.usd_rate - 0.08).abs() < f64::EPSILON);
    }
}
