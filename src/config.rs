//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (or the path in `SHELFNOTE_CONFIG`) and includes:
//! - The library backend URL and access token
//! - The book catalog endpoint and optional API key
//! - Search widget tuning (debounce, minimum query length, result limit)

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::catalog::MAX_LOOKUP_LIMIT;
use crate::error::{Result, ShelfError};

pub const CONFIG_PATH_ENV: &str = "SHELFNOTE_CONFIG";
pub const API_URL_ENV: &str = "SHELFNOTE_API_URL";
pub const TOKEN_ENV: &str = "SHELFNOTE_TOKEN";
pub const CATALOG_KEY_ENV: &str = "GOOGLE_BOOKS_API_KEY";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the library backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Book catalog settings
    #[serde(default, skip_serializing_if = "CatalogConfig::is_default")]
    pub catalog: CatalogConfig,

    /// Authentication for the library backend
    #[serde(default)]
    pub auth: AuthConfig,

    /// Search widget tuning
    #[serde(default, skip_serializing_if = "SearchConfig::is_default")]
    pub search: SearchConfig,
}

/// Book catalog configuration
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CatalogConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Search widget configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period before a lookup fires, in milliseconds (default: 1000)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length that triggers a lookup (default: 2)
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Maximum number of candidates requested per lookup (default: 20)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_min_chars() -> usize {
    2
}

fn default_limit() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
            limit: default_limit(),
        }
    }
}

impl SearchConfig {
    /// Check if this config has default values
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Pull hand-edited values back into the accepted ranges
    pub fn normalize(&mut self) {
        if self.min_chars == 0 {
            tracing::warn!("search.min_chars is 0 in config; using 1");
            self.min_chars = 1;
        }
        let limit = self.limit.clamp(1, MAX_LOOKUP_LIMIT);
        if limit != self.limit {
            tracing::warn!(
                "search.limit {} in config is outside 1..={}; using {}",
                self.limit,
                MAX_LOOKUP_LIMIT,
                limit
            );
            self.limit = limit;
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let dirs = directories::ProjectDirs::from("com", "shelfnote", "shelfnote").ok_or_else(
            || ShelfError::Config("cannot determine configuration directory".to_string()),
        )?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Directory for log files written while the TUI owns the terminal
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "shelfnote", "shelfnote").ok_or_else(
            || ShelfError::Config("cannot determine data directory".to_string()),
        )?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ShelfError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let mut config: Config = serde_yaml_ng::from_str(&content)?;
        config.search.normalize();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;

        // The file holds the backend token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Get the library backend URL from environment or config
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Get the backend token from environment or config
    pub fn token(&self) -> Option<SecretString> {
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some(SecretString::from(token));
        }

        self.auth.token.clone().map(SecretString::from)
    }

    /// Get the catalog base URL
    pub fn catalog_url(&self) -> String {
        self.catalog
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
    }

    /// Get the catalog API key from environment or config
    pub fn catalog_api_key(&self) -> Option<SecretString> {
        if let Ok(key) = env::var(CATALOG_KEY_ENV)
            && !key.is_empty()
        {
            return Some(SecretString::from(key));
        }

        self.catalog.api_key.clone().map(SecretString::from)
    }

    /// Set a value by its dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = Some(value.to_string()),
            "auth.token" => self.auth.token = Some(value.to_string()),
            "catalog.base_url" => self.catalog.base_url = Some(value.to_string()),
            "catalog.api_key" => self.catalog.api_key = Some(value.to_string()),
            "search.debounce_ms" => self.search.debounce_ms = parse_number(key, value)?,
            "search.min_chars" => {
                let min_chars = parse_number(key, value)?;
                if min_chars == 0 {
                    return Err(ShelfError::Config(
                        "search.min_chars must be at least 1".to_string(),
                    ));
                }
                self.search.min_chars = min_chars;
            }
            "search.limit" => {
                let limit = parse_number(key, value)?;
                if !(1..=MAX_LOOKUP_LIMIT).contains(&limit) {
                    return Err(ShelfError::Config(format!(
                        "search.limit must be between 1 and {MAX_LOOKUP_LIMIT}"
                    )));
                }
                self.search.limit = limit;
            }
            _ => {
                return Err(ShelfError::Config(format!(
                    "unknown config key '{key}'. Valid keys: {}",
                    VALID_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Get a value by its dotted key, masking secrets
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "api_url" => Some(self.api_url()),
            "auth.token" => self.auth.token.as_deref().map(mask_sensitive_value),
            "catalog.base_url" => Some(self.catalog_url()),
            "catalog.api_key" => self.catalog.api_key.as_deref().map(mask_sensitive_value),
            "search.debounce_ms" => Some(self.search.debounce_ms.to_string()),
            "search.min_chars" => Some(self.search.min_chars.to_string()),
            "search.limit" => Some(self.search.limit.to_string()),
            _ => {
                return Err(ShelfError::Config(format!(
                    "unknown config key '{key}'. Valid keys: {}",
                    VALID_KEYS.join(", ")
                )));
            }
        };
        Ok(value)
    }
}

pub const VALID_KEYS: &[&str] = &[
    "api_url",
    "auth.token",
    "catalog.base_url",
    "catalog.api_key",
    "search.debounce_ms",
    "search.min_chars",
    "search.limit",
];

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ShelfError::Config(format!("invalid value '{value}' for {key}")))
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}
