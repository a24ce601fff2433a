//! Configuration commands for managing shelfnote settings.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value
//! - `config get`: Print a single value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::Config;
use crate::error::{Result, ShelfError};

fn configured(flag: bool) -> String {
    if flag {
        "configured".green().to_string()
    } else {
        "not configured".dimmed().to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(json: bool) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;

    let token_configured = config.token().is_some();
    let catalog_key_configured = config.catalog_api_key().is_some();

    let json_output = json!({
        "api_url": config.api_url(),
        "catalog": {
            "base_url": config.catalog_url(),
            "api_key_configured": catalog_key_configured,
        },
        "auth": {
            "token_configured": token_configured,
        },
        "search": {
            "debounce_ms": config.search.debounce_ms,
            "min_chars": config.search.min_chars,
            "limit": config.search.limit,
        },
        "config_file": config_path.to_string_lossy(),
    });

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}: {}\n\n", "api_url".cyan(), config.api_url()));

    text.push_str(&format!("{}:\n", "catalog".cyan()));
    text.push_str(&format!("  base_url: {}\n", config.catalog_url()));
    text.push_str(&format!(
        "  api_key: {}\n\n",
        configured(catalog_key_configured)
    ));

    // Never print the token itself
    text.push_str(&format!("{}:\n", "auth".cyan()));
    text.push_str(&format!("  token: {}\n\n", configured(token_configured)));

    text.push_str(&format!("{}:\n", "search".cyan()));
    text.push_str(&format!("  debounce_ms: {}\n", config.search.debounce_ms));
    text.push_str(&format!("  min_chars: {}\n", config.search.min_chars));
    text.push_str(&format!("  limit: {}\n\n", config.search.limit));

    text.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    CommandOutput::new(json_output).with_text(text).print(json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = config.get(key)?.unwrap_or_default();
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), shown))
    .print(json)
}

/// Get a configuration value
pub fn cmd_config_get(key: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config
        .get(key)?
        .ok_or_else(|| ShelfError::Config(format!("{key} is not set")))?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value)
        .print(json)
}
