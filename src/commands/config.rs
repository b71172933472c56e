//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config get`: Print one key
//! - `config set`: Change one key and save

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;
use crate::paths::config_path;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let token = config.token().map(|t| mask_sensitive_value(&t));

    let json_output = json!({
        "api_url": config.api_url(),
        "request_timeout": config.request_timeout,
        "page_size": config.page_size,
        "debounce_ms": config.debounce_ms,
        "poll": {
            "interval_secs": config.poll.interval_secs,
            "max_attempts": config.poll.max_attempts,
        },
        "scroll": {
            "feed_threshold": config.scroll.feed_threshold,
            "default_threshold": config.scroll.default_threshold,
        },
        "auth": {
            "token_configured": token.is_some(),
        },
        "config_file": config_path().to_string_lossy(),
    });

    let mut text = format!("{}\n\n", "Configuration:".cyan().bold());
    for key in CONFIG_KEYS {
        let value = match *key {
            "api_url" => config.api_url(),
            "auth.token" => token.clone().unwrap_or_else(|| "(not set)".to_string()),
            _ => config.get(key)?,
        };
        text.push_str(&format!("  {}: {value}\n", key.cyan()));
    }
    text.push_str(&format!(
        "\n{} {}",
        "Config file:".dimmed(),
        config_path().display()
    ));

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output_json)
}

/// Print one configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value.clone())
        .print(output_json)
}

/// Set one configuration value and save the file
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "auth.token" {
        mask_sensitive_value(value)
    } else {
        config.get(key)?
    };

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "success": true,
    }))
    .with_text(format!("Set {} = {shown}", key.cyan()))
    .print(output_json)
}
