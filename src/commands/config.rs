//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get` / `config set`: Read or change one key
//! - `theme`: Show, set or toggle the display theme

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{Config, Theme};
use crate::error::{DeskError, Result};

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path();

    let json_output = json!({
        "api": {
            "url": config.api_url(),
            "timeout_secs": config.api.timeout_secs,
        },
        "display": {
            "dark_mode": config.display.dark_mode,
        },
        "config_file": path.to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text_output.push_str(&format!("{}:\n", "api".cyan()));
    text_output.push_str(&format!("  url: {}\n", config.api_url()));
    text_output.push_str(&format!("  timeout_secs: {}\n", config.api.timeout_secs));
    text_output.push('\n');
    text_output.push_str(&format!("{}:\n", "display".cyan()));
    text_output.push_str(&format!("  dark_mode: {}\n", config.display.dark_mode));
    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Get a configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), value))
    .print(output_json)
}

/// Show the theme, or set it to `light`, `dark` or the opposite (`toggle`)
pub fn cmd_theme(choice: Option<&str>, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    let current = config.theme();

    let next = match choice {
        None => {
            return CommandOutput::new(json!({ "theme": current.to_string() }))
                .with_text(current.to_string())
                .print(output_json);
        }
        Some("toggle") => current.toggled(),
        Some(name) => name.parse::<Theme>().map_err(|_| {
            DeskError::Config(format!(
                "unknown theme '{}', expected light, dark or toggle",
                name
            ))
        })?,
    };

    config.set_theme(next);
    config.save()?;

    CommandOutput::new(json!({
        "action": "theme_set",
        "previous": current.to_string(),
        "theme": next.to_string(),
    }))
    .with_text(format!("Theme set to {}", next))
    .print(output_json)
}
