//! Bot configuration
//!
//! Loaded from environment variables (after `dotenvy`), or from a `bot.json`
//! style file when `BOT_CONFIG_PATH` is set.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Accept bot.json files alongside environment variables
//! - 1.0.0: Initial environment-based configuration

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_MESSAGE_TIMEOUT_MS: i64 = 5000;
pub const DEFAULT_STATS_API_URL: &str = "https://halo.api.stdlib.com/mcc@0.0.11/stats/";
pub const DEFAULT_MANIFEST_PATH: &str = "commands.yaml";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub prefix: String,
    /// Auto-delete delay for deletable notices; zero or negative disables it
    pub message_timeout_ms: i64,
    pub log_level: String,
    pub stats_api_url: String,
    pub stats_api_token: Option<String>,
    pub manifest_path: String,
    /// Channels the `stats` command is restricted to, unrestricted when `None`
    pub stats_channels: Option<Vec<String>>,
}

/// On-disk layout of `bot.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    token: String,
    #[serde(default = "default_prefix")]
    prefix: String,
    #[serde(default = "default_message_timeout")]
    message_timeout: i64,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    stats_api_url: Option<String>,
    #[serde(default)]
    stats_api_token: Option<String>,
    #[serde(default)]
    manifest_path: Option<String>,
    #[serde(default)]
    stats_channels: Option<Vec<String>>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_message_timeout() -> i64 {
    DEFAULT_MESSAGE_TIMEOUT_MS
}

/// Comma-separated channel names; blank entries are dropped
fn parse_channel_list(raw: &str) -> Option<Vec<String>> {
    let channels: Vec<String> = raw
        .split(',')
        .map(|name| name.trim().trim_start_matches('#').to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if channels.is_empty() {
        None
    } else {
        Some(channels)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// If `BOT_CONFIG_PATH` is set the JSON file it points at is used instead.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var("BOT_CONFIG_PATH") {
            return Self::from_json_file(&path);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .ok_or_else(|| anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let message_timeout_ms = match lookup("MESSAGE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("MESSAGE_TIMEOUT_MS must be an integer, got '{raw}'"))?,
            None => DEFAULT_MESSAGE_TIMEOUT_MS,
        };

        let config = Config {
            discord_token,
            prefix: lookup("COMMAND_PREFIX").unwrap_or_else(default_prefix),
            message_timeout_ms,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            stats_api_url: lookup("STATS_API_URL")
                .unwrap_or_else(|| DEFAULT_STATS_API_URL.to_string()),
            stats_api_token: lookup("STATS_API_TOKEN").filter(|t| !t.is_empty()),
            manifest_path: lookup("COMMANDS_MANIFEST_PATH")
                .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string()),
            stats_channels: lookup("STATS_CHANNELS").and_then(|raw| parse_channel_list(&raw)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a `bot.json` file (`token`, `prefix`, `messageTimeout`, ...)
    pub fn from_json_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        Self::from_json_str(&contents).with_context(|| format!("Invalid config file {path}"))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: FileConfig = serde_json::from_str(contents)?;
        let config = Config {
            discord_token: file.token,
            prefix: file.prefix,
            message_timeout_ms: file.message_timeout,
            log_level: file.log_level.unwrap_or_else(|| "info".to_string()),
            stats_api_url: file
                .stats_api_url
                .unwrap_or_else(|| DEFAULT_STATS_API_URL.to_string()),
            stats_api_token: file.stats_api_token.filter(|t| !t.is_empty()),
            manifest_path: file
                .manifest_path
                .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string()),
            stats_channels: file.stats_channels.filter(|channels| !channels.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.discord_token.trim().is_empty() {
            return Err(anyhow!("Discord token must not be empty"));
        }
        if self.prefix.is_empty() {
            return Err(anyhow!("Command prefix must not be empty"));
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(anyhow!(
                "Command prefix must not contain whitespace: '{}'",
                self.prefix
            ));
        }
        Ok(())
    }

    /// Delay before deletable notices are removed, `None` when disabled
    pub fn delete_after(&self) -> Option<Duration> {
        if self.message_timeout_ms > 0 {
            Some(Duration::from_millis(self.message_timeout_ms as u64))
        } else {
            None
        }
    }
}
