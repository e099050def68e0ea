//! # Configuration
//!
//! Manages the loading and parsing of the bot's configuration file (`config.yaml`).
//! Every field has a default so a partial file (or none at all) still yields a usable config.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// OAuth connection configured on the bot registration.
    #[serde(default = "default_connection_name")]
    pub connection_name: String,
    /// Target of the "View details" button under the open positions list.
    #[serde(default = "default_details_url")]
    pub details_url: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            connection_name: default_connection_name(),
            details_url: default_details_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,
    #[serde(default = "default_graph_endpoint")]
    pub graph_endpoint: String,
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    /// Bearer token the bot presents to the token service.
    #[serde(default)]
    pub bot_token: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_endpoint: default_token_endpoint(),
            graph_endpoint: default_graph_endpoint(),
            channel_id: default_channel_id(),
            bot_token: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_open_positions")]
    pub open_positions: usize,
    #[serde(default = "default_extension_results")]
    pub extension_results: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            open_positions: default_open_positions(),
            extension_results: default_extension_results(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

fn default_bot_name() -> String {
    "Talent Bot".to_string()
}
fn default_connection_name() -> String {
    "graph".to_string()
}
fn default_details_url() -> String {
    "https://careers.contoso.com/postings".to_string()
}
fn default_token_endpoint() -> String {
    "https://token.botframework.com".to_string()
}
fn default_graph_endpoint() -> String {
    "https://graph.microsoft.com".to_string()
}
fn default_channel_id() -> String {
    "msteams".to_string()
}
fn default_open_positions() -> usize {
    5
}
fn default_extension_results() -> usize {
    10
}
fn default_log_directory() -> String {
    "data".to_string()
}
fn default_log_file() -> String {
    "session.log".to_string()
}
fn default_log_filter() -> String {
    "info,hyper=warn,reqwest=warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str(
            "bot:\n  connection_name: aad\nlimits:\n  open_positions: 3\n",
        )
        .unwrap();
        assert_eq!(config.bot.connection_name, "aad");
        assert_eq!(config.bot.name, "Talent Bot");
        assert_eq!(config.limits.open_positions, 3);
        assert_eq!(config.limits.extension_results, 10);
        assert_eq!(config.identity.channel_id, "msteams");
    }

    #[test]
    fn empty_mapping_is_valid() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.logging.file, "session.log");
    }
}
