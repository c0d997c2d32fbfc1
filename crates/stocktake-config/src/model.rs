// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Stocktake bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Stocktake configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StocktakeConfig {
    /// Bot identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Dropbox file store settings.
    #[serde(default)]
    pub dropbox: DropboxConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "stocktake".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables Telegram integration.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Operator allow-list: Telegram user IDs permitted to use the bot.
    /// An empty list denies everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Dropbox file store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DropboxConfig {
    /// Dropbox API access token. `None` requires environment override.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Remote path of the ledger file. Must be absolute (start with `/`).
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> String {
    "/stocktake/ledger.csv".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = StocktakeConfig::default();
        assert_eq!(config.agent.name, "stocktake");
        assert_eq!(config.agent.log_level, "info");
        assert!(config.telegram.bot_token.is_none());
        assert!(config.telegram.allowed_users.is_empty());
        assert!(config.dropbox.access_token.is_none());
        assert_eq!(config.dropbox.ledger_path, "/stocktake/ledger.csv");
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let toml_str = r#"
[agent]
name = "test"

[metrics]
enabled = true
"#;
        assert!(toml::from_str::<StocktakeConfig>(toml_str).is_err());
    }
}
