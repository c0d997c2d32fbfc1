// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./stocktake.toml` > `~/.config/stocktake/stocktake.toml`
//! > `/etc/stocktake/stocktake.toml` with environment variable overrides via
//! `STOCKTAKE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::StocktakeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/stocktake/stocktake.toml` (system-wide)
/// 3. `~/.config/stocktake/stocktake.toml` (user XDG config)
/// 4. `./stocktake.toml` (local directory)
/// 5. `STOCKTAKE_*` environment variables
pub fn load_config() -> Result<StocktakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StocktakeConfig::default()))
        .merge(Toml::file("/etc/stocktake/stocktake.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("stocktake/stocktake.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("stocktake.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<StocktakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StocktakeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StocktakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StocktakeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `STOCKTAKE_TELEGRAM_BOT_TOKEN` must
/// map to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("STOCKTAKE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: STOCKTAKE_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("dropbox_", "dropbox.", 1);
        mapped.into()
    })
}
