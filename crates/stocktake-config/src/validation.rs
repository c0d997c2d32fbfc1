// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as recognized log levels and an absolute ledger path.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::StocktakeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StocktakeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.dropbox.ledger_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "dropbox.ledger_path must not be empty".to_string(),
        });
    } else if !config.dropbox.ledger_path.starts_with('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "dropbox.ledger_path must be absolute (start with `/`), got `{}`",
                config.dropbox.ledger_path
            ),
        });
    }

    // Allow-list entries must be non-blank and unique.
    let mut seen_users = HashSet::new();
    for (i, user) in config.telegram.allowed_users.iter().enumerate() {
        if user.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("telegram.allowed_users[{i}] must not be blank"),
            });
        } else if !seen_users.insert(user) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate entry `{user}` in telegram.allowed_users"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
