// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Stocktake ledger bot.

use thiserror::Error;

/// The primary error type used across all Stocktake adapter traits and core operations.
#[derive(Debug, Error)]
pub enum StocktakeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The sender is not on the operator allow-list.
    #[error("you are not authorized to use this bot")]
    AccessDenied,

    /// Remote file store errors (download failure, upload failure, transport).
    #[error("file store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The ledger file exists but cannot be decoded into the expected columns.
    #[error("corrupt ledger: {0}")]
    CorruptLedger(String),

    /// A data-entry reply had the wrong number of comma-separated fields.
    #[error("incorrect format: provide {expected} values separated by commas, got {got}")]
    InvalidEntryFormat { expected: usize, got: usize },

    /// A date field could not be normalized.
    #[error("invalid date `{0}`: use T (today), Y (yesterday), MM-DD, or YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// The operator picked a product number that is not in the offered list.
    #[error("invalid product number `{0}`")]
    InvalidSelection(String),

    /// No ledger row carries the requested index.
    #[error("no ledger entry with index {0}")]
    IndexNotFound(u32),

    /// Channel adapter errors (connection failure, message format, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_plain_text() {
        let err = StocktakeError::InvalidEntryFormat {
            expected: 5,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "incorrect format: provide 5 values separated by commas, got 3"
        );

        let err = StocktakeError::InvalidDateFormat("13-99".into());
        assert!(err.to_string().contains("13-99"));

        let err = StocktakeError::IndexNotFound(7);
        assert_eq!(err.to_string(), "no ledger entry with index 7");
    }
}
