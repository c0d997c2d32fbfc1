// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Stocktake ledger bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Stocktake workspace. All adapter crates
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StocktakeError;
pub use types::{AdapterType, HealthStatus, MessageId, SenderId, SessionId};

// Re-export all adapter traits at crate root.
pub use traits::{ChannelAdapter, FileStore, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stocktake_error_has_all_variants() {
        // Verify all 10 error variants exist and can be constructed.
        let _config = StocktakeError::Config("test".into());
        let _denied = StocktakeError::AccessDenied;
        let _store = StocktakeError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _corrupt = StocktakeError::CorruptLedger("bad header".into());
        let _entry = StocktakeError::InvalidEntryFormat {
            expected: 5,
            got: 2,
        };
        let _date = StocktakeError::InvalidDateFormat("13-99".into());
        let _selection = StocktakeError::InvalidSelection("abc".into());
        let _index = StocktakeError::IndexNotFound(3);
        let _channel = StocktakeError::Channel {
            message: "test".into(),
            source: None,
        };
        let _internal = StocktakeError::Internal("test".into());
    }

    #[test]
    fn adapter_type_serialization() {
        let channel = AdapterType::Channel;
        let json = serde_json::to_string(&channel).expect("should serialize");
        let parsed: AdapterType = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(channel, parsed);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // This test verifies that the adapter trait modules compile and are
        // accessible through the public API. If any module is missing or has
        // a compile error, this test won't compile.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_file_store<T: FileStore>() {}
    }
}
