// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dropbox file store adapter for the Stocktake ledger bot.
//!
//! Implements [`FileStore`](stocktake_core::traits::FileStore) over the
//! Dropbox content API: `files/download` for fetch and `files/upload`
//! with mode `overwrite` for store.

pub mod client;

pub use client::DropboxStore;
