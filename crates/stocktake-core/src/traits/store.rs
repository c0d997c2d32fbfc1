// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote file store trait for whole-file fetch/store backends (Dropbox, etc.).

use async_trait::async_trait;

use crate::error::StocktakeError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for a remote file-hosting service.
///
/// The store holds opaque byte blobs at slash-separated paths. It offers
/// no locking, no versioning, and no concurrency control: `store` is a
/// whole-file overwrite, and concurrent writers are last-writer-wins.
#[async_trait]
pub trait FileStore: PluginAdapter {
    /// Fetches the file at `path`. Returns `Ok(None)` if no file exists there.
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StocktakeError>;

    /// Stores `bytes` at `path`, overwriting any existing file.
    async fn store(&self, path: &str, bytes: Vec<u8>) -> Result<(), StocktakeError>;
}
