// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory file store for deterministic testing.
//!
//! `MemoryFileStore` implements `FileStore` against a path-keyed map, with
//! one-shot failure injection for exercising store-unavailable paths and
//! call counters for asserting that a flow never touched the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stocktake_core::traits::adapter::PluginAdapter;
use stocktake_core::traits::store::FileStore;
use stocktake_core::types::{AdapterType, HealthStatus};
use stocktake_core::StocktakeError;

#[derive(Default)]
struct Inner {
    files: HashMap<String, Vec<u8>>,
    fail_next_fetch: Option<String>,
    fail_next_store: Option<String>,
    fetch_calls: usize,
    store_calls: usize,
}

/// A mock remote file store for testing.
pub struct MemoryFileStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Seeds a file at `path` directly, bypassing the adapter interface.
    pub async fn put(&self, path: &str, bytes: Vec<u8>) {
        self.inner.lock().await.files.insert(path.to_string(), bytes);
    }

    /// Reads a file at `path` directly, bypassing the adapter interface.
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.lock().await.files.get(path).cloned()
    }

    /// Makes the next `fetch` call fail with the given message.
    pub async fn fail_next_fetch(&self, message: &str) {
        self.inner.lock().await.fail_next_fetch = Some(message.to_string());
    }

    /// Makes the next `store` call fail with the given message.
    pub async fn fail_next_store(&self, message: &str) {
        self.inner.lock().await.fail_next_store = Some(message.to_string());
    }

    /// Number of `fetch` calls made through the adapter interface.
    pub async fn fetch_calls(&self) -> usize {
        self.inner.lock().await.fetch_calls
    }

    /// Number of `store` calls made through the adapter interface.
    pub async fn store_calls(&self) -> usize {
        self.inner.lock().await.store_calls
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemoryFileStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::FileStore
    }

    async fn health_check(&self) -> Result<HealthStatus, StocktakeError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), StocktakeError> {
        Ok(())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StocktakeError> {
        let mut inner = self.inner.lock().await;
        inner.fetch_calls += 1;
        if let Some(message) = inner.fail_next_fetch.take() {
            return Err(StocktakeError::Store {
                source: Box::new(std::io::Error::other(message)),
            });
        }
        Ok(inner.files.get(path).cloned())
    }

    async fn store(&self, path: &str, bytes: Vec<u8>) -> Result<(), StocktakeError> {
        let mut inner = self.inner.lock().await;
        inner.store_calls += 1;
        if let Some(message) = inner.fail_next_store.take() {
            return Err(StocktakeError::Store {
                source: Box::new(std::io::Error::other(message)),
            });
        }
        inner.files.insert(path.to_string(), bytes);
        Ok(())
    }
}
