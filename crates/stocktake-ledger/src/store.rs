// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote ledger persistence: full-file load and save over a [`FileStore`].
//!
//! Every mutation elsewhere in the workspace is a load -> transform -> save
//! cycle through this type. The backing store has no locking or version
//! token, so a save is a whole-file last-writer-wins overwrite.

use std::sync::Arc;

use stocktake_core::traits::FileStore;
use stocktake_core::StocktakeError;
use tracing::{debug, info};

use crate::codec;
use crate::table::LedgerTable;

/// Loads and persists the transaction ledger at a fixed remote path.
pub struct LedgerStore {
    store: Arc<dyn FileStore>,
    path: String,
}

impl LedgerStore {
    pub fn new(store: Arc<dyn FileStore>, path: impl Into<String>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    /// Returns the remote path this store reads and writes.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetches and decodes the remote ledger file.
    ///
    /// A missing remote file decodes as the empty table, so a fresh
    /// deployment bootstraps on the first buy entry.
    pub async fn load(&self) -> Result<LedgerTable, StocktakeError> {
        match self.store.fetch(&self.path).await? {
            Some(bytes) => {
                let table = codec::decode(&bytes)?;
                debug!(path = %self.path, rows = table.len(), "ledger loaded");
                Ok(table)
            }
            None => {
                info!(path = %self.path, "no remote ledger yet, starting empty");
                Ok(LedgerTable::default())
            }
        }
    }

    /// Encodes and overwrites the whole remote ledger file.
    pub async fn save(&self, table: &LedgerTable) -> Result<(), StocktakeError> {
        let bytes = codec::encode(table)?;
        self.store.store(&self.path, bytes).await?;
        debug!(path = %self.path, rows = table.len(), "ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use stocktake_test_utils::MemoryFileStore;

    use crate::record::BuyDraft;

    use super::*;

    fn draft() -> BuyDraft {
        BuyDraft {
            serial_number: "ABC123".into(),
            model: "iPhone13".into(),
            storage: "128GB".into(),
            purchase_price: "500".into(),
            purchase_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn load_missing_file_yields_empty_table() {
        let store = Arc::new(MemoryFileStore::new());
        let ledger = LedgerStore::new(store, "/stocktake/ledger.csv");
        let table = ledger.load().await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = Arc::new(MemoryFileStore::new());
        let ledger = LedgerStore::new(store, "/stocktake/ledger.csv");

        let mut table = LedgerTable::default();
        table.append(draft());
        ledger.save(&table).await.unwrap();

        let loaded = ledger.load().await.unwrap();
        assert_eq!(loaded, table);
    }

    #[tokio::test]
    async fn load_surfaces_fetch_failure() {
        let store = Arc::new(MemoryFileStore::new());
        store.fail_next_fetch("network down").await;
        let ledger = LedgerStore::new(store, "/stocktake/ledger.csv");
        let err = ledger.load().await.unwrap_err();
        assert!(matches!(err, StocktakeError::Store { .. }));
    }

    #[tokio::test]
    async fn save_surfaces_store_failure() {
        let store = Arc::new(MemoryFileStore::new());
        store.fail_next_store("quota exceeded").await;
        let ledger = LedgerStore::new(store, "/stocktake/ledger.csv");
        let err = ledger.save(&LedgerTable::default()).await.unwrap_err();
        assert!(matches!(err, StocktakeError::Store { .. }));
    }

    #[tokio::test]
    async fn load_surfaces_corrupt_bytes() {
        let store = Arc::new(MemoryFileStore::new());
        store
            .put("/stocktake/ledger.csv", b"not,a,ledger\n1,2,3\n".to_vec())
            .await;
        let ledger = LedgerStore::new(store, "/stocktake/ledger.csv");
        let err = ledger.load().await.unwrap_err();
        assert!(matches!(err, StocktakeError::CorruptLedger(_)));
    }
}
