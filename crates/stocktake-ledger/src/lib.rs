// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction ledger for the Stocktake bot.
//!
//! Provides the record model, the ordered in-memory table with its pure
//! transformation helpers, the CSV codec, shorthand date normalization,
//! and [`LedgerStore`] for whole-file load/save against a remote
//! [`FileStore`](stocktake_core::traits::FileStore).

pub mod codec;
pub mod dates;
pub mod record;
pub mod store;
pub mod table;

pub use record::{BuyDraft, SalePatch, TransactionRecord};
pub use store::LedgerStore;
pub use table::LedgerTable;
