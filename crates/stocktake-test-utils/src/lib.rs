// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Stocktake integration tests.
//!
//! Provides deterministic mock adapters: [`MockChannel`] for the chat
//! transport and [`MemoryFileStore`] for the remote file store.

pub mod mock_channel;
pub mod mock_store;

pub use mock_channel::MockChannel;
pub use mock_store::MemoryFileStore;
