// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat ephemeral conversation state.
//!
//! A session exists only between `/start` and the terminal transition of
//! one data-entry interaction. Sessions are never persisted; a process
//! restart drops all of them.

use std::collections::HashMap;

use stocktake_core::types::SessionId;
use tokio::sync::Mutex;

/// States a conversation waits in between operator messages.
///
/// There is no `Idle` variant: an idle chat simply has no session entry
/// in the [`SessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Menu sent, waiting for "buy" or "sell".
    AwaitingActionChoice,
    /// Format prompt sent, waiting for the five buy fields.
    AwaitingBuyDetails,
    /// Numbered unsold list sent, waiting for a product number.
    AwaitingSellTarget,
    /// Product chosen, waiting for sell date and price.
    AwaitingSellDetails,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::AwaitingActionChoice => write!(f, "awaiting_action_choice"),
            ConversationState::AwaitingBuyDetails => write!(f, "awaiting_buy_details"),
            ConversationState::AwaitingSellTarget => write!(f, "awaiting_sell_target"),
            ConversationState::AwaitingSellDetails => write!(f, "awaiting_sell_details"),
        }
    }
}

/// One unsold record as offered to the operator.
///
/// `index` is the record's stored ledger index; the displayed line starts
/// with the same number, so the operator's later choice resolves without
/// a separate positional mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsoldItem {
    pub index: u32,
    pub line: String,
}

/// The ephemeral state of one conversation.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: ConversationState,
    /// Unsold subset captured when the operator was asked to choose.
    /// Display and validation only; writes always reload the ledger.
    pub unsold_snapshot: Vec<UnsoldItem>,
    pub selected_index: Option<u32>,
}

impl Session {
    /// A fresh session, waiting on the action menu.
    pub fn new() -> Self {
        Self {
            state: ConversationState::AwaitingActionChoice,
            unsold_snapshot: Vec::new(),
            selected_index: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory session store keyed by chat.
///
/// The router takes a session out to run one step and reinserts it only
/// if the step continues the conversation, so a terminal step evicts the
/// entry as a side effect of not putting it back.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the session for `id`, if one exists.
    pub async fn take(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.remove(id)
    }

    /// Inserts (or replaces) the session for `id`.
    pub async fn insert(&self, id: SessionId, session: Session) {
        self.sessions.lock().await.insert(id, session);
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
