// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition of guard, session store, and state machine.
//!
//! The router is the single entry point the transport binding calls per
//! inbound message: allow-list check first, then one state-machine step,
//! then session bookkeeping. It owns nothing channel-specific.

use std::sync::Arc;

use stocktake_core::types::{InboundMessage, OutboundMessage};
use stocktake_core::StocktakeError;
use stocktake_ledger::LedgerStore;
use tracing::{debug, warn};

use crate::guard::{Access, AccessGuard};
use crate::machine::{ConversationMachine, Event};
use crate::session::SessionStore;

/// Per-process conversation dispatcher.
pub struct ConversationRouter {
    guard: AccessGuard,
    sessions: SessionStore,
    machine: ConversationMachine,
}

impl ConversationRouter {
    pub fn new(guard: AccessGuard, ledger: Arc<LedgerStore>) -> Self {
        Self {
            guard,
            sessions: SessionStore::new(),
            machine: ConversationMachine::new(ledger),
        }
    }

    /// Handles one inbound message to completion and returns the reply.
    ///
    /// The caller must not interleave two calls for the same session; the
    /// serve loop awaits each dispatch before receiving the next message.
    pub async fn handle(&self, inbound: InboundMessage) -> OutboundMessage {
        if self.guard.check(&inbound.sender) == Access::Denied {
            warn!(sender = %inbound.sender.0, "rejected message from unlisted sender");
            return OutboundMessage::text(
                inbound.session,
                format!("Error: {}", StocktakeError::AccessDenied),
            );
        }

        let event = Event::from_text(&inbound.text);
        let session = self.sessions.take(&inbound.session).await;
        let today = chrono::Local::now().date_naive();

        debug!(
            session = %inbound.session.0,
            state = session.as_ref().map(|s| s.state.to_string()).unwrap_or_else(|| "idle".into()),
            "dispatching conversation step"
        );

        let outcome = self.machine.step(session, event, today).await;
        if let Some(next) = outcome.next {
            self.sessions.insert(inbound.session.clone(), next).await;
        }

        OutboundMessage {
            session: inbound.session,
            text: outcome.reply.text,
            quick_replies: outcome.reply.quick_replies,
        }
    }

    /// Number of conversations currently waiting on an operator reply.
    pub async fn active_sessions(&self) -> usize {
        self.sessions.len().await
    }
}
