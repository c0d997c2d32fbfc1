// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation layer for the Stocktake bot.
//!
//! Drives multi-step data entry over disconnected chat messages: a
//! per-session finite-state machine ([`machine::ConversationMachine`]),
//! the ephemeral session store, and the allow-list guard, composed by
//! [`ConversationRouter`] into the single per-message entry point.

pub mod guard;
pub mod machine;
pub mod router;
pub mod session;

pub use guard::{Access, AccessGuard};
pub use machine::{ConversationMachine, Event, StepOutcome, StepReply};
pub use router::ConversationRouter;
pub use session::{ConversationState, Session, SessionStore, UnsoldItem};
