// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Stocktake workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session (one per chat).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Identifier of the human operator behind a message, as reported by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    FileStore,
}

/// An inbound text message received from a channel adapter.
///
/// The channel tags each message with the chat it arrived in (`session`)
/// and the operator who sent it (`sender`). Messages for one session are
/// delivered in arrival order.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: MessageId,
    pub session: SessionId,
    pub sender: SenderId,
    pub text: String,
    /// RFC 3339 arrival timestamp from the channel.
    pub timestamp: String,
}

/// An outbound text reply to be sent via a channel adapter.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub session: SessionId,
    pub text: String,
    /// Single-use quick-reply options. Channels that cannot render them
    /// fall back to plain text.
    pub quick_replies: Vec<String>,
}

impl OutboundMessage {
    /// A plain text reply with no quick-reply options.
    pub fn text(session: SessionId, text: impl Into<String>) -> Self {
        Self {
            session,
            text: text.into(),
            quick_replies: Vec::new(),
        }
    }

    /// A reply offering single-use quick-reply options.
    pub fn with_quick_replies(
        session: SessionId,
        text: impl Into<String>,
        quick_replies: Vec<String>,
    ) -> Self {
        Self {
            session,
            text: text.into(),
            quick_replies,
        }
    }
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_quick_replies: bool,
    pub max_message_length: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn adapter_type_round_trips_through_display() {
        for variant in [AdapterType::Channel, AdapterType::FileStore] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn session_and_sender_ids_compare_by_value() {
        let a = SessionId("chat-1".into());
        let b = SessionId("chat-1".into());
        assert_eq!(a, b);
        assert_ne!(a, SessionId("chat-2".into()));

        let s = SenderId("42".into());
        assert_eq!(s.clone(), s);
    }

    #[test]
    fn outbound_text_has_no_quick_replies() {
        let msg = OutboundMessage::text(SessionId("c".into()), "hello");
        assert!(msg.quick_replies.is_empty());
        assert_eq!(msg.text, "hello");
    }

    #[test]
    fn outbound_with_quick_replies_keeps_order() {
        let msg = OutboundMessage::with_quick_replies(
            SessionId("c".into()),
            "pick one",
            vec!["Add buy entry".into(), "Add sell entry".into()],
        );
        assert_eq!(msg.quick_replies.len(), 2);
        assert_eq!(msg.quick_replies[0], "Add buy entry");
    }
}
