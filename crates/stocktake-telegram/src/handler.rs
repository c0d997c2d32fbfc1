// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message filtering and content extraction.
//!
//! Determines whether an incoming Telegram message should be processed
//! (private chats with a text body only) and maps it into a
//! channel-agnostic [`InboundMessage`]. Operator authorization is NOT
//! decided here; the conversation layer's access guard owns the
//! allow-list so the check lives in exactly one place.

use stocktake_core::types::{InboundMessage, MessageId, SenderId, SessionId};
use teloxide::prelude::*;
use teloxide::types::ChatKind;

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Extracts the text body, if any.
///
/// Photos, documents, stickers, and other non-text messages return `None`
/// and are ignored by the dispatcher.
pub fn extract_text(msg: &Message) -> Option<&str> {
    msg.text()
}

/// Converts a Telegram message and its text into an [`InboundMessage`].
///
/// The chat id becomes the session id, so replies route back to the same
/// chat, and the sender's numeric user id is what the access guard
/// matches against.
pub fn to_inbound_message(msg: &Message, text: &str) -> InboundMessage {
    let sender = msg
        .from
        .as_ref()
        .map(|u| u.id.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    InboundMessage {
        id: MessageId(msg.id.0.to_string()),
        session: SessionId(msg.chat.id.0.to_string()),
        sender: SenderId(sender),
        text: text.to_string(),
        timestamp: chrono::DateTime::to_rfc3339(&msg.date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock private chat message from JSON, matching Telegram Bot API structure.
    fn make_private_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": user_id as i64,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    /// Build a mock group chat message.
    fn make_group_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": -100123i64,
                "type": "supergroup",
                "title": "Test Group",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock group message")
    }

    #[test]
    fn is_dm_private_chat() {
        let msg = make_private_message(12345, "hello");
        assert!(is_dm(&msg));
    }

    #[test]
    fn is_dm_group_chat() {
        let msg = make_group_message(12345, "hello");
        assert!(!is_dm(&msg));
    }

    #[test]
    fn extract_text_returns_body() {
        let msg = make_private_message(12345, "hello world");
        assert_eq!(extract_text(&msg), Some("hello world"));
    }

    #[test]
    fn to_inbound_message_maps_fields() {
        let msg = make_private_message(12345, "/start");
        let inbound = to_inbound_message(&msg, "/start");

        assert_eq!(inbound.id, MessageId("1".into()));
        assert_eq!(inbound.session, SessionId("12345".into()));
        assert_eq!(inbound.sender, SenderId("12345".into()));
        assert_eq!(inbound.text, "/start");
        assert!(!inbound.timestamp.is_empty());
    }
}
