// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Stocktake ledger bot.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide,
//! providing long polling, DM-only message filtering, and one-time reply
//! keyboards for quick-reply options.

pub mod handler;

use async_trait::async_trait;
use stocktake_config::model::TelegramConfig;
use stocktake_core::error::StocktakeError;
use stocktake_core::traits::{ChannelAdapter, PluginAdapter};
use stocktake_core::types::{
    AdapterType, ChannelCapabilities, HealthStatus, InboundMessage, MessageId, OutboundMessage,
};
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup, Recipient, ReplyMarkup};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects to Telegram via long polling and filters messages down to
/// text sent in private chats. Authorization is left to the conversation
/// layer's access guard.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, StocktakeError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            StocktakeError::Config("telegram.bot_token is required for Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(StocktakeError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, StocktakeError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), StocktakeError> {
        debug!("Telegram channel shutting down");
        // The polling handle will be dropped when TelegramChannel is dropped,
        // which aborts the task. For graceful shutdown, the serve loop should
        // stop calling receive() first.
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_quick_replies: true,
            max_message_length: Some(4096),
        }
    }

    async fn connect(&mut self) -> Result<(), StocktakeError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    // Filter: DMs only
                    if !handler::is_dm(&msg) {
                        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                        return respond(());
                    }

                    // Filter: text messages only
                    let Some(text) = handler::extract_text(&msg) else {
                        debug!(msg_id = msg.id.0, "ignoring non-text message");
                        return respond(());
                    };

                    let inbound = handler::to_inbound_message(&msg, text);
                    if tx.send(inbound).await.is_err() {
                        warn!("inbound channel closed, dropping message");
                    }

                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {}) // Silently ignore non-message updates
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, StocktakeError> {
        let chat_id = parse_chat_id(&msg)?;

        let mut request = self.bot.send_message(Recipient::Id(chat_id), &msg.text);
        if !msg.quick_replies.is_empty() {
            request = request.reply_markup(ReplyMarkup::Keyboard(quick_reply_keyboard(
                &msg.quick_replies,
            )));
        }

        let sent = request.await.map_err(|e| StocktakeError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(sent.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundMessage, StocktakeError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| StocktakeError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}

/// Builds a one-time reply keyboard with one button per option.
fn quick_reply_keyboard(options: &[String]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = options
        .iter()
        .map(|option| vec![KeyboardButton::new(option)])
        .collect();
    KeyboardMarkup::new(rows).one_time_keyboard().resize_keyboard()
}

/// Parses the outbound session id back into a Telegram chat id.
fn parse_chat_id(msg: &OutboundMessage) -> Result<ChatId, StocktakeError> {
    msg.session
        .0
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| StocktakeError::Channel {
            message: format!("outbound session `{}` is not a Telegram chat id", msg.session.0),
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use stocktake_core::types::SessionId;

    use super::*;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(Into::into),
            allowed_users: vec!["12345".into()],
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramChannel::new(&config(None)).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramChannel::new(&config(Some(""))).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let channel =
            TelegramChannel::new(&config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")));
        assert!(channel.is_ok());
    }

    #[test]
    fn capabilities_are_correct() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        let caps = channel.capabilities();
        assert!(caps.supports_quick_replies);
        assert_eq!(caps.max_message_length, Some(4096));
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[test]
    fn parse_chat_id_accepts_numeric_session() {
        let msg = OutboundMessage::text(SessionId("12345".into()), "hello");
        assert_eq!(parse_chat_id(&msg).unwrap(), ChatId(12345));
    }

    #[test]
    fn parse_chat_id_rejects_non_numeric_session() {
        let msg = OutboundMessage::text(SessionId("not-a-chat".into()), "hello");
        assert!(parse_chat_id(&msg).is_err());
    }

    #[test]
    fn quick_reply_keyboard_one_button_per_row() {
        let keyboard =
            quick_reply_keyboard(&["Add buy entry".to_string(), "Add sell entry".to_string()]);
        assert_eq!(keyboard.keyboard.len(), 2);
        assert_eq!(keyboard.keyboard[0].len(), 1);
        assert_eq!(keyboard.keyboard[0][0].text, "Add buy entry");

        // The wire form must mark the keyboard single-use.
        let wire = serde_json::to_value(&keyboard).unwrap();
        assert_eq!(wire["one_time_keyboard"], serde_json::json!(true));
    }
}
