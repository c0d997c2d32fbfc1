// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stocktake serve` command implementation.
//!
//! Wires the Dropbox file store, the ledger, the conversation router, and
//! the Telegram channel together, then runs the receive -> dispatch -> send
//! loop until a shutdown signal arrives.

use std::sync::Arc;

use stocktake_config::model::StocktakeConfig;
use stocktake_conversation::{AccessGuard, ConversationRouter};
use stocktake_core::error::StocktakeError;
use stocktake_core::traits::{ChannelAdapter, FileStore, PluginAdapter};
use stocktake_dropbox::DropboxStore;
use stocktake_ledger::LedgerStore;
use stocktake_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the `stocktake serve` command.
///
/// Each inbound message is dispatched to completion before the next one
/// is received, so a conversation step's full load -> validate -> save
/// cycle never interleaves with another message for the same chat.
pub async fn run_serve(config: StocktakeConfig) -> Result<(), StocktakeError> {
    init_tracing(&config.agent.log_level);

    info!(name = %config.agent.name, "starting stocktake serve");

    if config.telegram.allowed_users.is_empty() {
        warn!("telegram.allowed_users is empty; every sender will be rejected");
    }

    // Initialize the remote file store and the ledger on top of it.
    let store: Arc<DropboxStore> = Arc::new(DropboxStore::new(&config.dropbox).map_err(|e| {
        error!(error = %e, "failed to initialize Dropbox store");
        eprintln!(
            "error: Dropbox access token required. Set dropbox.access_token in stocktake.toml \
             or the STOCKTAKE_DROPBOX_ACCESS_TOKEN environment variable."
        );
        e
    })?);
    let ledger = Arc::new(LedgerStore::new(
        store.clone() as Arc<dyn FileStore>,
        config.dropbox.ledger_path.clone(),
    ));
    info!(path = %config.dropbox.ledger_path, "ledger store initialized");

    // Compose guard and state machine into the per-message router.
    let guard = AccessGuard::new(config.telegram.allowed_users.clone());
    let router = ConversationRouter::new(guard, ledger);

    // Connect the Telegram channel.
    let mut channel = TelegramChannel::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token in stocktake.toml \
             or the STOCKTAKE_TELEGRAM_BOT_TOKEN environment variable."
        );
        e
    })?;
    channel.connect().await?;
    info!("telegram channel connected, waiting for messages");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            inbound = channel.receive() => {
                let inbound = inbound?;
                let reply = router.handle(inbound).await;
                if let Err(e) = channel.send(reply).await {
                    // The step already completed against the ledger; only
                    // the confirmation was lost.
                    error!(error = %e, "failed to deliver reply");
                }
            }
        }
    }

    channel.shutdown().await?;
    store.shutdown().await?;
    info!("stocktake serve stopped");
    Ok(())
}

/// Initializes the tracing subscriber from config (RUST_LOG overrides).
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stocktake={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
