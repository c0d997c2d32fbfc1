// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Stocktake pipeline.
//!
//! Each test wires a ConversationRouter to mock adapters and pumps
//! messages through the same receive -> dispatch -> send cycle the serve
//! loop runs. Tests are independent and order-insensitive.

use std::sync::Arc;

use stocktake_conversation::{AccessGuard, ConversationRouter};
use stocktake_core::traits::ChannelAdapter;
use stocktake_ledger::{codec, BuyDraft, LedgerStore, LedgerTable};
use stocktake_test_utils::{MemoryFileStore, MockChannel};

const PATH: &str = "/stocktake/ledger.csv";
const OPERATOR: &str = "42";
const CHAT: &str = "42";

struct Pipeline {
    channel: MockChannel,
    router: ConversationRouter,
    store: Arc<MemoryFileStore>,
}

impl Pipeline {
    fn new(allowed: &[&str]) -> Self {
        let store = Arc::new(MemoryFileStore::new());
        let ledger = Arc::new(LedgerStore::new(store.clone(), PATH));
        let guard = AccessGuard::new(allowed.iter().map(|s| s.to_string()));
        Self {
            channel: MockChannel::new(),
            router: ConversationRouter::new(guard, ledger),
            store,
        }
    }

    /// Sends one operator message through the full receive -> dispatch ->
    /// send cycle and returns the bot's reply text.
    async fn exchange(&self, sender: &str, text: &str) -> String {
        self.channel.inject_text(CHAT, sender, text).await;
        let inbound = self.channel.receive().await.unwrap();
        let reply = self.router.handle(inbound).await;
        self.channel.send(reply).await.unwrap();
        self.channel.sent_messages().await.last().unwrap().text.clone()
    }

    async fn ledger_table(&self) -> LedgerTable {
        codec::decode(&self.store.get(PATH).await.unwrap()).unwrap()
    }

    async fn seed_unsold(&self, serial: &str) {
        let mut table = LedgerTable::default();
        table.append(BuyDraft {
            serial_number: serial.into(),
            model: "iPhone13".into(),
            storage: "128GB".into(),
            purchase_price: "500".into(),
            purchase_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        });
        self.store.put(PATH, codec::encode(&table).unwrap()).await;
    }
}

// ---- Buy flow ----

#[tokio::test]
async fn buy_flow_records_one_row_on_empty_ledger() {
    let pipeline = Pipeline::new(&[OPERATOR]);

    let menu = pipeline.exchange(OPERATOR, "/start").await;
    assert!(menu.contains("What would you like to do?"));

    let prompt = pipeline.exchange(OPERATOR, "Add buy entry").await;
    assert!(prompt.contains("Serial Number"));

    let confirmation = pipeline
        .exchange(OPERATOR, "ABC123, iPhone13, 128GB, 500, T")
        .await;
    assert!(confirmation.contains("Buy entry added successfully!"));
    for echoed in ["ABC123", "iPhone13", "128GB", "500"] {
        assert!(confirmation.contains(echoed), "missing {echoed}");
    }

    let table = pipeline.ledger_table().await;
    assert_eq!(table.len(), 1);
    let record = table.get(1).unwrap();
    assert_eq!(record.serial_number, "ABC123");
    assert_eq!(record.purchase_date, chrono::Local::now().date_naive());
    assert!(record.is_unsold());
}

#[tokio::test]
async fn menu_reply_offers_exactly_two_quick_replies() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.exchange(OPERATOR, "/start").await;

    let sent = pipeline.channel.sent_messages().await;
    assert_eq!(sent[0].quick_replies.len(), 2);
    assert_eq!(sent[0].quick_replies[0], "Add buy entry");
    assert_eq!(sent[0].quick_replies[1], "Add sell entry");
}

#[tokio::test]
async fn malformed_buy_entry_ends_conversation_without_write() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.exchange(OPERATOR, "/start").await;
    pipeline.exchange(OPERATOR, "Add buy entry").await;

    let reply = pipeline.exchange(OPERATOR, "only, three, fields").await;
    assert!(reply.starts_with("Error:"));
    assert_eq!(pipeline.store.store_calls().await, 0);
    assert_eq!(pipeline.router.active_sessions().await, 0);
}

// ---- Sell flow ----

#[tokio::test]
async fn sell_flow_fills_sell_fields_and_returns_to_idle() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.seed_unsold("ABC123").await;

    pipeline.exchange(OPERATOR, "/start").await;
    let listing = pipeline.exchange(OPERATOR, "Add sell entry").await;
    assert!(listing.contains("1. ABC123 iPhone13 128GB"));

    let prompt = pipeline.exchange(OPERATOR, "1").await;
    assert!(prompt.contains("Sell Date and Sell Price"));

    let confirmation = pipeline.exchange(OPERATOR, "T, 450").await;
    assert!(confirmation.contains("Sell entry updated successfully!"));
    assert!(confirmation.contains("Sell Price: 450"));

    let table = pipeline.ledger_table().await;
    let record = table.get(1).unwrap();
    assert!(record.is_sold());
    assert_eq!(record.sell_price.as_deref(), Some("450"));
    assert_eq!(record.sell_date, Some(chrono::Local::now().date_naive()));
    assert_eq!(pipeline.router.active_sessions().await, 0);
}

#[tokio::test]
async fn sell_flow_with_no_unsold_products_ends_immediately() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.exchange(OPERATOR, "/start").await;

    let reply = pipeline.exchange(OPERATOR, "Add sell entry").await;
    assert_eq!(reply, "No unsold products.");
    assert_eq!(pipeline.router.active_sessions().await, 0);
}

#[tokio::test]
async fn sell_selection_outside_listing_ends_conversation() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.seed_unsold("ABC123").await;

    pipeline.exchange(OPERATOR, "/start").await;
    pipeline.exchange(OPERATOR, "Add sell entry").await;
    let reply = pipeline.exchange(OPERATOR, "99").await;

    assert!(reply.starts_with("Error:"));
    assert_eq!(pipeline.router.active_sessions().await, 0);
    assert!(pipeline.ledger_table().await.get(1).unwrap().is_unsold());
}

// ---- Guard and cancellation ----

#[tokio::test]
async fn denied_sender_never_reaches_the_store() {
    let pipeline = Pipeline::new(&[OPERATOR]);

    let reply = pipeline.exchange("9999", "/start").await;
    assert!(reply.contains("not authorized"));

    let reply = pipeline.exchange("9999", "Add sell entry").await;
    assert!(reply.contains("not authorized"));

    assert_eq!(pipeline.store.fetch_calls().await, 0);
    assert_eq!(pipeline.store.store_calls().await, 0);
    assert_eq!(pipeline.router.active_sessions().await, 0);
}

#[tokio::test]
async fn cancel_mid_flow_discards_session_and_ledger_is_untouched() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.exchange(OPERATOR, "/start").await;
    pipeline.exchange(OPERATOR, "Add buy entry").await;

    let reply = pipeline.exchange(OPERATOR, "/cancel").await;
    assert!(reply.contains("Cancelled"));
    assert_eq!(pipeline.router.active_sessions().await, 0);
    assert_eq!(pipeline.store.store_calls().await, 0);

    // A later /start opens a fresh conversation.
    let menu = pipeline.exchange(OPERATOR, "/start").await;
    assert!(menu.contains("What would you like to do?"));
}

#[tokio::test]
async fn unknown_menu_choice_reprompts_and_flow_still_completes() {
    let pipeline = Pipeline::new(&[OPERATOR]);
    pipeline.exchange(OPERATOR, "/start").await;

    let reprompt = pipeline.exchange(OPERATOR, "do something else").await;
    assert!(reprompt.contains("Add buy entry"));
    assert_eq!(pipeline.router.active_sessions().await, 1);

    pipeline.exchange(OPERATOR, "Add buy entry").await;
    let confirmation = pipeline
        .exchange(OPERATOR, "XYZ789, iPhone14, 256GB, 650, Y")
        .await;
    assert!(confirmation.contains("Buy entry added successfully!"));

    let table = pipeline.ledger_table().await;
    let expected = chrono::Local::now().date_naive().pred_opt().unwrap();
    assert_eq!(table.get(1).unwrap().purchase_date, expected);
}
