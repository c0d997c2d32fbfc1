// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Each inbound message resumes exactly one pending step and runs it to
//! completion, including any ledger load/save, before the reply and the
//! next state are returned together. Terminal errors reply with the
//! problem and end the conversation; only an unrecognized action choice
//! re-prompts.

use std::sync::Arc;

use chrono::NaiveDate;
use stocktake_core::StocktakeError;
use stocktake_ledger::{BuyDraft, LedgerStore, SalePatch, TransactionRecord};
use tracing::{debug, warn};

use crate::session::{ConversationState, Session, UnsoldItem};

/// Menu label for the buy flow. Matching is a case-insensitive prefix
/// check so free-typed variants ("add buy", "Add Buy Entry") all work.
pub const BUY_CHOICE: &str = "Add buy entry";
/// Menu label for the sell flow.
pub const SELL_CHOICE: &str = "Add sell entry";

const MENU_PROMPT: &str = "What would you like to do?";
const BUY_FORMAT_PROMPT: &str = "Provide the entry as: Serial Number, Model, Storage, \
                                 Purchase Price, Purchase Date (T today, Y yesterday, MM-DD)";
const SELL_DETAILS_PROMPT: &str = "Provide the Sell Date and Sell Price (format: Date, Price):";
const NO_UNSOLD: &str = "No unsold products.";
const CANCELLED: &str = "Cancelled. Nothing was saved.";
const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";
const NOT_STARTED: &str = "Send /start to begin.";

/// An inbound message, classified by the transport's command conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The distinguished session-start command.
    Start,
    /// The distinguished abort command.
    Cancel,
    /// Any other text.
    Text(String),
}

impl Event {
    /// Classifies raw message text into an event.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("/start") {
            Event::Start
        } else if trimmed.eq_ignore_ascii_case("/cancel") {
            Event::Cancel
        } else {
            Event::Text(trimmed.to_string())
        }
    }
}

/// The reply produced by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReply {
    pub text: String,
    pub quick_replies: Vec<String>,
}

impl StepReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: Vec::new(),
        }
    }

    fn menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: vec![BUY_CHOICE.to_string(), SELL_CHOICE.to_string()],
        }
    }
}

/// The result of one step: a reply, and the session to keep waiting
/// (`None` ends the conversation).
#[derive(Debug)]
pub struct StepOutcome {
    pub reply: StepReply,
    pub next: Option<Session>,
}

impl StepOutcome {
    fn end(reply: StepReply) -> Self {
        Self { reply, next: None }
    }

    fn wait(reply: StepReply, session: Session) -> Self {
        Self {
            reply,
            next: Some(session),
        }
    }

    /// A terminal error: the problem is reported and the conversation ends.
    fn fail(err: StocktakeError) -> Self {
        Self::end(StepReply::text(format!("Error: {err}")))
    }
}

/// Drives one conversation step at a time against the injected ledger store.
pub struct ConversationMachine {
    ledger: Arc<LedgerStore>,
}

impl ConversationMachine {
    pub fn new(ledger: Arc<LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Runs one step: the current session (if any) plus one event produce
    /// a reply and the next session state.
    pub async fn step(
        &self,
        session: Option<Session>,
        event: Event,
        today: NaiveDate,
    ) -> StepOutcome {
        match event {
            Event::Start => {
                // A /start mid-conversation discards the old session.
                StepOutcome::wait(StepReply::menu(MENU_PROMPT), Session::new())
            }
            Event::Cancel => {
                if session.is_some() {
                    debug!("conversation cancelled by operator");
                    StepOutcome::end(StepReply::text(CANCELLED))
                } else {
                    StepOutcome::end(StepReply::text(NOTHING_TO_CANCEL))
                }
            }
            Event::Text(text) => match session {
                None => StepOutcome::end(StepReply::text(NOT_STARTED)),
                Some(session) => match session.state {
                    ConversationState::AwaitingActionChoice => {
                        self.handle_action_choice(session, &text).await
                    }
                    ConversationState::AwaitingBuyDetails => {
                        self.handle_buy_details(&text, today).await
                    }
                    ConversationState::AwaitingSellTarget => {
                        self.handle_sell_target(session, &text)
                    }
                    ConversationState::AwaitingSellDetails => {
                        self.handle_sell_details(session, &text, today).await
                    }
                },
            },
        }
    }

    async fn handle_action_choice(&self, session: Session, text: &str) -> StepOutcome {
        let choice = text.to_ascii_lowercase();
        if choice.starts_with("add buy") {
            let next = Session {
                state: ConversationState::AwaitingBuyDetails,
                ..session
            };
            return StepOutcome::wait(StepReply::text(BUY_FORMAT_PROMPT), next);
        }
        if choice.starts_with("add sell") {
            return self.begin_sell_flow(session).await;
        }

        // Unrecognized choice: re-prompt the same state instead of dropping
        // the message on the floor.
        StepOutcome::wait(
            StepReply::menu(format!(
                "Please choose `{BUY_CHOICE}` or `{SELL_CHOICE}`."
            )),
            session,
        )
    }

    /// Loads the ledger, snapshots the unsold subset, and sends the
    /// numbered list. Each entry is numbered by its stored ledger index,
    /// and the same index resolves the operator's later choice.
    async fn begin_sell_flow(&self, session: Session) -> StepOutcome {
        let table = match self.ledger.load().await {
            Ok(table) => table,
            Err(err) => return StepOutcome::fail(err),
        };

        let unsold: Vec<UnsoldItem> = table
            .unsold()
            .into_iter()
            .map(|r| UnsoldItem {
                index: r.index,
                line: unsold_line(r),
            })
            .collect();

        if unsold.is_empty() {
            return StepOutcome::end(StepReply::text(NO_UNSOLD));
        }

        let listing = unsold
            .iter()
            .map(|item| item.line.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let next = Session {
            state: ConversationState::AwaitingSellTarget,
            unsold_snapshot: unsold,
            ..session
        };
        StepOutcome::wait(
            StepReply::text(format!(
                "Which product was sold?\n{listing}\nReply with the product number."
            )),
            next,
        )
    }

    async fn handle_buy_details(&self, text: &str, today: NaiveDate) -> StepOutcome {
        let fields = split_fields(text);
        if fields.len() != 5 {
            return StepOutcome::fail(StocktakeError::InvalidEntryFormat {
                expected: 5,
                got: fields.len(),
            });
        }

        let purchase_date = match stocktake_ledger::dates::normalize(&fields[4], today) {
            Ok(date) => date,
            Err(err) => return StepOutcome::fail(err),
        };

        let draft = BuyDraft {
            serial_number: fields[0].clone(),
            model: fields[1].clone(),
            storage: fields[2].clone(),
            purchase_price: fields[3].clone(),
            purchase_date,
        };

        // Full load -> append -> save cycle. There is no lock on the remote
        // file; a concurrent buy in another chat can still win the overwrite.
        let saved = async {
            let mut table = self.ledger.load().await?;
            let record = table.append(draft).clone();
            self.ledger.save(&table).await?;
            Ok::<_, StocktakeError>(record)
        }
        .await;

        match saved {
            Ok(record) => {
                debug!(index = record.index, "buy entry appended");
                StepOutcome::end(StepReply::text(format!(
                    "Buy entry added successfully! Here are the details:\n\n\
                     Serial Number: {}\nModel: {}\nStorage: {}\n\
                     Purchase Price: {}\nPurchase Date: {}",
                    record.serial_number,
                    record.model,
                    record.storage,
                    record.purchase_price,
                    record.purchase_date.format("%Y-%m-%d"),
                )))
            }
            Err(err) => {
                warn!(error = %err, "buy entry failed");
                StepOutcome::fail(err)
            }
        }
    }

    fn handle_sell_target(&self, session: Session, text: &str) -> StepOutcome {
        let Ok(index) = text.trim().parse::<u32>() else {
            return StepOutcome::fail(StocktakeError::InvalidSelection(text.trim().to_string()));
        };
        if !session.unsold_snapshot.iter().any(|item| item.index == index) {
            return StepOutcome::fail(StocktakeError::InvalidSelection(index.to_string()));
        }

        let next = Session {
            state: ConversationState::AwaitingSellDetails,
            selected_index: Some(index),
            ..session
        };
        StepOutcome::wait(StepReply::text(SELL_DETAILS_PROMPT), next)
    }

    async fn handle_sell_details(
        &self,
        session: Session,
        text: &str,
        today: NaiveDate,
    ) -> StepOutcome {
        let fields = split_fields(text);
        if fields.len() != 2 {
            return StepOutcome::fail(StocktakeError::InvalidEntryFormat {
                expected: 2,
                got: fields.len(),
            });
        }

        let sell_date = match stocktake_ledger::dates::normalize(&fields[0], today) {
            Ok(date) => date,
            Err(err) => return StepOutcome::fail(err),
        };

        let Some(index) = session.selected_index else {
            return StepOutcome::fail(StocktakeError::Internal(
                "sell details received with no selected product".into(),
            ));
        };

        // The snapshot is display-only and may be stale; reload so a buy
        // entry appended meanwhile is not clobbered by the overwrite.
        let patch = SalePatch {
            sell_date,
            sell_price: fields[1].clone(),
        };
        let saved = async {
            let mut table = self.ledger.load().await?;
            let record = table.fill_sale(index, patch)?.clone();
            self.ledger.save(&table).await?;
            Ok::<_, StocktakeError>(record)
        }
        .await;

        match saved {
            Ok(record) => {
                debug!(index = record.index, "sell entry recorded");
                StepOutcome::end(StepReply::text(sell_confirmation(&record)))
            }
            Err(err) => {
                warn!(error = %err, "sell entry failed");
                StepOutcome::fail(err)
            }
        }
    }
}

/// Splits a reply into trimmed comma-separated fields.
fn split_fields(text: &str) -> Vec<String> {
    text.split(',').map(|f| f.trim().to_string()).collect()
}

/// One line of the numbered unsold listing, led by the stored index.
fn unsold_line(record: &TransactionRecord) -> String {
    format!(
        "{}. {} {} {} (bought {} for {})",
        record.index,
        record.serial_number,
        record.model,
        record.storage,
        record.purchase_date.format("%Y-%m-%d"),
        record.purchase_price,
    )
}

fn sell_confirmation(record: &TransactionRecord) -> String {
    format!(
        "Sell entry updated successfully! Here are the details:\n\n\
         Serial Number: {}\nModel: {}\nStorage: {}\n\
         Purchase Price: {}\nPurchase Date: {}\n\
         Sell Price: {}\nSell Date: {}",
        record.serial_number,
        record.model,
        record.storage,
        record.purchase_price,
        record.purchase_date.format("%Y-%m-%d"),
        record.sell_price.as_deref().unwrap_or_default(),
        record
            .sell_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    )
}
