// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stocktake doctor` command implementation.
//!
//! Runs diagnostic checks against the configured adapters to identify
//! credential, connectivity, and ledger problems before `serve` is run.

use std::sync::Arc;
use std::time::Instant;

use stocktake_config::model::StocktakeConfig;
use stocktake_core::error::StocktakeError;
use stocktake_core::traits::{FileStore, PluginAdapter};
use stocktake_core::types::HealthStatus;
use stocktake_dropbox::DropboxStore;
use stocktake_ledger::LedgerStore;
use stocktake_telegram::TelegramChannel;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    message: String,
    millis: u128,
}

/// Run the `stocktake doctor` command.
///
/// Exits non-zero (via the returned error) if any check fails.
pub async fn run_doctor(config: &StocktakeConfig) -> Result<(), StocktakeError> {
    let mut results = Vec::new();

    results.push(check_allow_list(config));
    results.push(check_dropbox(config).await);
    results.push(check_ledger(config).await);
    results.push(check_telegram(config).await);

    println!();
    println!("  stocktake doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    for result in &results {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => {
                fail_count += 1;
                "[FAIL]"
            }
        };
        println!(
            "    {tag} {:<12} {} ({}ms)",
            result.name, result.message, result.millis
        );
    }
    println!();

    if fail_count > 0 {
        return Err(StocktakeError::Internal(format!(
            "{fail_count} diagnostic check(s) failed"
        )));
    }
    Ok(())
}

fn check_allow_list(config: &StocktakeConfig) -> CheckResult {
    let started = Instant::now();
    let (status, message) = if config.telegram.allowed_users.is_empty() {
        (
            CheckStatus::Warn,
            "allow-list is empty; every sender will be rejected".to_string(),
        )
    } else {
        (
            CheckStatus::Pass,
            format!("{} operator(s) allowed", config.telegram.allowed_users.len()),
        )
    };
    CheckResult {
        name: "allow-list",
        status,
        message,
        millis: started.elapsed().as_millis(),
    }
}

async fn check_dropbox(config: &StocktakeConfig) -> CheckResult {
    let started = Instant::now();
    let (status, message) = match DropboxStore::new(&config.dropbox) {
        Ok(store) => match store.health_check().await {
            Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "token accepted".to_string()),
            Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
            Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
            Err(e) => (CheckStatus::Fail, e.to_string()),
        },
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "dropbox",
        status,
        message,
        millis: started.elapsed().as_millis(),
    }
}

async fn check_ledger(config: &StocktakeConfig) -> CheckResult {
    let started = Instant::now();
    let (status, message) = match DropboxStore::new(&config.dropbox) {
        Ok(store) => {
            let ledger = LedgerStore::new(
                Arc::new(store) as Arc<dyn FileStore>,
                config.dropbox.ledger_path.clone(),
            );
            match ledger.load().await {
                Ok(table) => (
                    CheckStatus::Pass,
                    format!(
                        "{} row(s), {} unsold",
                        table.len(),
                        table.unsold().len()
                    ),
                ),
                Err(e) => (CheckStatus::Fail, e.to_string()),
            }
        }
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "ledger",
        status,
        message,
        millis: started.elapsed().as_millis(),
    }
}

async fn check_telegram(config: &StocktakeConfig) -> CheckResult {
    let started = Instant::now();
    let (status, message) = match TelegramChannel::new(&config.telegram) {
        Ok(channel) => match channel.health_check().await {
            Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "bot token accepted".to_string()),
            Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
            Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
            Err(e) => (CheckStatus::Fail, e.to_string()),
        },
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "telegram",
        status,
        message,
        millis: started.elapsed().as_millis(),
    }
}
