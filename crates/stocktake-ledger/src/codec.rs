// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV codec for the ledger file.
//!
//! Column order is fixed and part of the file format. Empty sell columns
//! mark an unsold record; the literal text "None" is never written.

use chrono::NaiveDate;
use stocktake_core::StocktakeError;

use crate::record::TransactionRecord;
use crate::table::LedgerTable;

/// Ledger column headers, in file order.
pub const COLUMNS: [&str; 8] = [
    "Index",
    "Serial Number",
    "Model",
    "Storage",
    "Purchase Price",
    "Sell Price",
    "Purchase Date",
    "Sell Date",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes ledger bytes into a table.
///
/// Fails with `CorruptLedger` on a missing or reordered header row, a
/// wrong field count, or an unparsable index or date.
pub fn decode(bytes: &[u8]) -> Result<LedgerTable, StocktakeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| StocktakeError::CorruptLedger(format!("unreadable header row: {e}")))?;
    if headers.iter().ne(COLUMNS) {
        return Err(StocktakeError::CorruptLedger(format!(
            "unexpected columns: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    }

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row =
            row.map_err(|e| StocktakeError::CorruptLedger(format!("row {}: {e}", line + 1)))?;
        records.push(decode_row(&row, line + 1)?);
    }

    Ok(LedgerTable::new(records))
}

fn decode_row(row: &csv::StringRecord, line: usize) -> Result<TransactionRecord, StocktakeError> {
    if row.len() != COLUMNS.len() {
        return Err(StocktakeError::CorruptLedger(format!(
            "row {line}: expected {} fields, got {}",
            COLUMNS.len(),
            row.len()
        )));
    }

    let field = |i: usize| row.get(i).unwrap_or_default();

    let index: u32 = field(0).parse().map_err(|_| {
        StocktakeError::CorruptLedger(format!("row {line}: bad index `{}`", field(0)))
    })?;

    let purchase_date = parse_date(field(6)).ok_or_else(|| {
        StocktakeError::CorruptLedger(format!("row {line}: bad purchase date `{}`", field(6)))
    })?;

    let sell_price = match field(5) {
        "" => None,
        price => Some(price.to_string()),
    };
    let sell_date = match field(7) {
        "" => None,
        raw => Some(parse_date(raw).ok_or_else(|| {
            StocktakeError::CorruptLedger(format!("row {line}: bad sell date `{raw}`"))
        })?),
    };

    Ok(TransactionRecord {
        index,
        serial_number: field(1).to_string(),
        model: field(2).to_string(),
        storage: field(3).to_string(),
        purchase_price: field(4).to_string(),
        purchase_date,
        sell_price,
        sell_date,
    })
}

/// Encodes the full table, header row first.
pub fn encode(table: &LedgerTable) -> Result<Vec<u8>, StocktakeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|e| StocktakeError::Internal(format!("csv header write failed: {e}")))?;

    for record in table.records() {
        writer
            .write_record([
                record.index.to_string(),
                record.serial_number.clone(),
                record.model.clone(),
                record.storage.clone(),
                record.purchase_price.clone(),
                record.sell_price.clone().unwrap_or_default(),
                format_date(record.purchase_date),
                record.sell_date.map(format_date).unwrap_or_default(),
            ])
            .map_err(|e| StocktakeError::Internal(format!("csv row write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| StocktakeError::Internal(format!("csv flush failed: {e}")))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
