// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered in-memory ledger table and its pure transformation helpers.

use stocktake_core::StocktakeError;

use crate::record::{BuyDraft, SalePatch, TransactionRecord};

/// The ordered sequence of all transaction records, held in memory for the
/// duration of one load -> transform -> save cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTable {
    records: Vec<TransactionRecord>,
}

impl LedgerTable {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with the given 1-based index, if present.
    pub fn get(&self, index: u32) -> Option<&TransactionRecord> {
        self.records.iter().find(|r| r.index == index)
    }

    /// Appends a new record from a buy draft, assigning `index = len + 1`.
    pub fn append(&mut self, draft: BuyDraft) -> &TransactionRecord {
        let index = self.records.len() as u32 + 1;
        self.records.push(TransactionRecord {
            index,
            serial_number: draft.serial_number,
            model: draft.model,
            storage: draft.storage,
            purchase_price: draft.purchase_price,
            purchase_date: draft.purchase_date,
            sell_price: None,
            sell_date: None,
        });
        self.records.last().expect("just pushed")
    }

    /// Fills both sell fields on the record with the given index.
    ///
    /// All other records are left untouched.
    pub fn fill_sale(
        &mut self,
        index: u32,
        patch: SalePatch,
    ) -> Result<&TransactionRecord, StocktakeError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.index == index)
            .ok_or(StocktakeError::IndexNotFound(index))?;
        record.sell_date = Some(patch.sell_date);
        record.sell_price = Some(patch.sell_price);
        Ok(record)
    }

    /// Returns the records with both sell fields empty, in ledger order.
    pub fn unsold(&self) -> Vec<&TransactionRecord> {
        self.records.iter().filter(|r| r.is_unsold()).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(serial: &str) -> BuyDraft {
        BuyDraft {
            serial_number: serial.into(),
            model: "iPhone13".into(),
            storage: "128GB".into(),
            purchase_price: "500".into(),
            purchase_date: date(2026, 8, 1),
        }
    }

    #[test]
    fn append_assigns_sequential_indexes() {
        let mut table = LedgerTable::default();
        assert_eq!(table.append(draft("A")).index, 1);
        assert_eq!(table.append(draft("B")).index, 2);
        assert_eq!(table.append(draft("C")).index, 3);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn appended_record_starts_unsold() {
        let mut table = LedgerTable::default();
        let record = table.append(draft("A"));
        assert!(record.is_unsold());
    }

    #[test]
    fn fill_sale_sets_both_fields_and_leaves_other_rows_unchanged() {
        let mut table = LedgerTable::default();
        table.append(draft("A"));
        table.append(draft("B"));
        let before_b = table.get(2).unwrap().clone();

        let sold = table
            .fill_sale(
                1,
                SalePatch {
                    sell_date: date(2026, 8, 5),
                    sell_price: "450".into(),
                },
            )
            .unwrap();
        assert!(sold.is_sold());
        assert_eq!(sold.sell_price.as_deref(), Some("450"));
        assert_eq!(sold.sell_date, Some(date(2026, 8, 5)));

        assert_eq!(table.get(2).unwrap(), &before_b);
    }

    #[test]
    fn fill_sale_unknown_index_fails() {
        let mut table = LedgerTable::default();
        table.append(draft("A"));
        let err = table
            .fill_sale(
                9,
                SalePatch {
                    sell_date: date(2026, 8, 5),
                    sell_price: "450".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StocktakeError::IndexNotFound(9)));
    }

    #[test]
    fn unsold_excludes_sold_records() {
        let mut table = LedgerTable::default();
        table.append(draft("A"));
        table.append(draft("B"));
        table
            .fill_sale(
                1,
                SalePatch {
                    sell_date: date(2026, 8, 5),
                    sell_price: "450".into(),
                },
            )
            .unwrap();

        let unsold = table.unsold();
        assert_eq!(unsold.len(), 1);
        assert_eq!(unsold[0].index, 2);
    }
}
