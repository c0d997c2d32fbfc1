// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction record model.
//!
//! A record is created by a buy entry and mutated at most once by a sell
//! entry. The sale always fills both sell fields together, so a record is
//! either fully unsold (both `None`) or fully sold (both `Some`).

use chrono::NaiveDate;

/// One row of the transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// 1-based sequence position, assigned at creation, never reused.
    pub index: u32,
    /// Operator-supplied unit identifier, free-form.
    pub serial_number: String,
    pub model: String,
    pub storage: String,
    /// Decimal text, preserved verbatim as the operator typed it.
    pub purchase_price: String,
    pub purchase_date: NaiveDate,
    pub sell_price: Option<String>,
    pub sell_date: Option<NaiveDate>,
}

impl TransactionRecord {
    /// True when both sell fields are empty.
    pub fn is_unsold(&self) -> bool {
        self.sell_price.is_none() && self.sell_date.is_none()
    }

    /// True when both sell fields are filled.
    pub fn is_sold(&self) -> bool {
        self.sell_price.is_some() && self.sell_date.is_some()
    }
}

/// The operator-supplied fields of a new buy entry, before an index is assigned.
#[derive(Debug, Clone)]
pub struct BuyDraft {
    pub serial_number: String,
    pub model: String,
    pub storage: String,
    pub purchase_price: String,
    pub purchase_date: NaiveDate,
}

/// The two fields a sell entry fills in on an existing record.
#[derive(Debug, Clone)]
pub struct SalePatch {
    pub sell_date: NaiveDate,
    pub sell_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sell_price: Option<&str>, sell_date: Option<NaiveDate>) -> TransactionRecord {
        TransactionRecord {
            index: 1,
            serial_number: "SN-1".into(),
            model: "iPhone13".into(),
            storage: "128GB".into(),
            purchase_price: "500".into(),
            purchase_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            sell_price: sell_price.map(Into::into),
            sell_date,
        }
    }

    #[test]
    fn fresh_record_is_unsold() {
        let r = record(None, None);
        assert!(r.is_unsold());
        assert!(!r.is_sold());
    }

    #[test]
    fn record_with_both_sell_fields_is_sold() {
        let r = record(Some("450"), NaiveDate::from_ymd_opt(2026, 8, 5));
        assert!(r.is_sold());
        assert!(!r.is_unsold());
    }
}
