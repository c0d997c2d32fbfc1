// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shorthand date normalization for operator input.
//!
//! Operators type dates as `T` (today), `Y` (yesterday), `MM-DD`, or a
//! full `YYYY-MM-DD`. `MM-DD` is read in the current year, including near
//! year boundaries ("12-31" typed in January records the current year).

use chrono::{Datelike, NaiveDate};
use stocktake_core::StocktakeError;

/// Normalizes a raw operator-typed date against `today`.
pub fn normalize(raw: &str, today: NaiveDate) -> Result<NaiveDate, StocktakeError> {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("t") {
        return Ok(today);
    }

    if trimmed.eq_ignore_ascii_case("y") {
        return today
            .pred_opt()
            .ok_or_else(|| StocktakeError::InvalidDateFormat(trimmed.to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Some((month, day)) = parse_month_day(trimmed) {
        return NaiveDate::from_ymd_opt(today.year(), month, day)
            .ok_or_else(|| StocktakeError::InvalidDateFormat(trimmed.to_string()));
    }

    Err(StocktakeError::InvalidDateFormat(trimmed.to_string()))
}

/// Splits `MM-DD` into its numeric parts. Returns `None` for any other shape.
fn parse_month_day(s: &str) -> Option<(u32, u32)> {
    let (m, d) = s.split_once('-')?;
    if m.is_empty() || d.is_empty() || m.len() > 2 || d.len() > 2 {
        return None;
    }
    if !m.bytes().all(|b| b.is_ascii_digit()) || !d.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((m.parse().ok()?, d.parse().ok()?))
}
