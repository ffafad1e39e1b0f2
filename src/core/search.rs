//! Transaction history search
//!
//! Free-text search input is classified into a typed criterion before any
//! store is queried. Classification is tried strictly in this order:
//!
//! 1. No input: every transaction of the asset.
//! 2. A numeric literal: an exact amount. `"100.50"` is `$100.50`, while a
//!    bare number is a count of cents, so `"50"` is `$0.50`. A literal too
//!    large to hold as an amount still counts as one and matches nothing.
//! 3. An ISO `YYYY-MM-DD` date: the 24 hours starting at midnight.
//! 4. Anything else: text matched against notes, the counterparty id, and
//!    the status name.
//!
//! Numbers are tried before dates so that a date is never read as a number;
//! the numeric grammar does not admit `-`, so dates always fall through.

use crate::types::{CurrencyValue, FinancialTransaction};
use chrono::{NaiveDate, NaiveDateTime};

/// Typed search criterion produced from free-text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// No constraint
    None,
    /// Exact transaction amount
    Amount(CurrencyValue),
    /// Numeric literal outside the representable range; matches nothing
    AmountOutOfRange(String),
    /// Status time within `[start, end)`
    DateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Free-text match
    Text(String),
}

impl SearchCriteria {
    /// Classify free-text search input
    pub fn classify(search: Option<&str>) -> Self {
        let Some(text) = search else {
            return SearchCriteria::None;
        };

        if is_amount_literal(text) {
            return match parse_amount_literal(text) {
                Some(amount) => SearchCriteria::Amount(amount),
                None => SearchCriteria::AmountOutOfRange(text.to_string()),
            };
        }

        if let Some((start, end)) = parse_day_range(text) {
            return SearchCriteria::DateRange { start, end };
        }

        SearchCriteria::Text(text.to_string())
    }

    /// Short name of the criterion kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            SearchCriteria::None => "none",
            SearchCriteria::Amount(_) | SearchCriteria::AmountOutOfRange(_) => "amount",
            SearchCriteria::DateRange { .. } => "date",
            SearchCriteria::Text(_) => "text",
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Whether the text is `digits` or `digits.digits` with a 1-2 digit fraction
fn is_amount_literal(text: &str) -> bool {
    match text.split_once('.') {
        Some((dollars, cents)) => is_digits(dollars) && is_digits(cents) && cents.len() <= 2,
        None => is_digits(text),
    }
}

/// Value of an amount literal, `None` if it does not fit
///
/// The cents part is read as an integer, so `"3.5"` is three dollars and
/// five cents. A bare number is a count of cents and carries into dollars
/// at 100, so `"250"` is `$2.50` and can match a stored amount.
fn parse_amount_literal(text: &str) -> Option<CurrencyValue> {
    match text.split_once('.') {
        Some((dollars, cents)) => {
            let dollars = dollars.parse::<i64>().ok()?;
            let cents = cents.parse::<u8>().ok()?;
            CurrencyValue::new(dollars, cents, false).ok()
        }
        None => text.parse::<i64>().ok().map(CurrencyValue::from_cents),
    }
}

/// Parse a strict `YYYY-MM-DD` date into the day it covers
fn parse_day_range(text: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && is_digits(&text[0..4])
        && is_digits(&text[5..7])
        && is_digits(&text[8..10]);
    if !shaped {
        return None;
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    let start = date.and_hms_opt(0, 0, 0)?;
    let end = date.succ_opt()?.and_hms_opt(0, 0, 0)?;
    Some((start, end))
}

/// History filter: one asset plus a classified criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    pub asset_id: String,
    pub criteria: SearchCriteria,
}

impl TransactionFilter {
    pub fn new(asset_id: &str, criteria: SearchCriteria) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            criteria,
        }
    }

    /// Whether a transaction belongs to this filter's result set
    ///
    /// The asset must be the source or the target. Text matches notes
    /// case-insensitively, the counterparty id exactly, or the status name
    /// exactly.
    pub fn matches(&self, tx: &FinancialTransaction) -> bool {
        if !tx.involves(&self.asset_id) {
            return false;
        }

        match &self.criteria {
            SearchCriteria::None => true,
            SearchCriteria::Amount(amount) => tx.amount == *amount,
            SearchCriteria::AmountOutOfRange(_) => false,
            SearchCriteria::DateRange { start, end } => {
                tx.status_time >= *start && tx.status_time < *end
            }
            SearchCriteria::Text(text) => {
                let needle = text.to_lowercase();
                let in_notes = tx
                    .notes
                    .as_deref()
                    .is_some_and(|notes| notes.to_lowercase().contains(&needle));
                let counterparty = (tx.source.id == self.asset_id && tx.target.id == *text)
                    || (tx.target.id == self.asset_id && tx.source.id == *text);

                in_notes || counterparty || tx.status_name == *text
            }
        }
    }
}
