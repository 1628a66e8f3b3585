//! Row normalization: turn one tokenized data row into a `Transaction` or a
//! discard. Never fails; unusable rows are reported with a `DiscardReason`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::time::parse_calendar_date;
use tally_core::Transaction;

use crate::columns::ColumnMap;
use crate::types::MissingDate;

/// Why a row produced no transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscardReason {
    /// Not enough fields to reach the date and amount columns
    TooFewFields,
    /// Amount did not parse as a number after stripping `$` and `,`
    BadAmount,
    /// A type column exists and this row is not a debit
    NotDebit,
    /// Date field present but unrecognized
    BadDate,
    /// Date field empty and the missing-date policy is `Discard`
    MissingDate,
    /// Amount would push the running total past `Decimal::MAX`
    AmountOverflow,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscardReason::TooFewFields => "too few fields",
            DiscardReason::BadAmount => "unparseable amount",
            DiscardReason::NotDebit => "not a debit",
            DiscardReason::BadDate => "unparseable date",
            DiscardReason::MissingDate => "missing date",
            DiscardReason::AmountOverflow => "amount overflows total",
        };
        f.write_str(s)
    }
}

/// Result of normalizing a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Kept(Transaction),
    Discarded(DiscardReason),
}

/// Normalize one data row.
///
/// Discard checks run in order: field count, amount, debit filter, date.
/// `today` is used when the date field is empty and the policy is `Today`.
pub fn normalize_row(
    row: &[String],
    columns: &ColumnMap,
    missing_date: MissingDate,
    today: NaiveDate,
) -> RowOutcome {
    let (Some(date_idx), Some(amount_idx), Some(required)) =
        (columns.date, columns.amount, columns.required_len())
    else {
        return RowOutcome::Discarded(DiscardReason::TooFewFields);
    };
    if row.len() < required {
        return RowOutcome::Discarded(DiscardReason::TooFewFields);
    }

    let Some(amount) = parse_amount(&row[amount_idx]) else {
        return RowOutcome::Discarded(DiscardReason::BadAmount);
    };

    if let Some(type_idx) = columns.kind {
        let kind = field(row, Some(type_idx)).trim().to_lowercase();
        if kind != "debit" {
            return RowOutcome::Discarded(DiscardReason::NotDebit);
        }
    }

    let raw_date = row[date_idx].trim();
    let date = if raw_date.is_empty() {
        match missing_date {
            MissingDate::Today => today,
            MissingDate::Discard => return RowOutcome::Discarded(DiscardReason::MissingDate),
        }
    } else {
        match parse_calendar_date(raw_date) {
            Some(d) => d,
            None => return RowOutcome::Discarded(DiscardReason::BadDate),
        }
    };

    let description = field(row, columns.description);
    RowOutcome::Kept(Transaction::new(date, description, amount))
}

/// Parse an amount like "$1,234.56" or "-42.50". Sign is preserved here; the
/// transaction constructor takes the absolute value.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

fn field(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}
