//! Transaction and summary types produced by a statement parse

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spending record normalized from one statement row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// UTC calendar day of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description, empty when the export has no description column
    pub description: String,
    /// Always non-negative; direction is dropped after the debit filter
    pub amount: Decimal,
}

impl Transaction {
    /// Create a transaction, storing the absolute value of `amount`
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount: amount.abs(),
        }
    }
}

/// One row of a time-bucketed summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingBucket {
    /// Sortable identity of the bucket (month name, ISO day, or ISO week start)
    pub key: String,
    /// Display label
    pub label: String,
    /// Exact sum of the bucket's amounts. Not rounded: only
    /// `ParseResult::total_spending` is rounded to cents, so bucket sums can
    /// differ from it by sub-cent residue.
    pub spending: Decimal,
}

impl SpendingBucket {
    pub fn new(key: impl Into<String>, label: impl Into<String>, spending: Decimal) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            spending,
        }
    }
}

/// Normalized transactions plus monthly, daily and weekly spending summaries.
///
/// An empty result is returned both for "no usable data" and for documents whose
/// rows were all filtered out; check `transaction_count` to tell them apart from
/// real spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Retained transactions in input order
    pub transactions: Vec<Transaction>,
    pub monthly_spending: Vec<SpendingBucket>,
    pub daily_spending: Vec<SpendingBucket>,
    pub weekly_spending: Vec<SpendingBucket>,
    /// Sum of all retained amounts, rounded to 2 decimal places
    pub total_spending: Decimal,
    pub transaction_count: usize,
}

impl ParseResult {
    /// The well-formed "no data" result
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            monthly_spending: Vec::new(),
            daily_spending: Vec::new(),
            weekly_spending: Vec::new(),
            total_spending: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Pretty-printed JSON with camelCase keys
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::empty()
    }
}
