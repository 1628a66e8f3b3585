//! Header detection: map heterogeneous bank column names to canonical roles.
//!
//! Matching is by lower-cased substring, so "Posted Date" and "Transaction Date"
//! both resolve the date role. Synonym order matters for the type role: the more
//! specific labels are tried before the bare word "type".

use tracing::debug;

const DATE_SYNONYMS: &[&str] = &["date", "transaction date", "posted", "posted date"];
const AMOUNT_SYNONYMS: &[&str] = &["amount"];
const DESCRIPTION_SYNONYMS: &[&str] = &["description", "name", "merchant", "payee", "details"];
const TYPE_SYNONYMS: &[&str] = &[
    "type of transaction",
    "trans type",
    "transaction type",
    "type",
    "debit/credit",
    "dr/cr",
];
/// Exact header used by some exports for the debit/credit column
const TYPE_FALLBACK: &str = "transaction";

/// Logical column roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Date,
    Amount,
    Description,
    Type,
}

/// Field index per role, `None` when the header has no such column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub amount: Option<usize>,
    pub description: Option<usize>,
    pub kind: Option<usize>,
}

impl ColumnMap {
    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Date => self.date,
            Role::Amount => self.amount,
            Role::Description => self.description,
            Role::Type => self.kind,
        }
    }

    /// Date and amount both resolved; anything less cannot yield transactions
    pub fn is_usable(&self) -> bool {
        self.date.is_some() && self.amount.is_some()
    }

    /// Minimum field count a row needs to carry both date and amount
    pub fn required_len(&self) -> Option<usize> {
        Some(self.date?.max(self.amount?) + 1)
    }
}

/// Build a `ColumnMap` from the tokenized header row.
pub fn resolve_columns(header: &[String]) -> ColumnMap {
    let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();

    let map = ColumnMap {
        date: first_header_matching(&normalized, DATE_SYNONYMS),
        amount: first_header_matching(&normalized, AMOUNT_SYNONYMS),
        description: first_header_matching(&normalized, DESCRIPTION_SYNONYMS),
        kind: resolve_type(&normalized),
    };

    debug!(?map, "resolved header columns");
    map
}

/// Index of the first header containing any of `synonyms`.
fn first_header_matching(headers: &[String], synonyms: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| synonyms.iter().any(|s| h.contains(s)))
}

/// Type synonyms are tried one at a time, in priority order, across every header.
fn resolve_type(headers: &[String]) -> Option<usize> {
    TYPE_SYNONYMS
        .iter()
        .find_map(|s| headers.iter().position(|h| h.contains(s)))
        .or_else(|| headers.iter().position(|h| h == TYPE_FALLBACK))
}
