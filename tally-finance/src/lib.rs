//! tally-finance: statement parse entry points, spending aggregation and report
//! assembly.
//!
//! ```
//! let csv = "Date,Description,Amount\n2024-01-05,Coffee,-4.50\n2024-01-20,Rent,1200.00";
//! let report = tally_finance::parse(csv);
//! assert_eq!(report.transaction_count, 2);
//! assert_eq!(report.monthly_spending[0].key, "January 2024");
//! ```

pub mod aggregate;
pub mod report;

use std::collections::BTreeMap;
use std::fmt;

use tally_core::time::today_utc;
use tally_core::ParseResult;
use tally_ingest::{
    normalize_row, resolve_columns, split_lines, tokenize_line, DiscardReason, ParseOptions,
    RowOutcome,
};
use tracing::{debug, info};

pub use aggregate::SpendingAccumulator;
pub use report::{assemble, round_cents};
pub use tally_ingest::MissingDate;

/// Why a document could not be parsed at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unparsable {
    /// A header and at least one data line are required
    TooFewLines { found: usize },
    /// The header lacks a date or an amount column
    MissingColumns { date: bool, amount: bool },
}

impl fmt::Display for Unparsable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unparsable::TooFewLines { found } => {
                write!(f, "expected a header and at least one row, found {found} non-empty line(s)")
            }
            Unparsable::MissingColumns { date, amount } => {
                let missing: Vec<&str> = [(*date, "date"), (*amount, "amount")]
                    .into_iter()
                    .filter_map(|(m, name)| m.then_some(name))
                    .collect();
                write!(f, "no {} column in header", missing.join(" or "))
            }
        }
    }
}

impl std::error::Error for Unparsable {}

/// Row accounting for one parse; not part of the report itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Data rows seen (header excluded)
    pub rows: usize,
    pub kept: usize,
    pub discarded: BTreeMap<DiscardReason, usize>,
}

impl ParseStats {
    pub fn discarded_total(&self) -> usize {
        self.discarded.values().sum()
    }
}

/// Parse outcome that keeps "no usable data" apart from "zero spending"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed { result: ParseResult, stats: ParseStats },
    Unparsable(Unparsable),
}

impl ParseOutcome {
    /// Collapse into a report; unparsable documents become the empty result.
    pub fn into_result(self) -> ParseResult {
        match self {
            ParseOutcome::Parsed { result, .. } => result,
            ParseOutcome::Unparsable(_) => ParseResult::empty(),
        }
    }
}

/// Parse raw statement CSV with default options. Never fails: structural
/// problems yield `ParseResult::empty()` and bad rows are skipped.
pub fn parse(csv_text: &str) -> ParseResult {
    parse_with(csv_text, &ParseOptions::default())
}

/// Like [`parse`], with explicit options.
pub fn parse_with(csv_text: &str, opts: &ParseOptions) -> ParseResult {
    parse_outcome(csv_text, opts).into_result()
}

/// Run the full pipeline and report whether the document was usable.
pub fn parse_outcome(csv_text: &str, opts: &ParseOptions) -> ParseOutcome {
    let lines = split_lines(csv_text);
    if lines.len() < 2 {
        debug!(lines = lines.len(), "not enough lines to parse");
        return ParseOutcome::Unparsable(Unparsable::TooFewLines { found: lines.len() });
    }

    let columns = resolve_columns(&tokenize_line(lines[0]));
    if !columns.is_usable() {
        debug!(?columns, "header lacks date or amount column");
        return ParseOutcome::Unparsable(Unparsable::MissingColumns {
            date: columns.date.is_none(),
            amount: columns.amount.is_none(),
        });
    }

    let today = opts.today.unwrap_or_else(today_utc);
    let mut stats = ParseStats::default();
    let mut transactions = Vec::new();
    let mut acc = SpendingAccumulator::new();

    for (i, line) in lines.iter().enumerate().skip(1) {
        stats.rows += 1;
        let row = tokenize_line(line);
        let reason = match normalize_row(&row, &columns, opts.missing_date, today) {
            RowOutcome::Kept(txn) => {
                if acc.add(&txn) {
                    transactions.push(txn);
                    continue;
                }
                DiscardReason::AmountOverflow
            }
            RowOutcome::Discarded(reason) => reason,
        };
        // line numbers count non-empty lines, header = 1
        debug!(line = i + 1, %reason, "skipping row");
        *stats.discarded.entry(reason).or_default() += 1;
    }
    stats.kept = transactions.len();

    let result = assemble(transactions, acc);
    info!(
        rows = stats.rows,
        kept = stats.kept,
        discarded = stats.discarded_total(),
        total = %result.total_spending,
        "parsed statement"
    );

    ParseOutcome::Parsed { result, stats }
}
