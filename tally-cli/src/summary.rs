//! `tally summary`: render a parsed statement as text or JSON and optionally
//! export the normalized transactions.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tally_core::{ParseResult, SpendingBucket, Transaction};
use tally_finance::{ParseOutcome, ParseStats};

/// Plain-text report: totals, the three summaries, then up to `limit` transactions.
pub fn write_text_report(
    out: &mut impl Write,
    result: &ParseResult,
    stats: &ParseStats,
    limit: usize,
) -> Result<()> {
    writeln!(
        out,
        "Parsed {} transactions ({} rows, {} skipped)",
        result.transaction_count,
        stats.rows,
        stats.discarded_total()
    )?;
    for (reason, count) in &stats.discarded {
        writeln!(out, "  skipped {count}: {reason}")?;
    }
    writeln!(out, "Total spending: ${:.2}", result.total_spending)?;

    write_buckets(out, "Monthly", &result.monthly_spending)?;
    write_buckets(out, "Weekly", &result.weekly_spending)?;
    write_buckets(out, "Daily", &result.daily_spending)?;

    if limit > 0 && !result.transactions.is_empty() {
        writeln!(out, "\nTransactions")?;
        for t in result.transactions.iter().take(limit) {
            writeln!(out, "  {} | {:>10} | {}", t.date, format!("${:.2}", t.amount), t.description)?;
        }
        if result.transactions.len() > limit {
            writeln!(out, "  ... and {} more", result.transactions.len() - limit)?;
        }
    }
    Ok(())
}

fn write_buckets(out: &mut impl Write, title: &str, buckets: &[SpendingBucket]) -> Result<()> {
    writeln!(out, "\n{title}")?;
    for b in buckets {
        writeln!(out, "  {:<16} ${:.2}", b.label, b.spending)?;
    }
    Ok(())
}

/// Message for documents with no usable data
pub fn write_unparsable(out: &mut impl Write, outcome: &ParseOutcome) -> Result<()> {
    if let ParseOutcome::Unparsable(reason) = outcome {
        writeln!(out, "No transactions found: {reason}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    description: &'a str,
    amount: String,
}

/// Write normalized transactions as `date,description,amount` CSV. Amounts are
/// written exactly as parsed, sub-cent digits included.
pub fn export_transactions(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for t in transactions {
        wtr.serialize(ExportRow {
            date: t.date.format("%Y-%m-%d").to_string(),
            description: &t.description,
            amount: t.amount.to_string(),
        })?;
    }
    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
