//! Result assembler: turns accumulated sums into chronologically sorted
//! buckets and the rounded grand total.

use rust_decimal::{Decimal, RoundingStrategy};
use tally_core::time::{day_label, iso_day, month_label, week_label};
use tally_core::{ParseResult, SpendingBucket, Transaction};

use crate::aggregate::SpendingAccumulator;

/// Round a money total to cents, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Assemble the final report. `transactions` must be the same list that was fed
/// to `acc`.
pub fn assemble(transactions: Vec<Transaction>, acc: SpendingAccumulator) -> ParseResult {
    let monthly_spending = acc
        .monthly
        .into_iter()
        .map(|(month, spending)| {
            let label = month_label(month);
            SpendingBucket::new(label.clone(), label, spending)
        })
        .collect();

    let daily_spending = acc
        .daily
        .into_iter()
        .map(|(day, spending)| SpendingBucket::new(iso_day(day), day_label(day), spending))
        .collect();

    let weekly_spending = acc
        .weekly
        .into_iter()
        .map(|(start, spending)| SpendingBucket::new(iso_day(start), week_label(start), spending))
        .collect();

    ParseResult {
        transaction_count: transactions.len(),
        transactions,
        monthly_spending,
        daily_spending,
        weekly_spending,
        total_spending: round_cents(acc.total),
    }
}
