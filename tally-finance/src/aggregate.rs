//! Spending aggregator: buckets transactions by month, day and week.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::time::{month_start, week_start};
use tally_core::Transaction;

/// Running sums for one document. Keys are dates so iteration is chronological:
/// first of month for monthly, the day itself for daily, the Monday for weekly.
#[derive(Debug, Clone, Default)]
pub struct SpendingAccumulator {
    pub(crate) monthly: BTreeMap<NaiveDate, Decimal>,
    pub(crate) daily: BTreeMap<NaiveDate, Decimal>,
    pub(crate) weekly: BTreeMap<NaiveDate, Decimal>,
    pub(crate) total: Decimal,
}

impl SpendingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction to every bucket and the grand total. Returns `false`
    /// and records nothing when the grand total would overflow `Decimal`.
    pub fn add(&mut self, txn: &Transaction) -> bool {
        let amount = txn.amount;
        let Some(total) = self.total.checked_add(amount) else {
            return false;
        };
        // amounts are non-negative, so no bucket exceeds the total
        *self.monthly.entry(month_start(txn.date)).or_default() += amount;
        *self.daily.entry(txn.date).or_default() += amount;
        *self.weekly.entry(week_start(txn.date)).or_default() += amount;
        self.total = total;
        true
    }

    /// Unrounded grand total
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

impl<'a> Extend<&'a Transaction> for SpendingAccumulator {
    fn extend<I: IntoIterator<Item = &'a Transaction>>(&mut self, iter: I) {
        for txn in iter {
            self.add(txn);
        }
    }
}
