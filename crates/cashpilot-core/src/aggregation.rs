//! Calendar-month bucketing of transactions.

use std::collections::BTreeMap;

use cashpilot_domain::{MonthKey, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

/// Income, expense and balance for a single month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl MonthlyTotals {
    fn record(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expense += amount,
        }
        self.balance = self.income - self.expense;
    }
}

/// Sparse month index; months without transactions have no entry.
pub type MonthlyAggregates = BTreeMap<MonthKey, MonthlyTotals>;

/// Buckets transactions into calendar-month totals.
///
/// Amounts are used as stored. `balance` is recomputed from `income` and
/// `expense` after every contribution so it always equals their difference.
pub fn aggregate_by_month(transactions: &[Transaction]) -> MonthlyAggregates {
    let mut monthly = MonthlyAggregates::new();
    for txn in transactions {
        monthly
            .entry(txn.month())
            .or_default()
            .record(txn.kind, txn.amount);
    }
    monthly
}
