//! Expense totals per category.

use std::collections::HashMap;

use cashpilot_domain::Transaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: String,
    pub total: f64,
}

/// Sums expense magnitudes per category, largest total first.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        *totals.entry(txn.category.as_str()).or_insert(0.0) += txn.magnitude();
    }

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category_id, total)| CategoryTotal {
            category_id: category_id.to_string(),
            total,
        })
        .collect();
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    rows
}
