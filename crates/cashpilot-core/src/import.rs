//! Duplicate filtering for imported transaction batches.

use std::collections::HashSet;

use cashpilot_domain::Transaction;

/// Identity used to recognise a transaction that was already imported.
///
/// The amount enters as a magnitude so a signed bank export matches the stored row.
pub fn import_key(txn: &Transaction) -> String {
    format!("{}|{}|{}", txn.date, txn.magnitude(), txn.description)
}

/// Returns the incoming transactions not already present in `existing`.
///
/// Only rows already stored are filtered. Identical rows inside `incoming`
/// are separate purchases and are all kept.
pub fn dedupe_imported(existing: &[Transaction], incoming: Vec<Transaction>) -> Vec<Transaction> {
    let known: HashSet<String> = existing.iter().map(import_key).collect();
    incoming
        .into_iter()
        .filter(|txn| !known.contains(&import_key(txn)))
        .collect()
}
