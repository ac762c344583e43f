//! Materialises recurring transaction templates into concrete transactions.

use cashpilot_domain::{Frequency, RecurringTransaction, Transaction};
use chrono::{Days, Months, NaiveDate};
use uuid::Uuid;

/// Date of the occurrence after `last` for the given cadence.
///
/// Month based steps clamp to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29). Returns `last` if the result would be out of range.
pub fn next_occurrence(last: NaiveDate, frequency: Frequency) -> NaiveDate {
    let next = match frequency {
        Frequency::Daily => last.checked_add_days(Days::new(1)),
        Frequency::Weekly => last.checked_add_days(Days::new(7)),
        Frequency::Monthly => last.checked_add_months(Months::new(1)),
        Frequency::Quarterly => last.checked_add_months(Months::new(3)),
        Frequency::Yearly => last.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(last)
}

/// Templates that should produce a transaction on `today`.
pub fn due_recurrings(
    recurrings: &[RecurringTransaction],
    today: NaiveDate,
) -> Vec<&RecurringTransaction> {
    recurrings
        .iter()
        .filter(|recurring| recurring.is_due(today))
        .collect()
}

/// One transaction per due template, dated at the template's next occurrence.
pub fn generate_due_transactions(
    recurrings: &[RecurringTransaction],
    today: NaiveDate,
) -> Vec<Transaction> {
    due_recurrings(recurrings, today)
        .into_iter()
        .map(materialise)
        .collect()
}

fn materialise(recurring: &RecurringTransaction) -> Transaction {
    Transaction::new(
        format!("recurring-{}-{}", recurring.id, Uuid::new_v4()),
        recurring.next_occurrence,
        recurring.amount,
        recurring.category.clone(),
        recurring.kind,
    )
    .with_currency(recurring.currency.clone())
    .with_description(recurring.description.clone())
}

/// Records that `recurring` produced its pending occurrence and moves it forward.
pub fn advance(recurring: &mut RecurringTransaction) {
    recurring.last_generated = Some(recurring.next_occurrence);
    recurring.next_occurrence = next_occurrence(recurring.next_occurrence, recurring.frequency);
    recurring.generated_count += 1;
}
