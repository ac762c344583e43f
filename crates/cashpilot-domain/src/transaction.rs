//! Domain models for transactions and recurring transaction templates.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A booked income or expense.
///
/// `amount` is a non-negative magnitude; the direction of the money flow is
/// carried exclusively by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    /// Soft reference to a [`crate::Category`] id; may dangle.
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount: amount.abs(),
            currency: "CHF".into(),
            category: category.into(),
            description: String::new(),
            kind,
            source: None,
            tags: Vec::new(),
        }
    }

    pub fn income(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self::new(id, date, amount, category, TransactionType::Income)
    }

    pub fn expense(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self::new(id, date, amount, category, TransactionType::Expense)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount as an absolute magnitude regardless of how it was stored.
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.magnitude(),
            TransactionType::Expense => -self.magnitude(),
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2} {} [{}]",
            self.date, self.kind, self.amount, self.currency, self.category
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of a transaction.
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Cadence of a recurring transaction template.
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Template that materialises into concrete [`Transaction`]s when due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: String,
    pub name: String,
    pub frequency: Frequency,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub next_occurrence: NaiveDate,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<NaiveDate>,
    #[serde(default)]
    pub generated_count: u32,
}

impl RecurringTransaction {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        frequency: Frequency,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionType,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frequency,
            amount: amount.abs(),
            currency: "CHF".into(),
            category: category.into(),
            description: String::new(),
            kind,
            start_date,
            end_date: None,
            next_occurrence: start_date,
            is_active: true,
            last_generated: None,
            generated_count: 0,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether the template should produce a transaction on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        if matches!(self.end_date, Some(end) if end < today) {
            return false;
        }
        self.next_occurrence <= today
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for RecurringTransaction {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn constructor_stores_magnitude() {
        let txn = Transaction::expense("t1", date(2024, 1, 2), -42.5, "food");
        assert_eq!(txn.amount, 42.5);
        assert_eq!(txn.signed_amount(), -42.5);
    }

    #[test]
    fn transaction_uses_type_field_on_the_wire() {
        let txn = Transaction::income("t1", date(2024, 1, 2), 10.0, "salary");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-02");
    }

    #[test]
    fn recurring_due_respects_activity_and_end_date() {
        let mut rent = RecurringTransaction::new(
            "r1",
            "Rent",
            Frequency::Monthly,
            1500.0,
            "housing",
            TransactionType::Expense,
            date(2024, 1, 1),
        );
        assert!(rent.is_due(date(2024, 1, 1)));
        assert!(!rent.is_due(date(2023, 12, 31)));

        rent.end_date = Some(date(2023, 12, 31));
        assert!(!rent.is_due(date(2024, 1, 1)));

        rent.end_date = None;
        rent.is_active = false;
        assert!(!rent.is_due(date(2024, 1, 1)));
    }
}
