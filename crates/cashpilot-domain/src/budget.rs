//! Budget plans and their per-category line items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Planned amount for a single category inside a [`BudgetPlan`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub category_id: String,
    pub budgeted: f64,
}

impl BudgetLine {
    pub fn new(category_id: impl Into<String>, budgeted: f64) -> Self {
        Self {
            category_id: category_id.into(),
            budgeted,
        }
    }
}

/// A named plan of category budgets for a period.
///
/// The temporal scope used by the overrun alert is the (year, month) of
/// `start_date`, whatever the declared `period`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub id: String,
    pub name: String,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub categories: Vec<BudgetLine>,
}

impl BudgetPlan {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        period: BudgetPeriod,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            period,
            start_date,
            end_date,
            categories: Vec::new(),
        }
    }

    pub fn with_line(mut self, category_id: impl Into<String>, budgeted: f64) -> Self {
        self.categories.push(BudgetLine::new(category_id, budgeted));
        self
    }

    /// Month the plan is keyed by.
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.start_date)
    }

    pub fn total_budgeted(&self) -> f64 {
        self.categories.iter().map(|line| line.budgeted).sum()
    }

    pub fn line(&self, category_id: &str) -> Option<&BudgetLine> {
        self.categories
            .iter()
            .find(|line| line.category_id == category_id)
    }
}

impl Identifiable for BudgetPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for BudgetPlan {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for BudgetPlan {
    fn display_label(&self) -> String {
        format!("{} ({}, from {})", self.name, self.period, self.start_date)
    }
}
