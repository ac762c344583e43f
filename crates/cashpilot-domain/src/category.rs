//! Domain types representing budget categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Categorises transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<f64>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: CategoryType,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            color: color.into(),
            parent_id: None,
            icon: None,
            budget_limit: None,
        }
    }

    /// Returns `true` when transactions of the given direction may use this category.
    pub fn accepts(&self, kind: crate::TransactionType) -> bool {
        match self.kind {
            CategoryType::Both => true,
            CategoryType::Income => kind == crate::TransactionType::Income,
            CategoryType::Expense => kind == crate::TransactionType::Expense,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryType::Income => "Income",
            CategoryType::Expense => "Expense",
            CategoryType::Both => "Both",
        };
        f.write_str(label)
    }
}

/// Resolves a display name for `category_id`, falling back to the raw id when
/// no category with that id exists.
pub fn category_name<'a>(category_id: &'a str, categories: &'a [Category]) -> &'a str {
    categories
        .iter()
        .find(|category| category.id == category_id)
        .map(|category| category.name.as_str())
        .unwrap_or(category_id)
}
