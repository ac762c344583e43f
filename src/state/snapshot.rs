use cashpilot_config::AppConfig;
use cashpilot_domain::{BudgetPlan, Category, RecurringTransaction, Transaction};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Bulk payload for [`AppState::import_data`](super::AppState::import_data).
///
/// Absent collections leave the current ones untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<BudgetPlan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrings: Option<Vec<RecurringTransaction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<AppConfig>,
}

impl DataSnapshot {
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn with_budgets(mut self, budgets: Vec<BudgetPlan>) -> Self {
        self.budgets = Some(budgets);
        self
    }

    pub fn with_recurrings(mut self, recurrings: Vec<RecurringTransaction>) -> Self {
        self.recurrings = Some(recurrings);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Parses a backup document. Unknown keys are ignored.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_none()
            && self.categories.is_none()
            && self.budgets.is_none()
            && self.recurrings.is_none()
            && self.config.is_none()
    }
}
