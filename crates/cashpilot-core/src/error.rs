use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Recurring transaction not found: {0}")]
    RecurringNotFound(String),
    #[error("Alert not found: {0}")]
    AlertNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Rule `{rule_id}` failed: {message}")]
    Rule { rule_id: String, message: String },
}

impl CoreError {
    pub fn rule(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Rule {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}
