//! Rule-based alerting over transactions, budgets and configuration.
//!
//! Evaluation is stateless: each run builds a fresh batch of alerts with new
//! identifiers. Keeping, resolving and dismissing alerts is the job of
//! [`crate::alert_store::AlertStore`].

pub mod engine;
pub mod rule;
pub mod rules;

pub use engine::{default_rules, evaluate_alerts, evaluate_with_rules};
pub use rule::{AlertRule, AlertState, FnRule, RuleResult};
pub use rules::BuiltinRule;
