//! The rule contract and the read-only state rules evaluate against.

use std::fmt;

use cashpilot_config::AppConfig;
use cashpilot_domain::{Alert, BudgetPlan, Category, Transaction};
use chrono::{DateTime, Utc};

use crate::CoreError;

/// Borrowed view of everything a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct AlertState<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a [BudgetPlan],
    pub categories: &'a [Category],
    pub config: &'a AppConfig,
}

impl<'a> AlertState<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        budgets: &'a [BudgetPlan],
        categories: &'a [Category],
        config: &'a AppConfig,
    ) -> Self {
        Self {
            transactions,
            budgets,
            categories,
            config,
        }
    }
}

pub type RuleResult = Result<Vec<Alert>, CoreError>;

/// A pure check over [`AlertState`] producing zero or more alerts.
///
/// Implementations must not rely on being called at any particular cadence.
/// `throttle_hours` is advisory metadata; the engine does not enforce it, so a
/// throttling policy belongs in a wrapper that implements this trait around
/// another rule.
pub trait AlertRule: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn throttle_hours(&self) -> Option<u32> {
        None
    }

    /// Evaluates the rule. `now` is the evaluation instant used for
    /// timestamps and any time-relative window.
    fn check(&self, state: &AlertState<'_>, now: DateTime<Utc>) -> RuleResult;
}

type CheckFn = dyn Fn(&AlertState<'_>, DateTime<Utc>) -> RuleResult + Send + Sync;

/// Rule backed by a closure, for user defined checks.
pub struct FnRule {
    id: String,
    name: String,
    description: Option<String>,
    throttle_hours: Option<u32>,
    check: Box<CheckFn>,
}

impl FnRule {
    pub fn new<F>(id: impl Into<String>, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&AlertState<'_>, DateTime<Utc>) -> RuleResult + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            throttle_hours: None,
            check: Box::new(check),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_throttle_hours(mut self, hours: u32) -> Self {
        self.throttle_hours = Some(hours);
        self
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("throttle_hours", &self.throttle_hours)
            .finish_non_exhaustive()
    }
}

impl AlertRule for FnRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn throttle_hours(&self) -> Option<u32> {
        self.throttle_hours
    }

    fn check(&self, state: &AlertState<'_>, now: DateTime<Utc>) -> RuleResult {
        (self.check)(state, now)
    }
}
