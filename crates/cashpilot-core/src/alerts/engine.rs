//! Folds a list of rules over the current state into a flat alert batch.

use std::panic::{self, AssertUnwindSafe};

use cashpilot_domain::Alert;
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::CoreError;

use super::rule::{AlertRule, AlertState};
use super::rules::BuiltinRule;

/// The built-in rules, boxed, in their default order.
pub fn default_rules() -> Vec<Box<dyn AlertRule>> {
    BuiltinRule::ALL
        .into_iter()
        .map(|rule| Box::new(rule) as Box<dyn AlertRule>)
        .collect()
}

/// Evaluates the built-in rule set.
pub fn evaluate_alerts(state: &AlertState<'_>, now: DateTime<Utc>) -> Vec<Alert> {
    evaluate_with_rules(state, &default_rules(), now)
}

/// Runs `rules` in order and concatenates their alerts.
///
/// A rule that errors or panics is logged and contributes nothing; the
/// remaining rules still run. Alerts are not deduplicated across rules.
pub fn evaluate_with_rules(
    state: &AlertState<'_>,
    rules: &[Box<dyn AlertRule>],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for rule in rules {
        match run_rule(rule.as_ref(), state, now) {
            Ok(batch) => {
                debug!(rule = rule.id(), count = batch.len(), "alert rule evaluated");
                alerts.extend(batch);
            }
            Err(err) => {
                error!(rule = rule.id(), error = %err, "alert rule failed");
            }
        }
    }
    alerts
}

fn run_rule(
    rule: &dyn AlertRule,
    state: &AlertState<'_>,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, CoreError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(state, now))) {
        Ok(result) => result,
        Err(payload) => Err(CoreError::rule(rule.id(), panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}
