//! The built-in rule set.

use std::fmt;

use cashpilot_domain::{
    category_name, Alert, AlertKind, AlertMeta, AlertSeverity, MonthKey, Transaction,
};
use chrono::{DateTime, Months, Utc};

use crate::aggregation::{aggregate_by_month, MonthlyTotals};

use super::rule::{AlertRule, AlertState, RuleResult};

/// Months of history averaged by the unusual-expense rule.
pub const UNUSUAL_EXPENSE_WINDOW_MONTHS: u32 = 6;

/// Expense-to-income ratio above which a month is flagged.
pub const HIGH_EXPENSE_RATIO: f64 = 0.8;

/// Fixed, enumerable set of rules shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    BudgetOverrun,
    LowLiquidity,
    UnusualExpense,
    HighExpenseRatio,
}

impl BuiltinRule {
    /// Default evaluation order.
    pub const ALL: [BuiltinRule; 4] = [
        BuiltinRule::BudgetOverrun,
        BuiltinRule::LowLiquidity,
        BuiltinRule::UnusualExpense,
        BuiltinRule::HighExpenseRatio,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.id() == id)
    }
}

impl fmt::Display for BuiltinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(AlertRule::id(self))
    }
}

impl AlertRule for BuiltinRule {
    fn id(&self) -> &str {
        match self {
            BuiltinRule::BudgetOverrun => "budget-overrun",
            BuiltinRule::LowLiquidity => "low-liquidity",
            BuiltinRule::UnusualExpense => "unusual-expense",
            BuiltinRule::HighExpenseRatio => "high-expense-ratio",
        }
    }

    fn name(&self) -> &str {
        match self {
            BuiltinRule::BudgetOverrun => "Budget overrun",
            BuiltinRule::LowLiquidity => "Low liquidity",
            BuiltinRule::UnusualExpense => "Unusually large expense",
            BuiltinRule::HighExpenseRatio => "High expense ratio",
        }
    }

    fn description(&self) -> Option<&str> {
        Some(match self {
            BuiltinRule::BudgetOverrun => "Warns when a category exceeds its budgeted amount",
            BuiltinRule::LowLiquidity => "Warns when a monthly balance drops below the threshold",
            BuiltinRule::UnusualExpense => {
                "Flags single expenses far above the recent average expense"
            }
            BuiltinRule::HighExpenseRatio => "Warns when expenses exceed 80% of income",
        })
    }

    fn check(&self, state: &AlertState<'_>, now: DateTime<Utc>) -> RuleResult {
        let alerts = match self {
            BuiltinRule::BudgetOverrun => budget_overrun(state, now),
            BuiltinRule::LowLiquidity => low_liquidity(state, now),
            BuiltinRule::UnusualExpense => unusual_expense(state, now),
            BuiltinRule::HighExpenseRatio => high_expense_ratio(state, now),
        };
        Ok(alerts)
    }
}

/// One alert per budget line whose actual spend in the plan's start month
/// exceeds the budgeted amount.
fn budget_overrun(state: &AlertState<'_>, now: DateTime<Utc>) -> Vec<Alert> {
    let critical_pct = state.config.effective_budget_critical_pct() * 100.0;
    let mut alerts = Vec::new();

    for budget in state.budgets {
        let month = budget.month();
        for line in &budget.categories {
            let actual: f64 = state
                .transactions
                .iter()
                .filter(|txn| txn.category == line.category_id && month.contains(txn.date))
                .map(Transaction::magnitude)
                .sum();
            let plan = line.budgeted;
            let diff = actual - plan;
            if diff <= 0.0 {
                continue;
            }

            let diff_pct = if plan > 0.0 { diff / plan * 100.0 } else { 0.0 };
            let severity = if diff_pct > critical_pct {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let name = category_name(&line.category_id, state.categories);
            alerts.push(
                Alert::new(
                    AlertKind::Budget,
                    severity,
                    format!("Budget overrun: {name}"),
                    format!(
                        "Over budget by {diff_pct:.1}% (plan: {plan:.2}, actual: {actual:.2})"
                    ),
                    now,
                )
                .with_meta(AlertMeta::BudgetOverrun {
                    category_id: line.category_id.clone(),
                    month,
                    plan,
                    actual,
                    diff,
                    diff_pct,
                }),
            );
        }
    }

    alerts
}

/// A critical alert for every month whose balance is strictly below the threshold.
fn low_liquidity(state: &AlertState<'_>, now: DateTime<Utc>) -> Vec<Alert> {
    let threshold = state.config.effective_liquidity_threshold();
    aggregate_by_month(state.transactions)
        .into_iter()
        .filter(|(_, totals)| totals.balance < threshold)
        .map(|(month, totals)| {
            Alert::new(
                AlertKind::Liquidity,
                AlertSeverity::Critical,
                format!("Low liquidity: {month}"),
                format!(
                    "Monthly balance: {:.2} (threshold: {threshold})",
                    totals.balance
                ),
                now,
            )
            .with_meta(AlertMeta::LowLiquidity {
                month,
                balance: totals.balance,
                income: totals.income,
                expense: totals.expense,
            })
        })
        .collect()
}

/// Flags every expense above `multiplier` times the mean expense of the
/// trailing window. The mean only looks at recent expenses but the scan
/// covers all of them.
fn unusual_expense(state: &AlertState<'_>, now: DateTime<Utc>) -> Vec<Alert> {
    // Transactions carry no time of day, so the window starts on the cutoff date.
    let cutoff = now
        .checked_sub_months(Months::new(UNUSUAL_EXPENSE_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .date_naive();
    let recent: Vec<f64> = state
        .transactions
        .iter()
        .filter(|txn| txn.is_expense() && txn.date >= cutoff)
        .map(Transaction::magnitude)
        .collect();
    if recent.is_empty() {
        return Vec::new();
    }

    let average = recent.iter().sum::<f64>() / recent.len() as f64;
    let threshold = average * state.config.effective_unusual_expense_multiplier();

    state
        .transactions
        .iter()
        .filter(|txn| txn.is_expense() && txn.magnitude() > threshold)
        .map(|txn| {
            Alert::new(
                AlertKind::Recurring,
                AlertSeverity::Info,
                "Unusually large expense",
                format!(
                    "{}: {:.2} (average: {average:.2})",
                    txn.description,
                    txn.magnitude()
                ),
                now,
            )
            .with_meta(AlertMeta::UnusualExpense {
                transaction_id: txn.id.clone(),
                amount: txn.amount,
                average,
                threshold,
            })
        })
        .collect()
}

/// A warning for every month with income where expenses exceed 80% of it.
fn high_expense_ratio(state: &AlertState<'_>, now: DateTime<Utc>) -> Vec<Alert> {
    aggregate_by_month(state.transactions)
        .into_iter()
        .filter(|(_, totals)| totals.income > 0.0)
        .filter_map(|(month, totals)| {
            let ratio = totals.expense / totals.income;
            (ratio > HIGH_EXPENSE_RATIO).then(|| ratio_alert(month, ratio, totals, now))
        })
        .collect()
}

fn ratio_alert(month: MonthKey, ratio: f64, totals: MonthlyTotals, now: DateTime<Utc>) -> Alert {
    Alert::new(
        AlertKind::Recurring,
        AlertSeverity::Warning,
        format!("High expense ratio: {month}"),
        format!("Expenses at {:.1}% of income", ratio * 100.0),
        now,
    )
    .with_meta(AlertMeta::ExpenseRatio {
        month,
        ratio,
        income: totals.income,
        expense: totals.expense,
    })
}
