//! Period-over-period change calculations.

use std::fmt;

use cashpilot_domain::MonthKey;
use serde::{Deserialize, Serialize};

use crate::aggregation::{MonthlyAggregates, MonthlyTotals};

/// Percentage change from `previous` to `current`.
///
/// A zero baseline yields `100` when `current` is positive and `0` otherwise.
pub fn calculate_percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous.abs() * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub income_trend: f64,
    pub expense_trend: f64,
    pub balance_trend: f64,
}

pub fn calculate_trends(current: &MonthlyTotals, previous: &MonthlyTotals) -> Trends {
    Trends {
        income_trend: calculate_percent_change(current.income, previous.income),
        expense_trend: calculate_percent_change(current.expense, previous.expense),
        balance_trend: calculate_percent_change(current.balance, previous.balance),
    }
}

/// Trends of `month` against the month before it; absent months count as zero.
pub fn period_trends(aggregates: &MonthlyAggregates, month: MonthKey) -> Trends {
    let current = aggregates.get(&month).copied().unwrap_or_default();
    let previous = aggregates
        .get(&month.previous())
        .copied()
        .unwrap_or_default();
    calculate_trends(&current, &previous)
}

/// Renders a trend with one decimal and an explicit `+` for non-negative values.
pub fn format_trend(trend: f64) -> String {
    if trend >= 0.0 {
        format!("+{:.1}%", trend)
    } else {
        format!("{:.1}%", trend)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendLabel::Positive => "positive",
            TrendLabel::Negative => "negative",
            TrendLabel::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Classifies a trend; moves under one percent are neutral.
///
/// With `higher_is_better == false` (expenses) a decrease is positive.
pub fn trend_label(trend: f64, higher_is_better: bool) -> TrendLabel {
    if trend.abs() < 1.0 {
        return TrendLabel::Neutral;
    }
    let rising = trend > 0.0;
    if rising == higher_is_better {
        TrendLabel::Positive
    } else {
        TrendLabel::Negative
    }
}
