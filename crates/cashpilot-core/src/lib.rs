//! cashpilot-core
//!
//! Aggregation, variance, trend and alerting logic for cashpilot.
//! Depends on cashpilot-domain and cashpilot-config. No storage, no terminal I/O.

pub mod aggregation;
pub mod alert_store;
pub mod alerts;
pub mod error;
pub mod import;
pub mod recurring;
pub mod rollup;
pub mod time;
pub mod trends;
pub mod variance;

#[cfg(test)]
mod tests;

pub use aggregation::{aggregate_by_month, MonthlyAggregates, MonthlyTotals};
pub use alert_store::AlertStore;
pub use alerts::{
    default_rules, evaluate_alerts, evaluate_with_rules, AlertRule, AlertState, BuiltinRule,
    FnRule, RuleResult,
};
pub use error::CoreError;
pub use rollup::{category_totals, CategoryTotal};
pub use time::{Clock, FixedClock, SystemClock};
pub use trends::{
    calculate_percent_change, calculate_trends, format_trend, period_trends, trend_label,
    TrendLabel, Trends,
};
pub use variance::{variance, VarianceRow};
