//! Alert records produced by rule evaluation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Broad area an alert belongs to.
pub enum AlertKind {
    Budget,
    Liquidity,
    Recurring,
    Custom,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Budget => "budget",
            AlertKind::Liquidity => "liquidity",
            AlertKind::Recurring => "recurring",
            AlertKind::Custom => "custom",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Alert severity levels, ordered from least to most urgent.
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Structured details attached to an alert by the rule that raised it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum AlertMeta {
    #[serde(rename_all = "camelCase")]
    BudgetOverrun {
        category_id: String,
        month: MonthKey,
        plan: f64,
        actual: f64,
        diff: f64,
        diff_pct: f64,
    },
    #[serde(rename_all = "camelCase")]
    LowLiquidity {
        month: MonthKey,
        balance: f64,
        income: f64,
        expense: f64,
    },
    #[serde(rename_all = "camelCase")]
    UnusualExpense {
        transaction_id: String,
        amount: f64,
        average: f64,
        threshold: f64,
    },
    #[serde(rename_all = "camelCase")]
    ExpenseRatio {
        month: MonthKey,
        ratio: f64,
        income: f64,
        expense: f64,
    },
    /// Free-form bag for user supplied rules.
    Custom(serde_json::Map<String, serde_json::Value>),
}

impl AlertMeta {
    /// Month the alert refers to, when the rule is month based.
    pub fn month(&self) -> Option<MonthKey> {
        match self {
            AlertMeta::BudgetOverrun { month, .. }
            | AlertMeta::LowLiquidity { month, .. }
            | AlertMeta::ExpenseRatio { month, .. } => Some(*month),
            AlertMeta::UnusualExpense { .. } | AlertMeta::Custom(_) => None,
        }
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            AlertMeta::BudgetOverrun { category_id, .. } => Some(category_id),
            _ => None,
        }
    }
}

/// A triggered alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<AlertMeta>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
}

impl Alert {
    /// Builds an unresolved alert with a freshly minted identifier.
    pub fn new(
        kind: AlertKind,
        severity: AlertSeverity,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("alert-{}", Uuid::new_v4()),
            kind,
            severity,
            title: title.into(),
            message: message.into(),
            meta: None,
            created_at,
            resolved: false,
        }
    }

    pub fn with_meta(mut self, meta: AlertMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl Identifiable for Alert {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Alert {
    fn display_label(&self) -> String {
        format!("[{}] {}: {}", self.severity, self.title, self.message)
    }
}
