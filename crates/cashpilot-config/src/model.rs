use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LIQUIDITY_THRESHOLD: f64 = 0.0;
pub const DEFAULT_UNUSUAL_EXPENSE_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_BUDGET_CRITICAL_PCT: f64 = 0.2;

/// Stores user preferences and the thresholds consumed by the alert rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_country")]
    pub country: String,
    #[serde(default = "AppConfig::default_locale")]
    pub locale: String,
    #[serde(default = "AppConfig::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub purpose: Purpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default = "AppConfig::default_fiscal_start")]
    pub fiscal_start_month: u32,
    #[serde(default = "AppConfig::default_fiscal_start")]
    pub fiscal_start_day: u32,

    /// Monthly balance floor; months strictly below it raise a liquidity alert.
    #[serde(default = "AppConfig::default_liquidity_threshold")]
    pub liquidity_threshold: f64,

    /// Multiple of the trailing average expense above which a single expense is flagged.
    #[serde(default = "AppConfig::default_unusual_expense_multiplier")]
    pub unusual_expense_multiplier: f64,

    /// Fraction of plan overrun that escalates a budget alert to critical.
    #[serde(default = "AppConfig::default_budget_critical_pct")]
    pub budget_critical_pct: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            country: Self::default_country(),
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            purpose: Purpose::default(),
            company_name: None,
            fiscal_start_month: Self::default_fiscal_start(),
            fiscal_start_day: Self::default_fiscal_start(),
            liquidity_threshold: Self::default_liquidity_threshold(),
            unusual_expense_multiplier: Self::default_unusual_expense_multiplier(),
            budget_critical_pct: Self::default_budget_critical_pct(),
        }
    }
}

impl AppConfig {
    pub fn default_country() -> String {
        "CH".into()
    }

    pub fn default_locale() -> String {
        "de-CH".into()
    }

    pub fn default_currency() -> String {
        "CHF".into()
    }

    pub fn default_fiscal_start() -> u32 {
        1
    }

    pub fn default_liquidity_threshold() -> f64 {
        DEFAULT_LIQUIDITY_THRESHOLD
    }

    pub fn default_unusual_expense_multiplier() -> f64 {
        DEFAULT_UNUSUAL_EXPENSE_MULTIPLIER
    }

    pub fn default_budget_critical_pct() -> f64 {
        DEFAULT_BUDGET_CRITICAL_PCT
    }

    /// Liquidity floor, treating a non-finite value as the default.
    pub fn effective_liquidity_threshold(&self) -> f64 {
        if self.liquidity_threshold.is_finite() {
            self.liquidity_threshold
        } else {
            DEFAULT_LIQUIDITY_THRESHOLD
        }
    }

    /// Unusual-expense multiplier; unset (zero), negative or non-finite values fall back to 3.
    pub fn effective_unusual_expense_multiplier(&self) -> f64 {
        positive_or(self.unusual_expense_multiplier, DEFAULT_UNUSUAL_EXPENSE_MULTIPLIER)
    }

    /// Critical overrun fraction; unset (zero), negative or non-finite values fall back to 0.2.
    pub fn effective_budget_critical_pct(&self) -> f64 {
        positive_or(self.budget_critical_pct, DEFAULT_BUDGET_CRITICAL_PCT)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
/// Who the budget is kept for.
pub enum Purpose {
    #[default]
    Private,
    Freelancer,
    SmallBusiness,
    Enterprise,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Purpose::Private => "private",
            Purpose::Freelancer => "freelancer",
            Purpose::SmallBusiness => "small-business",
            Purpose::Enterprise => "enterprise",
        };
        f.write_str(label)
    }
}
