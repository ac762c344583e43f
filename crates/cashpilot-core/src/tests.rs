use cashpilot_config::AppConfig;
use cashpilot_domain::{
    AlertKind, AlertMeta, AlertSeverity, BudgetPeriod, BudgetPlan, Category, CategoryType,
    Transaction,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::{
    aggregate_by_month, category_totals, evaluate_alerts, time::Clock, AlertState, FixedClock,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 9, 30, 0).unwrap()
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::income("inc-1", date(2024, 1, 1), 3200.0, "salary"),
        Transaction::expense("exp-1", date(2024, 1, 3), 1450.0, "rent"),
        Transaction::expense("exp-2", date(2024, 1, 9), 130.0, "food"),
        Transaction::expense("exp-3", date(2024, 1, 19), 1900.0, "car"),
        Transaction::income("inc-2", date(2024, 2, 1), 3200.0, "salary"),
        Transaction::expense("exp-4", date(2024, 2, 3), 1450.0, "rent"),
        Transaction::expense("exp-5", date(2024, 2, 11), 95.5, "food"),
        Transaction::expense("exp-6", date(2024, 3, 7), 42.25, "food"),
        Transaction::expense("exp-7", date(2023, 11, 7), 60.0, "unknown-category"),
    ]
}

fn sample_categories() -> Vec<Category> {
    vec![
        Category::new("salary", "Salary", CategoryType::Income, "#2563eb"),
        Category::new("rent", "Rent", CategoryType::Expense, "#dc2626"),
        Category::new("food", "Groceries", CategoryType::Expense, "#16a34a"),
    ]
}

fn sample_budgets() -> Vec<BudgetPlan> {
    vec![BudgetPlan::new(
        "plan-jan",
        "January plan",
        BudgetPeriod::Monthly,
        date(2024, 1, 1),
        date(2024, 1, 31),
    )
    .with_line("food", 100.0)
    .with_line("rent", 1500.0)]
}

#[test]
fn monthly_balance_always_equals_income_minus_expense() {
    for (month, totals) in aggregate_by_month(&sample_transactions()) {
        assert_eq!(totals.balance, totals.income - totals.expense, "month {month}");
    }
}

#[test]
fn monthly_sums_match_per_type_totals() {
    let txns = sample_transactions();
    let monthly = aggregate_by_month(&txns);

    let income: f64 = monthly.values().map(|m| m.income).sum();
    let expense: f64 = monthly.values().map(|m| m.expense).sum();
    let expected_income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expected_expense: f64 = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    assert!((income - expected_income).abs() < 1e-9);
    assert!((expense - expected_expense).abs() < 1e-9);
}

#[test]
fn rollup_is_non_increasing_and_expense_only() {
    let totals = category_totals(&sample_transactions());
    assert!(totals.windows(2).all(|pair| pair[0].total >= pair[1].total));
    assert!(totals.iter().all(|row| row.category_id != "salary"));
}

#[test]
fn default_rules_produce_expected_batch() {
    let txns = sample_transactions();
    let categories = sample_categories();
    let budgets = sample_budgets();
    let config = AppConfig::default();
    let state = AlertState::new(&txns, &budgets, &categories, &config);

    let alerts = evaluate_alerts(&state, evaluation_time());

    // January food: 130 vs 100 (30% over) -> critical budget alert.
    let budget: Vec<_> = alerts.iter().filter(|a| a.kind == AlertKind::Budget).collect();
    assert_eq!(budget.len(), 1);
    assert_eq!(budget[0].severity, AlertSeverity::Critical);
    assert_eq!(budget[0].title, "Budget overrun: Groceries");

    // Negative balances: November 2023, January 2024 and March 2024.
    let liquidity: Vec<_> = alerts
        .iter()
        .filter(|a| a.kind == AlertKind::Liquidity)
        .filter_map(|a| a.meta.as_ref().and_then(AlertMeta::month))
        .map(|m| m.to_string())
        .collect();
    assert_eq!(liquidity, vec!["2023-11", "2024-01", "2024-03"]);

    // January ratio 3480/3200 -> warning; February 1545.5/3200 is fine.
    let ratio = alerts
        .iter()
        .filter(|a| matches!(a.meta, Some(AlertMeta::ExpenseRatio { .. })))
        .count();
    assert_eq!(ratio, 1);

    assert!(alerts.iter().all(|a| !a.resolved));
    assert!(alerts.iter().all(|a| a.created_at == evaluation_time()));
}

#[test]
fn re_evaluation_is_structurally_idempotent() {
    let txns = sample_transactions();
    let categories = sample_categories();
    let budgets = sample_budgets();
    let config = AppConfig::default();
    let state = AlertState::new(&txns, &budgets, &categories, &config);
    let clock = FixedClock(evaluation_time());

    let first = evaluate_alerts(&state, clock.now());
    let second = evaluate_alerts(&state, clock.now());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.meta, b.meta);
    }
}

#[test]
fn custom_critical_pct_changes_escalation() {
    let txns = vec![Transaction::expense("f", date(2024, 1, 9), 130.0, "food")];
    let budgets = sample_budgets();
    let config = AppConfig {
        budget_critical_pct: 0.5,
        ..AppConfig::default()
    };
    let state = AlertState::new(&txns, &budgets, &[], &config);

    let alerts = evaluate_alerts(&state, evaluation_time());
    let budget = alerts
        .iter()
        .find(|a| a.kind == AlertKind::Budget)
        .expect("budget alert");
    assert_eq!(budget.severity, AlertSeverity::Warning);
    assert_eq!(budget.title, "Budget overrun: food");
}

#[test]
fn quarterly_plan_only_checks_its_start_month() {
    let quarter = BudgetPlan::new(
        "q1",
        "Q1",
        BudgetPeriod::Quarterly,
        date(2024, 1, 1),
        date(2024, 3, 31),
    )
    .with_line("food", 100.0);
    let config = AppConfig::default();

    // February overspend is outside the start month and goes unnoticed.
    let february = vec![Transaction::expense("f", date(2024, 2, 9), 500.0, "food")];
    let state = AlertState::new(&february, std::slice::from_ref(&quarter), &[], &config);
    assert!(evaluate_alerts(&state, evaluation_time())
        .iter()
        .all(|a| a.kind != AlertKind::Budget));

    let january = vec![Transaction::expense("j", date(2024, 1, 9), 110.0, "food")];
    let state = AlertState::new(&january, std::slice::from_ref(&quarter), &[], &config);
    let budget: Vec<_> = evaluate_alerts(&state, evaluation_time())
        .into_iter()
        .filter(|a| a.kind == AlertKind::Budget)
        .collect();
    assert_eq!(budget.len(), 1);
    assert_eq!(
        budget[0].meta.as_ref().and_then(AlertMeta::month).map(|m| m.to_string()),
        Some("2024-01".to_string())
    );
}

#[test]
fn yearly_plan_variance_spreads_over_active_months() {
    let year = BudgetPlan::new(
        "y",
        "2024",
        BudgetPeriod::Yearly,
        date(2024, 1, 1),
        date(2024, 12, 31),
    )
    .with_line("food", 1200.0);
    let rows = crate::variance(&[year], &sample_transactions());

    let months: Vec<String> = rows.iter().map(|row| row.month.to_string()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    assert!(rows.iter().all(|row| row.plan == 1200.0));
}
