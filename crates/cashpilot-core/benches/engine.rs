use cashpilot_config::AppConfig;
use cashpilot_core::{aggregate_by_month, category_totals, evaluate_alerts, variance, AlertState};
use cashpilot_domain::{BudgetPeriod, BudgetPlan, Category, CategoryType, Transaction};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CATEGORIES: [&str; 4] = ["rent", "food", "transport", "leisure"];

fn build_sample_transactions(txn_count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            if idx % 10 == 0 {
                Transaction::income(format!("inc-{idx}"), date, 4_000.0, "salary")
            } else {
                let category = CATEGORIES[idx % CATEGORIES.len()];
                Transaction::expense(
                    format!("exp-{idx}"),
                    date,
                    20.0 + (idx % 100) as f64,
                    category,
                )
            }
        })
        .collect()
}

fn build_sample_budgets() -> Vec<BudgetPlan> {
    (1..=12)
        .map(|month| {
            let start = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
            CATEGORIES.iter().fold(
                BudgetPlan::new(
                    format!("plan-{month}"),
                    format!("Plan {month}"),
                    BudgetPeriod::Monthly,
                    start,
                    start,
                ),
                |plan, category| plan.with_line(*category, 1_500.0),
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let txns = build_sample_transactions(black_box(10_000));
    let budgets = build_sample_budgets();

    c.bench_function("aggregate_by_month_10k", |b| {
        b.iter(|| black_box(aggregate_by_month(&txns)))
    });

    c.bench_function("category_totals_10k", |b| {
        b.iter(|| black_box(category_totals(&txns)))
    });

    c.bench_function("variance_10k", |b| {
        b.iter(|| black_box(variance(&budgets, &txns)))
    });
}

fn bench_alert_engine(c: &mut Criterion) {
    let txns = build_sample_transactions(black_box(10_000));
    let budgets = build_sample_budgets();
    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|id| Category::new(*id, *id, CategoryType::Expense, "#888888"))
        .collect();
    let config = AppConfig::default();
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap();

    c.bench_function("evaluate_alerts_10k", |b| {
        b.iter(|| {
            let state = AlertState::new(&txns, &budgets, &categories, &config);
            black_box(evaluate_alerts(&state, now))
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_alert_engine);
criterion_main!(benches);
