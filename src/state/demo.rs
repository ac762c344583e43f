//! Deterministic sample data covering the twelve months before "today".

use cashpilot_domain::{
    category_name, BudgetPeriod, BudgetPlan, Category, CategoryType, MonthKey, Transaction,
    TransactionType,
};
use chrono::NaiveDate;

pub const DEMO_MONTHS: usize = 12;

/// Expense categories that receive a monthly budget line.
const BUDGETED_EXPENSES: usize = 8;

/// One-off purchase in the most recent demo month, large enough to overrun its budget.
const SPIKE_CATEGORY: &str = "expense-entertainment";
const SPIKE_AMOUNT: f64 = 2_400.0;

pub fn demo_categories() -> Vec<Category> {
    [
        ("income-salary", "Salary", CategoryType::Income, "#52c41a"),
        ("income-freelance", "Freelance", CategoryType::Income, "#52c41a"),
        ("income-investments", "Investments", CategoryType::Income, "#52c41a"),
        ("expense-housing", "Housing", CategoryType::Expense, "#ff4d4f"),
        ("expense-food", "Groceries", CategoryType::Expense, "#fa8c16"),
        ("expense-transport", "Transport", CategoryType::Expense, "#1890ff"),
        ("expense-entertainment", "Entertainment", CategoryType::Expense, "#722ed1"),
        ("expense-health", "Health", CategoryType::Expense, "#eb2f96"),
        ("expense-utilities", "Utilities", CategoryType::Expense, "#13c2c2"),
        ("expense-insurance", "Insurance", CategoryType::Expense, "#faad14"),
        ("expense-education", "Education", CategoryType::Expense, "#2f54eb"),
        ("expense-other", "Other", CategoryType::Expense, "#8c8c8c"),
    ]
    .into_iter()
    .map(|(id, name, kind, color)| Category::new(id, name, kind, color))
    .collect()
}

/// The months before the one containing `today`, oldest first.
pub fn demo_months(today: NaiveDate) -> Vec<MonthKey> {
    let mut month = MonthKey::of(today);
    let mut months: Vec<MonthKey> = (0..DEMO_MONTHS)
        .map(|_| {
            month = month.previous();
            month
        })
        .collect();
    months.reverse();
    months
}

/// Transactions for every demo month, newest first.
pub fn demo_transactions(today: NaiveDate, categories: &[Category]) -> Vec<Transaction> {
    use TransactionType::{Expense, Income};

    let mut transactions = Vec::new();
    for (offset, month) in demo_months(today).into_iter().enumerate() {
        let wobble = |modulus: usize, step: f64| (offset % modulus) as f64 * step;

        let mut rows = vec![
            (25, "income-salary", 6_500.0, Income),
            (1, "expense-housing", 1_500.0, Expense),
            (3, "expense-food", 130.0 + wobble(4, 10.0), Expense),
            (10, "expense-food", 145.0, Expense),
            (17, "expense-food", 120.0 + wobble(3, 15.0), Expense),
            (24, "expense-food", 150.0, Expense),
            (5, "expense-transport", 80.0 + wobble(3, 20.0), Expense),
            (8, "expense-utilities", 180.0, Expense),
            (12, "expense-insurance", 400.0, Expense),
            (20, "expense-entertainment", 60.0 + wobble(4, 10.0), Expense),
            (14, "expense-health", 60.0, Expense),
            (27, "expense-other", 40.0, Expense),
        ];
        if offset % 2 == 0 {
            rows.push((15, "income-freelance", 900.0 + wobble(4, 250.0), Income));
        }
        if offset % 3 == 1 {
            rows.push((18, "income-investments", 300.0, Income));
        }
        if offset == DEMO_MONTHS - 1 {
            rows.push((9, SPIKE_CATEGORY, SPIKE_AMOUNT, Expense));
        }

        for (n, (day, category, amount, kind)) in rows.into_iter().enumerate() {
            let Some(date) = month.day(day) else {
                continue;
            };
            let description = format!("{} {month}", category_name(category, categories));
            transactions.push(
                Transaction::new(format!("demo-{month}-{n}"), date, amount, category, kind)
                    .with_description(description),
            );
        }
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// One monthly plan per demo month over the first budgeted expense categories.
pub fn demo_budgets(today: NaiveDate, categories: &[Category]) -> Vec<BudgetPlan> {
    demo_months(today)
        .into_iter()
        .filter_map(|month| {
            let start = month.day(1)?;
            let end = month.next().day(1)?.pred_opt()?;
            let plan = categories
                .iter()
                .filter(|category| category.kind == CategoryType::Expense)
                .take(BUDGETED_EXPENSES)
                .fold(
                    BudgetPlan::new(
                        format!("budget-{month}"),
                        format!("Budget {month}"),
                        BudgetPeriod::Monthly,
                        start,
                        end,
                    ),
                    |plan, category| plan.with_line(category.id.clone(), budget_amount(&category.id)),
                );
            Some(plan)
        })
        .collect()
}

fn budget_amount(category_id: &str) -> f64 {
    match category_id {
        "expense-housing" => 1_500.0,
        "expense-food" => 600.0,
        "expense-transport" => 200.0,
        "expense-utilities" => 180.0,
        "expense-insurance" => 400.0,
        "expense-entertainment" => 300.0,
        "expense-health" => 150.0,
        "expense-education" => 500.0,
        _ => 100.0,
    }
}
