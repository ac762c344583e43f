#![allow(dead_code)]

use cashpilot::AppState;
use cashpilot_core::FixedClock;
use cashpilot_domain::{
    BudgetPeriod, BudgetPlan, Category, CategoryType, Frequency, RecurringTransaction,
    Transaction, TransactionType,
};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::new("salary", "Salary", CategoryType::Income, "#2563eb"),
        Category::new("rent", "Rent", CategoryType::Expense, "#dc2626"),
        Category::new("food", "Groceries", CategoryType::Expense, "#16a34a"),
    ]
}

pub fn january_budget() -> BudgetPlan {
    BudgetPlan::new(
        "plan-jan",
        "January",
        BudgetPeriod::Monthly,
        date(2024, 1, 1),
        date(2024, 1, 31),
    )
    .with_line("food", 100.0)
    .with_line("rent", 1_500.0)
}

pub fn rent_template() -> RecurringTransaction {
    RecurringTransaction::new(
        "rent-monthly",
        "Rent",
        Frequency::Monthly,
        1_450.0,
        "rent",
        TransactionType::Expense,
        date(2024, 3, 1),
    )
}

/// State pinned to 2024-03-01 with two months of history.
pub fn seeded_state() -> AppState {
    let mut state = AppState::default().with_clock(FixedClock::at_date(date(2024, 3, 1)));
    for category in categories() {
        state.add_category(category).expect("add category");
    }
    state.add_budget(january_budget()).expect("add budget");

    let rows = [
        Transaction::income("inc-jan", date(2024, 1, 1), 3_000.0, "salary"),
        Transaction::expense("rent-jan", date(2024, 1, 2), 1_450.0, "rent"),
        Transaction::expense("food-jan", date(2024, 1, 12), 120.0, "food"),
        Transaction::income("inc-feb", date(2024, 2, 1), 3_000.0, "salary"),
        Transaction::expense("rent-feb", date(2024, 2, 2), 1_450.0, "rent"),
        Transaction::expense("food-feb", date(2024, 2, 15), 90.0, "food"),
    ];
    for txn in rows {
        state.add_transaction(txn).expect("add transaction");
    }
    state
}
