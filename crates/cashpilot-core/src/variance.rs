//! Plan-versus-actual comparison per category and month.

use std::collections::{BTreeMap, HashMap};

use cashpilot_domain::{BudgetPlan, MonthKey, Transaction};
use serde::{Deserialize, Serialize};

/// One plan line compared against the actual spend of a month.
///
/// `diff` is `plan - actual`: positive means under budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceRow {
    pub category_id: String,
    pub month: MonthKey,
    pub plan: f64,
    pub actual: f64,
    pub diff: f64,
    pub diff_pct: f64,
}

/// Sums `|amount|` per category and month over all transactions, regardless of type.
fn actuals_by_category_month(actuals: &[Transaction]) -> HashMap<&str, BTreeMap<MonthKey, f64>> {
    let mut index: HashMap<&str, BTreeMap<MonthKey, f64>> = HashMap::new();
    for txn in actuals {
        *index
            .entry(txn.category.as_str())
            .or_default()
            .entry(txn.month())
            .or_insert(0.0) += txn.magnitude();
    }
    index
}

/// Compares every plan line against each month in which its category has actual activity.
///
/// Plan dates are not consulted: a line is matched by category id alone and
/// repeated for every active month, so months without spend produce no row.
pub fn variance(plans: &[BudgetPlan], actuals: &[Transaction]) -> Vec<VarianceRow> {
    let index = actuals_by_category_month(actuals);
    let mut rows = Vec::new();

    for plan in plans {
        for line in &plan.categories {
            let Some(months) = index.get(line.category_id.as_str()) else {
                continue;
            };
            for (month, actual) in months {
                let diff = line.budgeted - actual;
                let diff_pct = if line.budgeted > 0.0 {
                    diff / line.budgeted * 100.0
                } else {
                    0.0
                };
                rows.push(VarianceRow {
                    category_id: line.category_id.clone(),
                    month: *month,
                    plan: line.budgeted,
                    actual: *actual,
                    diff,
                    diff_pct,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashpilot_domain::BudgetPeriod;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january_plan() -> BudgetPlan {
        BudgetPlan::new(
            "b1",
            "January",
            BudgetPeriod::Monthly,
            date(2024, 1, 1),
            date(2024, 1, 31),
        )
        .with_line("food", 200.0)
    }

    #[test]
    fn empty_inputs_yield_no_rows() {
        assert!(variance(&[], &[]).is_empty());
        assert!(variance(&[january_plan()], &[]).is_empty());
    }

    #[test]
    fn diff_is_plan_minus_actual() {
        let txns = vec![
            Transaction::expense("a", date(2024, 1, 5), 50.0, "food"),
            Transaction::expense("b", date(2024, 1, 9), 100.0, "food"),
        ];
        let rows = variance(&[january_plan()], &txns);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].actual, 150.0);
        assert_eq!(rows[0].diff, 50.0);
        assert_eq!(rows[0].diff_pct, 25.0);
    }

    #[test]
    fn line_is_repeated_for_every_active_month_ignoring_plan_dates() {
        let txns = vec![
            Transaction::expense("a", date(2024, 1, 5), 50.0, "food"),
            Transaction::expense("b", date(2024, 4, 9), 300.0, "food"),
            Transaction::expense("c", date(2024, 4, 9), 300.0, "rent"),
        ];
        let rows = variance(&[january_plan()], &txns);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month.to_string(), "2024-01");
        assert_eq!(rows[1].month.to_string(), "2024-04");
        assert_eq!(rows[1].diff, -100.0);
        assert_eq!(rows[1].diff_pct, -50.0);
    }

    #[test]
    fn zero_plan_reports_zero_percent() {
        let plan = january_plan().with_line("gifts", 0.0);
        let txns = vec![Transaction::expense("a", date(2024, 1, 5), 40.0, "gifts")];
        let rows = variance(&[plan], &txns);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].diff, -40.0);
        assert_eq!(rows[0].diff_pct, 0.0);
    }

    #[test]
    fn income_in_a_planned_category_counts_as_actual() {
        let txns = vec![Transaction::income("a", date(2024, 1, 5), 70.0, "food")];
        let rows = variance(&[january_plan()], &txns);
        assert_eq!(rows[0].actual, 70.0);
    }
}
