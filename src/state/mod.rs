//! In-memory application state: the collections, the active config and the
//! alert set, plus the selectors and mutations the surface layers call.

mod demo;
mod snapshot;

use std::collections::{HashMap, HashSet};

use cashpilot_config::{AppConfig, ConfigManager};
use cashpilot_core::{
    aggregate_by_month, category_totals, default_rules, evaluate_with_rules, import, period_trends,
    recurring, variance, AlertRule, AlertState, AlertStore, CategoryTotal, Clock, CoreError,
    MonthlyAggregates, SystemClock, Trends, VarianceRow,
};
use cashpilot_domain::{
    Alert, BudgetPlan, Category, Displayable, Identifiable, MonthKey, NamedEntity,
    RecurringTransaction, Transaction,
};
use tracing::{debug, info, warn};

use crate::errors::AppError;

pub use demo::{demo_budgets, demo_categories, demo_months, demo_transactions, DEMO_MONTHS};
pub use snapshot::DataSnapshot;

/// Outcome of [`AppState::commit_imported_transactions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    /// Rows matching a stored transaction by date, amount and description.
    pub duplicates: usize,
    /// Rows with a blank id, a non-finite amount or an id already in use.
    pub rejected: usize,
}

/// Owns every collection the engine reads.
///
/// Single-item mutations and bulk operations mark alert evaluation as
/// pending; [`AppState::settle`] runs it once the caller is done mutating.
/// [`AppState::refresh_alerts`] evaluates immediately.
pub struct AppState {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    budgets: Vec<BudgetPlan>,
    recurrings: Vec<RecurringTransaction>,
    config: AppConfig,
    alerts: AlertStore,
    clock: Box<dyn Clock>,
    evaluation_pending: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("transactions", &self.transactions.len())
            .field("categories", &self.categories.len())
            .field("budgets", &self.budgets.len())
            .field("recurrings", &self.recurrings.len())
            .field("alerts", &self.alerts.len())
            .field("evaluation_pending", &self.evaluation_pending)
            .finish()
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
            recurrings: Vec::new(),
            config,
            alerts: AlertStore::new(),
            clock: Box::new(SystemClock),
            evaluation_pending: false,
        }
    }

    /// Replaces the wall clock, typically with a `FixedClock` in tests.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn from_config_manager(manager: &ConfigManager) -> Result<Self, AppError> {
        let config = manager.load()?;
        Ok(Self::new(config))
    }

    pub fn save_config(&self, manager: &ConfigManager) -> Result<(), AppError> {
        manager.save(&self.config)?;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Swaps the active config. Thresholds may have moved, so evaluation is
    /// marked pending.
    pub fn set_config(&mut self, config: AppConfig) {
        self.config = config;
        self.evaluation_pending = true;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[BudgetPlan] {
        &self.budgets
    }

    pub fn recurrings(&self) -> &[RecurringTransaction] {
        &self.recurrings
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn is_evaluation_pending(&self) -> bool {
        self.evaluation_pending
    }

    // Transactions

    pub fn add_transaction(&mut self, mut txn: Transaction) -> Result<(), CoreError> {
        validate_transaction(&txn)?;
        if self.transactions.iter().any(|existing| existing.id == txn.id) {
            return Err(CoreError::Validation(format!(
                "transaction `{}` already exists",
                txn.id
            )));
        }
        txn.amount = txn.amount.abs();
        debug!(transaction = %txn.display_label(), "transaction added");
        self.transactions.push(txn);
        self.evaluation_pending = true;
        Ok(())
    }

    pub fn update_transaction(&mut self, mut txn: Transaction) -> Result<(), CoreError> {
        validate_transaction(&txn)?;
        txn.amount = txn.amount.abs();
        let slot = find_mut(&mut self.transactions, &txn.id)
            .ok_or_else(|| CoreError::TransactionNotFound(txn.id.clone()))?;
        *slot = txn;
        self.evaluation_pending = true;
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction, CoreError> {
        let removed = take(&mut self.transactions, id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        self.evaluation_pending = true;
        Ok(removed)
    }

    /// Appends the imported rows that are valid and not already stored.
    ///
    /// Amounts are normalised before matching, so a signed export of a stored
    /// row is recognised as a duplicate.
    pub fn commit_imported_transactions(&mut self, batch: Vec<Transaction>) -> ImportSummary {
        let offered = batch.len();
        let (valid, mut rejected) = admit_valid(batch);
        let candidates = valid.len();
        let unique = import::dedupe_imported(&self.transactions, valid);
        let duplicates = candidates - unique.len();

        let mut ids: HashSet<String> = self.transactions.iter().map(|t| t.id.clone()).collect();
        let admitted = keep_unique_ids(unique, &mut ids, &mut rejected);
        let summary = ImportSummary {
            added: admitted.len(),
            duplicates,
            rejected,
        };

        self.transactions.extend(admitted);
        info!(
            offered,
            added = summary.added,
            duplicates,
            rejected,
            "imported transactions committed"
        );
        self.evaluation_pending = true;
        summary
    }

    // Categories

    pub fn add_category(&mut self, category: Category) -> Result<(), CoreError> {
        if category.id.trim().is_empty() {
            return Err(CoreError::Validation("category id must not be empty".into()));
        }
        if self.categories.iter().any(|existing| existing.id == category.id) {
            return Err(CoreError::Validation(format!(
                "category `{}` already exists",
                category.id
            )));
        }
        debug!(category = %category.display_label(), "category added");
        self.categories.push(category);
        self.evaluation_pending = true;
        Ok(())
    }

    pub fn update_category(&mut self, category: Category) -> Result<(), CoreError> {
        let slot = find_mut(&mut self.categories, &category.id)
            .ok_or_else(|| CoreError::CategoryNotFound(category.id.clone()))?;
        *slot = category;
        self.evaluation_pending = true;
        Ok(())
    }

    /// Removes the category. Transactions pointing at it keep the dangling id.
    pub fn remove_category(&mut self, id: &str) -> Result<Category, CoreError> {
        let removed = take(&mut self.categories, id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))?;
        self.evaluation_pending = true;
        Ok(removed)
    }

    // Budgets

    pub fn add_budget(&mut self, budget: BudgetPlan) -> Result<(), CoreError> {
        if budget.id.trim().is_empty() {
            return Err(CoreError::Validation("budget id must not be empty".into()));
        }
        if self.budgets.iter().any(|existing| existing.id == budget.id) {
            return Err(CoreError::Validation(format!(
                "budget `{}` already exists",
                budget.id
            )));
        }
        debug!(
            budget = %budget.display_label(),
            total = budget.total_budgeted(),
            "budget added"
        );
        self.budgets.push(budget);
        self.evaluation_pending = true;
        Ok(())
    }

    pub fn update_budget(&mut self, budget: BudgetPlan) -> Result<(), CoreError> {
        let slot = find_mut(&mut self.budgets, &budget.id)
            .ok_or_else(|| CoreError::BudgetNotFound(budget.id.clone()))?;
        *slot = budget;
        self.evaluation_pending = true;
        Ok(())
    }

    pub fn remove_budget(&mut self, id: &str) -> Result<BudgetPlan, CoreError> {
        let removed =
            take(&mut self.budgets, id).ok_or_else(|| CoreError::BudgetNotFound(id.to_string()))?;
        self.evaluation_pending = true;
        Ok(removed)
    }

    // Recurring templates

    pub fn add_recurring(&mut self, mut template: RecurringTransaction) -> Result<(), CoreError> {
        if template.id.trim().is_empty() {
            return Err(CoreError::Validation(
                "recurring transaction id must not be empty".into(),
            ));
        }
        if !template.amount.is_finite() {
            return Err(CoreError::Validation(format!(
                "recurring transaction `{}` has a non-finite amount",
                template.id
            )));
        }
        if self.recurrings.iter().any(|existing| existing.id == template.id) {
            return Err(CoreError::Validation(format!(
                "recurring transaction `{}` already exists",
                template.id
            )));
        }
        template.amount = template.amount.abs();
        self.recurrings.push(template);
        Ok(())
    }

    pub fn remove_recurring(&mut self, id: &str) -> Result<RecurringTransaction, CoreError> {
        take(&mut self.recurrings, id).ok_or_else(|| CoreError::RecurringNotFound(id.to_string()))
    }

    /// Flips `is_active` and returns the new value.
    pub fn toggle_recurring(&mut self, id: &str) -> Result<bool, CoreError> {
        let template = find_mut(&mut self.recurrings, id)
            .ok_or_else(|| CoreError::RecurringNotFound(id.to_string()))?;
        template.is_active = !template.is_active;
        Ok(template.is_active)
    }

    /// Materialises every template due today, advances their schedules and
    /// returns the number of transactions generated.
    pub fn apply_due_recurring(&mut self) -> usize {
        let today = self.clock.today();
        let generated = recurring::generate_due_transactions(&self.recurrings, today);
        if generated.is_empty() {
            return 0;
        }

        for template in self.recurrings.iter_mut().filter(|t| t.is_due(today)) {
            recurring::advance(template);
            debug!(
                recurring = template.name(),
                next = %template.next_occurrence,
                "recurring transaction advanced"
            );
        }

        let count = generated.len();
        info!(count, %today, "recurring transactions generated");
        self.transactions.extend(generated);
        self.evaluation_pending = true;
        count
    }

    // Bulk

    /// Replaces each collection present in `snapshot`; absent ones are kept.
    ///
    /// Transactions that fail validation or repeat an earlier id are skipped.
    /// Returns how many were skipped.
    pub fn import_data(&mut self, snapshot: DataSnapshot) -> usize {
        let mut rejected = 0;
        if let Some(transactions) = snapshot.transactions {
            let (valid, invalid) = admit_valid(transactions);
            rejected = invalid;
            self.transactions = keep_unique_ids(valid, &mut HashSet::new(), &mut rejected);
        }
        if let Some(categories) = snapshot.categories {
            self.categories = categories;
        }
        if let Some(budgets) = snapshot.budgets {
            self.budgets = budgets;
        }
        if let Some(recurrings) = snapshot.recurrings {
            self.recurrings = recurrings;
        }
        if let Some(config) = snapshot.config {
            self.config = config;
        }
        info!(
            transactions = self.transactions.len(),
            categories = self.categories.len(),
            budgets = self.budgets.len(),
            rejected,
            "data imported"
        );
        self.evaluation_pending = true;
        rejected
    }

    /// Replaces categories, transactions and budgets with sample data for the
    /// twelve months before the clock's current month. Recurring templates
    /// and the config are kept.
    pub fn load_demo_data(&mut self) {
        let today = self.clock.today();
        let categories = demo_categories();
        self.transactions = demo_transactions(today, &categories);
        self.budgets = demo_budgets(today, &categories);
        self.categories = categories;
        info!(
            transactions = self.transactions.len(),
            budgeted = self
                .budgets
                .iter()
                .map(BudgetPlan::total_budgeted)
                .sum::<f64>(),
            "demo data loaded"
        );
        self.evaluation_pending = true;
    }

    /// Full snapshot of the current data, suitable for [`AppState::import_data`].
    pub fn export_data(&self) -> DataSnapshot {
        DataSnapshot::default()
            .with_transactions(self.transactions.clone())
            .with_categories(self.categories.clone())
            .with_budgets(self.budgets.clone())
            .with_recurrings(self.recurrings.clone())
            .with_config(self.config.clone())
    }

    /// Drops every collection and alert. The config is kept.
    pub fn clear_data(&mut self) {
        self.transactions.clear();
        self.categories.clear();
        self.budgets.clear();
        self.recurrings.clear();
        self.alerts.clear_all();
        self.evaluation_pending = false;
        info!("data cleared");
    }

    // Selectors

    pub fn monthly_aggregates(&self) -> MonthlyAggregates {
        aggregate_by_month(&self.transactions)
    }

    pub fn variance(&self) -> Vec<VarianceRow> {
        variance(&self.budgets, &self.transactions)
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        category_totals(&self.transactions)
    }

    /// Lower-cased category name to id, for matching free-text input.
    pub fn category_index(&self) -> HashMap<String, String> {
        self.categories
            .iter()
            .map(|category| (category.name.to_lowercase(), category.id.clone()))
            .collect()
    }

    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        cashpilot_domain::category_name(id, &self.categories)
    }

    /// Trends for `month` against the month before it.
    pub fn trends_for(&self, month: MonthKey) -> Trends {
        period_trends(&self.monthly_aggregates(), month)
    }

    // Alerts

    /// Evaluates the default rules and replaces the alert set. Returns the
    /// size of the new set.
    pub fn refresh_alerts(&mut self) -> usize {
        self.evaluate_with(&default_rules())
    }

    /// Evaluates `rules` and replaces the alert set with the result.
    pub fn evaluate_with(&mut self, rules: &[Box<dyn AlertRule>]) -> usize {
        let now = self.clock.now();
        let batch = {
            let state = AlertState::new(
                &self.transactions,
                &self.budgets,
                &self.categories,
                &self.config,
            );
            evaluate_with_rules(&state, rules, now)
        };
        let count = batch.len();
        self.alerts.set_alerts(batch, now);
        self.evaluation_pending = false;
        info!(count, "alerts replaced");
        count
    }

    /// Runs the pending evaluation, if any. Returns the new alert count when
    /// an evaluation ran.
    pub fn settle(&mut self) -> Option<usize> {
        if !self.evaluation_pending {
            return None;
        }
        Some(self.refresh_alerts())
    }

    pub fn add_alert(&mut self, alert: Alert) -> bool {
        let now = self.clock.now();
        debug!(alert = %alert.display_label(), "alert added");
        self.alerts.add_alert(alert, now)
    }

    pub fn resolve_alert(&mut self, id: &str) -> Result<(), CoreError> {
        if self.alerts.resolve_alert(id) {
            Ok(())
        } else {
            Err(CoreError::AlertNotFound(id.to_string()))
        }
    }

    pub fn dismiss_alert(&mut self, id: &str) -> Result<(), CoreError> {
        if self.alerts.dismiss_alert(id) {
            Ok(())
        } else {
            Err(CoreError::AlertNotFound(id.to_string()))
        }
    }

    pub fn unread_alert_count(&self) -> usize {
        self.alerts.unread_count()
    }
}

fn validate_transaction(txn: &Transaction) -> Result<(), CoreError> {
    if txn.id.trim().is_empty() {
        return Err(CoreError::Validation(
            "transaction id must not be empty".into(),
        ));
    }
    if !txn.amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "transaction `{}` has a non-finite amount",
            txn.id
        )));
    }
    Ok(())
}

/// Drops rows that fail validation and normalises the rest to magnitudes.
fn admit_valid(batch: Vec<Transaction>) -> (Vec<Transaction>, usize) {
    let mut rejected = 0;
    let valid: Vec<Transaction> = batch
        .into_iter()
        .filter_map(|mut txn| match validate_transaction(&txn) {
            Ok(()) => {
                txn.amount = txn.amount.abs();
                Some(txn)
            }
            Err(err) => {
                warn!(error = %err, "imported transaction skipped");
                rejected += 1;
                None
            }
        })
        .collect();
    (valid, rejected)
}

/// Keeps the first row for every id not already in `ids`.
fn keep_unique_ids(
    rows: Vec<Transaction>,
    ids: &mut HashSet<String>,
    rejected: &mut usize,
) -> Vec<Transaction> {
    rows.into_iter()
        .filter(|txn| {
            if ids.insert(txn.id.clone()) {
                return true;
            }
            warn!(
                transaction = %txn.display_label(),
                id = %txn.id,
                "imported transaction skipped: id already in use"
            );
            *rejected += 1;
            false
        })
        .collect()
}

fn find_mut<'a, T: Identifiable>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn take<T: Identifiable>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}
