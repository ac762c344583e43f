//! Holds the active alerts and their resolve/dismiss lifecycle.

use cashpilot_domain::Alert;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStore {
    alerts: Vec<Alert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_evaluated_at: Option<DateTime<Utc>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn last_evaluated_at(&self) -> Option<DateTime<Utc>> {
        self.last_evaluated_at
    }

    /// Replaces the whole set with a fresh evaluation batch.
    pub fn set_alerts(&mut self, alerts: Vec<Alert>, now: DateTime<Utc>) {
        self.alerts = alerts;
        self.last_evaluated_at = Some(now);
    }

    /// Appends `alert` unless one with the same id is already present.
    /// Returns whether it was added.
    pub fn add_alert(&mut self, alert: Alert, now: DateTime<Utc>) -> bool {
        if self.alerts.iter().any(|existing| existing.id == alert.id) {
            return false;
        }
        self.alerts.push(alert);
        self.last_evaluated_at = Some(now);
        true
    }

    /// Marks the alert resolved, keeping it in the set.
    pub fn resolve_alert(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.resolved = true;
                true
            }
            None => false,
        }
    }

    /// Removes the alert from the set.
    pub fn dismiss_alert(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    pub fn clear_all(&mut self) {
        self.alerts.clear();
        self.last_evaluated_at = None;
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.resolved).count()
    }

    pub fn active(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|alert| !alert.resolved)
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
