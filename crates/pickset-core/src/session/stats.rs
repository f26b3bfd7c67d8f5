//! Derived statistics over an edit session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::Session;
use crate::catalog::InterestIndex;

/// Number of selected interests per category key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<String, usize>);

impl CategoryCounts {
    pub fn get(&self, category_key: &str) -> usize {
        self.0.get(category_key).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, category_key: &str) {
        *self.0.entry(category_key.to_string()).or_insert(0) += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshot of a session's progress. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStats {
    pub total_selected: usize,
    pub primary_count: usize,
    pub category_counts: CategoryCounts,
    pub changes_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl EditStats {
    /// Computes stats from the working selections and the ledger.
    ///
    /// A selection is counted toward a category only when the catalog index
    /// says the interest belongs to it; unknown interests count toward the
    /// total but no category.
    pub fn compute(session: &Session, index: &InterestIndex) -> Self {
        let mut category_counts = CategoryCounts::default();
        for selection in &session.current_selections {
            if let Some(interest) = index.get(&selection.interest_id) {
                category_counts.increment(&interest.category_key);
            }
        }

        Self {
            total_selected: session.current_selections.len(),
            primary_count: session.primary_count(),
            category_counts,
            changes_count: session.changes_count(),
            last_updated: session.last_activity,
        }
    }
}
