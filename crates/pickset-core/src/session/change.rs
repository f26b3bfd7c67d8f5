//! Change ledger types.
//!
//! Every mutation of a session's working selections appends exactly one
//! [`Change`]. The ledger is the only input to undo and to the save/cancel
//! summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::catalog::Interest;
use crate::selection::InterestId;

/// Kind of an atomic edit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChangeAction {
    Add,
    Remove,
    SetPrimary,
    UnsetPrimary,
}

impl ChangeAction {
    /// The action that reverts this one.
    pub fn inverse(self) -> Self {
        match self {
            ChangeAction::Add => ChangeAction::Remove,
            ChangeAction::Remove => ChangeAction::Add,
            ChangeAction::SetPrimary => ChangeAction::UnsetPrimary,
            ChangeAction::UnsetPrimary => ChangeAction::SetPrimary,
        }
    }

    pub fn is_membership(self) -> bool {
        matches!(self, ChangeAction::Add | ChangeAction::Remove)
    }
}

/// A recorded atomic edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub action: ChangeAction,
    pub interest_id: InterestId,
    /// Localization key of the interest at the time of the edit
    pub interest_name: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl Change {
    pub fn new(action: ChangeAction, interest: &Interest) -> Self {
        Self {
            action,
            interest_id: interest.id,
            interest_name: interest.key_name.clone(),
            category: interest.category_key.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only (except for undo) list of changes within one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLedger {
    entries: Vec<Change>,
}

impl ChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, change: Change) {
        self.entries.push(change);
    }

    /// Removes and returns the most recent change. Used only by undo.
    pub fn pop(&mut self) -> Option<Change> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&Change> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Change] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a ChangeLedger {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
