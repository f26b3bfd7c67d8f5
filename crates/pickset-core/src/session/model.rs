//! Edit session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::change::ChangeLedger;
use crate::selection::{InterestId, Selection, UserId};

/// The single active editing transaction of one user.
///
/// A session holds:
/// - An immutable snapshot of the committed selections at start
/// - The working copy the user edits
/// - The change ledger for undo and summaries
/// - The category currently open in the UI, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    original_selections: Vec<Selection>,
    pub current_selections: Vec<Selection>,
    #[serde(default)]
    pub change_ledger: ChangeLedger,
    #[serde(default)]
    pub current_category: Option<String>,
    pub session_start: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Starts a session from a committed snapshot.
    pub fn new(user_id: UserId, snapshot: Vec<Selection>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            current_selections: snapshot.clone(),
            original_selections: snapshot,
            change_ledger: ChangeLedger::new(),
            current_category: None,
            session_start: now,
            last_activity: now,
        }
    }

    /// Committed selections at the time the session started.
    pub fn original_selections(&self) -> &[Selection] {
        &self.original_selections
    }

    pub fn selection(&self, interest_id: InterestId) -> Option<&Selection> {
        self.current_selections
            .iter()
            .find(|s| s.interest_id == interest_id)
    }

    pub fn is_selected(&self, interest_id: InterestId) -> bool {
        self.selection(interest_id).is_some()
    }

    pub fn is_primary(&self, interest_id: InterestId) -> bool {
        self.selection(interest_id).is_some_and(|s| s.is_primary)
    }

    pub fn primary_count(&self) -> usize {
        self.current_selections.iter().filter(|s| s.is_primary).count()
    }

    pub fn changes_count(&self) -> usize {
        self.change_ledger.len()
    }

    pub fn has_changes(&self) -> bool {
        !self.change_ledger.is_empty()
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_copies_snapshot() {
        let snapshot = vec![Selection::primary(7, 1), Selection::new(7, 2)];
        let mut session = Session::new(7, snapshot.clone());

        assert_eq!(session.original_selections(), snapshot.as_slice());
        assert_eq!(session.current_selections, snapshot);
        assert!(!session.has_changes());
        assert_eq!(session.primary_count(), 1);

        session.current_selections.clear();
        assert_eq!(session.original_selections().len(), 2);
    }

    #[test]
    fn test_session_survives_json_round_trip() {
        let mut session = Session::new(3, vec![Selection::new(3, 10)]);
        session.current_category = Some("music".to_string());

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
