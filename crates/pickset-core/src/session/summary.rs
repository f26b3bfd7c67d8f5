//! Structured change summaries for the save, cancel and preview screens.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::change::Change;
use super::model::Session;
use crate::selection::{InterestId, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub interest_id: InterestId,
    pub interest_name: String,
    pub category: String,
}

impl From<&Change> for ChangeEntry {
    fn from(change: &Change) -> Self {
        Self {
            interest_id: change.interest_id,
            interest_name: change.interest_name.clone(),
            category: change.category.clone(),
        }
    }
}

/// Net effect of a session's edits, grouped by kind.
///
/// Every interest the ledger touches is reported by comparing its state in
/// the original snapshot with the working copy, so a re-added interest that
/// lost its primary flag shows up as a primary unset. Primary changes of
/// added or removed interests are folded into the membership change, except
/// that a newly added primary also lands in `primary_set`. Entries follow the
/// order of first appearance in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub added: Vec<ChangeEntry>,
    pub removed: Vec<ChangeEntry>,
    pub primary_set: Vec<ChangeEntry>,
    pub primary_unset: Vec<ChangeEntry>,
    /// Raw number of ledger entries
    pub total_changes: usize,
}

/// Membership and primary flag of one interest.
fn state_of(selections: &[Selection], interest_id: InterestId) -> Option<bool> {
    selections
        .iter()
        .find(|s| s.interest_id == interest_id)
        .map(|s| s.is_primary)
}

impl ChangeSummary {
    pub fn from_session(session: &Session) -> Self {
        let ledger = &session.change_ledger;
        let mut order: Vec<InterestId> = Vec::new();
        let mut latest: HashMap<InterestId, &Change> = HashMap::new();
        for change in ledger {
            if latest.insert(change.interest_id, change).is_none() {
                order.push(change.interest_id);
            }
        }

        let mut summary = ChangeSummary {
            total_changes: ledger.len(),
            ..Default::default()
        };

        for interest_id in order {
            let Some(&change) = latest.get(&interest_id) else {
                continue;
            };
            let before = state_of(session.original_selections(), interest_id);
            let after = state_of(&session.current_selections, interest_id);

            match (before, after) {
                (None, Some(primary)) => {
                    summary.added.push(change.into());
                    if primary {
                        summary.primary_set.push(change.into());
                    }
                }
                (Some(_), None) => summary.removed.push(change.into()),
                (Some(false), Some(true)) => summary.primary_set.push(change.into()),
                (Some(true), Some(false)) => summary.primary_unset.push(change.into()),
                _ => {}
            }
        }

        summary
    }

    /// True when the ledger nets out to no visible change.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.primary_set.is_empty()
            && self.primary_unset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Interest;
    use crate::selection::UserId;
    use crate::session::mutator;

    const USER: UserId = 1;

    fn interest(id: InterestId) -> Interest {
        Interest::new(id, format!("i{id}"), "sports", 0)
    }

    fn toggle(session: &mut Session, id: InterestId) {
        mutator::toggle_selection(session, &interest(id));
    }

    fn primary(session: &mut Session, id: InterestId) {
        mutator::toggle_primary(session, &interest(id), usize::MAX).unwrap();
    }

    fn ids(entries: &[ChangeEntry]) -> Vec<InterestId> {
        entries.iter().map(|e| e.interest_id).collect()
    }

    #[test]
    fn test_groups_by_kind_in_ledger_order() {
        let mut session = Session::new(
            USER,
            vec![Selection::new(USER, 1), Selection::primary(USER, 5)],
        );
        toggle(&mut session, 3);
        toggle(&mut session, 1);
        toggle(&mut session, 2);
        primary(&mut session, 2);
        primary(&mut session, 5);

        let summary = ChangeSummary::from_session(&session);

        assert_eq!(ids(&summary.added), vec![3, 2]);
        assert_eq!(ids(&summary.removed), vec![1]);
        assert_eq!(ids(&summary.primary_set), vec![2]);
        assert_eq!(ids(&summary.primary_unset), vec![5]);
        assert_eq!(summary.total_changes, 5);
    }

    #[test]
    fn test_add_then_remove_cancels_out() {
        let mut session = Session::new(USER, vec![]);
        toggle(&mut session, 1);
        toggle(&mut session, 1);

        let summary = ChangeSummary::from_session(&session);
        assert!(summary.is_empty());
        assert_eq!(summary.total_changes, 2);
    }

    #[test]
    fn test_primary_dropped_for_removed_interest() {
        let mut session = Session::new(USER, vec![Selection::primary(USER, 4)]);
        primary(&mut session, 4);
        toggle(&mut session, 4);

        let summary = ChangeSummary::from_session(&session);
        assert_eq!(ids(&summary.removed), vec![4]);
        assert!(summary.primary_unset.is_empty());
    }

    #[test]
    fn test_readd_after_set_primary_is_not_primary() {
        let mut session = Session::new(USER, vec![Selection::new(USER, 1)]);
        primary(&mut session, 1);
        toggle(&mut session, 1);
        toggle(&mut session, 1);

        assert!(!session.is_primary(1));
        let summary = ChangeSummary::from_session(&session);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_readd_of_primary_reports_demotion() {
        let mut session = Session::new(USER, vec![Selection::primary(USER, 1)]);
        toggle(&mut session, 1);
        toggle(&mut session, 1);

        let summary = ChangeSummary::from_session(&session);
        assert!(summary.added.is_empty());
        assert!(summary.removed.is_empty());
        assert_eq!(ids(&summary.primary_unset), vec![1]);
    }

    #[test]
    fn test_new_primary_is_added_and_set() {
        let mut session = Session::new(USER, vec![]);
        toggle(&mut session, 6);
        primary(&mut session, 6);

        let summary = ChangeSummary::from_session(&session);
        assert_eq!(ids(&summary.added), vec![6]);
        assert_eq!(ids(&summary.primary_set), vec![6]);
    }
}
