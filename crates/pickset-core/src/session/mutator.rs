//! Invariant-preserving edits of a session's working selections.
//!
//! Each successful mutation appends to the change ledger. Catalog metadata is
//! resolved by the caller and handed in, so everything here is synchronous and
//! free of I/O.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::change::{Change, ChangeAction};
use super::model::Session;
use crate::catalog::Interest;
use crate::error::{PicksetError, Result};
use crate::selection::{InterestId, Selection};

/// A normal, non-error refusal to apply an edit.
///
/// The session is left untouched and the caller re-renders the current
/// screen with a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The primary ceiling is already reached
    PrimaryLimitReached { limit: usize },
    /// Primary can only be toggled on a selected interest
    NotSelected { interest_id: InterestId },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryLimitReached { limit } => {
                write!(f, "primary limit reached (limit={limit})")
            }
            Self::NotSelected { interest_id } => {
                write!(f, "interest {interest_id} is not selected")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOutcome {
    Set,
    Unset,
}

/// Adds the interest if absent, removes it otherwise.
pub fn toggle_selection(session: &mut Session, interest: &Interest) -> ToggleOutcome {
    let position = session
        .current_selections
        .iter()
        .position(|s| s.interest_id == interest.id);

    match position {
        Some(index) => {
            session.current_selections.remove(index);
            session
                .change_ledger
                .record(Change::new(ChangeAction::Remove, interest));
            ToggleOutcome::Removed
        }
        None => {
            session
                .current_selections
                .push(Selection::new(session.user_id, interest.id));
            session
                .change_ledger
                .record(Change::new(ChangeAction::Add, interest));
            ToggleOutcome::Added
        }
    }
}

/// Flips the primary flag of an already selected interest.
///
/// Turning a flag on is refused once `primary_ceiling` primaries exist.
/// Turning it off is always allowed. Membership never changes.
pub fn toggle_primary(
    session: &mut Session,
    interest: &Interest,
    primary_ceiling: usize,
) -> std::result::Result<PrimaryOutcome, Rejection> {
    let primary_count = session.primary_count();
    let Some(selection) = session
        .current_selections
        .iter_mut()
        .find(|s| s.interest_id == interest.id)
    else {
        return Err(Rejection::NotSelected {
            interest_id: interest.id,
        });
    };

    if selection.is_primary {
        selection.is_primary = false;
        session
            .change_ledger
            .record(Change::new(ChangeAction::UnsetPrimary, interest));
        return Ok(PrimaryOutcome::Unset);
    }

    if primary_count >= primary_ceiling {
        return Err(Rejection::PrimaryLimitReached {
            limit: primary_ceiling,
        });
    }

    selection.is_primary = true;
    session
        .change_ledger
        .record(Change::new(ChangeAction::SetPrimary, interest));
    Ok(PrimaryOutcome::Set)
}

/// Selects every interest of a category that is not selected yet.
///
/// Returns the number of added selections; already selected interests
/// produce no change.
pub fn mass_select(session: &mut Session, category_interests: &[Interest]) -> usize {
    let mut present: HashSet<InterestId> = session
        .current_selections
        .iter()
        .map(|s| s.interest_id)
        .collect();

    let mut added = 0;
    for interest in category_interests {
        if !present.insert(interest.id) {
            continue;
        }
        session
            .current_selections
            .push(Selection::new(session.user_id, interest.id));
        session
            .change_ledger
            .record(Change::new(ChangeAction::Add, interest));
        added += 1;
    }
    added
}

/// Removes every selection whose interest is in `category_members`.
///
/// One `remove` change is recorded per removed selection whose metadata is
/// present in `metadata`. Selections without metadata are still removed but
/// leave no trace in the ledger.
pub fn mass_clear(
    session: &mut Session,
    category_members: &HashSet<InterestId>,
    metadata: &HashMap<InterestId, Interest>,
) -> usize {
    let (removed, kept): (Vec<Selection>, Vec<Selection>) =
        std::mem::take(&mut session.current_selections)
            .into_iter()
            .partition(|s| category_members.contains(&s.interest_id));
    session.current_selections = kept;

    for selection in &removed {
        match metadata.get(&selection.interest_id) {
            Some(interest) => session
                .change_ledger
                .record(Change::new(ChangeAction::Remove, interest)),
            None => tracing::warn!(
                user_id = session.user_id,
                interest_id = selection.interest_id,
                "Removed selection without metadata; no change recorded"
            ),
        }
    }
    removed.len()
}

/// Reverts the most recent change and drops it from the ledger.
///
/// A reverted `remove` re-adds the interest as non-primary, whatever its
/// flag was before removal. Returns `None` when there is nothing to undo.
pub fn undo(session: &mut Session) -> Option<Change> {
    let change = session.change_ledger.pop()?;
    let interest_id = change.interest_id;

    match change.action {
        ChangeAction::Add => {
            session
                .current_selections
                .retain(|s| s.interest_id != interest_id);
        }
        ChangeAction::Remove => {
            if !session.is_selected(interest_id) {
                session
                    .current_selections
                    .push(Selection::new(session.user_id, interest_id));
            }
        }
        ChangeAction::SetPrimary | ChangeAction::UnsetPrimary => {
            let restore_primary = change.action == ChangeAction::UnsetPrimary;
            if let Some(selection) = session
                .current_selections
                .iter_mut()
                .find(|s| s.interest_id == interest_id)
            {
                selection.is_primary = restore_primary;
            }
        }
    }
    Some(change)
}

/// Checks the working set before commit.
///
/// Any cardinality is accepted, including an empty set. Only a broken
/// uniqueness invariant is reported.
pub fn validate_selections(session: &Session) -> Result<()> {
    let mut seen = HashSet::with_capacity(session.current_selections.len());
    for selection in &session.current_selections {
        if !seen.insert(selection.interest_id) {
            return Err(PicksetError::internal(format!(
                "duplicate selection of interest {} for user {}",
                selection.interest_id, session.user_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interest(id: InterestId, category: &str) -> Interest {
        Interest::new(id, format!("interest_{id}"), category, id as i32)
    }

    fn membership(session: &Session) -> Vec<InterestId> {
        let mut ids: Vec<_> = session
            .current_selections
            .iter()
            .map(|s| s.interest_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn actions(session: &Session) -> Vec<(ChangeAction, InterestId)> {
        session
            .change_ledger
            .iter()
            .map(|c| (c.action, c.interest_id))
            .collect()
    }

    #[test]
    fn test_toggle_round_trip_restores_membership() {
        let mut session = Session::new(1, vec![Selection::new(1, 5)]);
        let before = membership(&session);

        assert_eq!(
            toggle_selection(&mut session, &interest(9, "music")),
            ToggleOutcome::Added
        );
        assert_eq!(
            toggle_selection(&mut session, &interest(9, "music")),
            ToggleOutcome::Removed
        );

        assert_eq!(membership(&session), before);
        assert_eq!(
            actions(&session),
            vec![(ChangeAction::Add, 9), (ChangeAction::Remove, 9)]
        );
    }

    #[test]
    fn test_toggle_adds_non_primary_selection() {
        let mut session = Session::new(1, Vec::new());
        toggle_selection(&mut session, &interest(3, "music"));
        assert_eq!(session.current_selections, vec![Selection::new(1, 3)]);
        let change = session.change_ledger.last().unwrap();
        assert_eq!(change.interest_name, "interest_3");
        assert_eq!(change.category, "music");
    }

    #[test]
    fn test_primary_ceiling_rejects_fifth_primary() {
        let ceiling = crate::config::PrimaryLimits::new(0.2, 3, 10).ceiling(20);
        assert_eq!(ceiling, 4);

        let snapshot = (1..=5).map(|id| Selection::new(1, id)).collect();
        let mut session = Session::new(1, snapshot);
        for id in 1..=4 {
            assert_eq!(
                toggle_primary(&mut session, &interest(id, "sports"), ceiling),
                Ok(PrimaryOutcome::Set)
            );
        }

        let rejected = toggle_primary(&mut session, &interest(5, "sports"), ceiling);
        assert_eq!(rejected, Err(Rejection::PrimaryLimitReached { limit: 4 }));
        assert_eq!(session.primary_count(), 4);
        assert_eq!(session.changes_count(), 4);
        assert!(!session.is_primary(5));
    }

    #[test]
    fn test_unset_primary_is_allowed_above_ceiling() {
        let snapshot = vec![Selection::primary(1, 1), Selection::primary(1, 2)];
        let mut session = Session::new(1, snapshot);

        assert_eq!(
            toggle_primary(&mut session, &interest(1, "sports"), 0),
            Ok(PrimaryOutcome::Unset)
        );
        assert_eq!(session.primary_count(), 1);
        assert_eq!(actions(&session), vec![(ChangeAction::UnsetPrimary, 1)]);
    }

    #[test]
    fn test_primary_toggle_requires_selection() {
        let mut session = Session::new(1, Vec::new());
        assert_eq!(
            toggle_primary(&mut session, &interest(8, "sports"), 10),
            Err(Rejection::NotSelected { interest_id: 8 })
        );
        assert!(session.current_selections.is_empty());
        assert!(!session.has_changes());
    }

    #[test]
    fn test_mass_select_is_idempotent() {
        let sports = vec![
            interest(1, "sports"),
            interest(2, "sports"),
            interest(3, "sports"),
        ];
        let mut session = Session::new(1, vec![Selection::primary(1, 2)]);

        assert_eq!(mass_select(&mut session, &sports), 2);
        let after_first = session.current_selections.clone();
        let changes_after_first = session.changes_count();

        assert_eq!(mass_select(&mut session, &sports), 0);
        assert_eq!(session.current_selections, after_first);
        assert_eq!(session.changes_count(), changes_after_first);
        assert_eq!(
            actions(&session),
            vec![(ChangeAction::Add, 1), (ChangeAction::Add, 3)]
        );
        assert!(session.is_primary(2));
    }

    #[test]
    fn test_mass_clear_only_touches_category() {
        let snapshot = vec![
            Selection::new(1, 1),
            Selection::primary(1, 2),
            Selection::new(1, 10),
        ];
        let mut session = Session::new(1, snapshot);
        let members: HashSet<_> = [1, 2, 3].into_iter().collect();
        let metadata: HashMap<_, _> = [(1, interest(1, "sports")), (2, interest(2, "sports"))]
            .into_iter()
            .collect();

        assert_eq!(mass_clear(&mut session, &members, &metadata), 2);
        assert_eq!(membership(&session), vec![10]);
        assert_eq!(
            actions(&session),
            vec![(ChangeAction::Remove, 1), (ChangeAction::Remove, 2)]
        );
    }

    #[test]
    fn test_mass_clear_without_metadata_removes_silently() {
        let mut session = Session::new(1, vec![Selection::new(1, 1), Selection::new(1, 2)]);
        let members: HashSet<_> = [1, 2].into_iter().collect();
        let metadata: HashMap<_, _> = [(2, interest(2, "sports"))].into_iter().collect();

        assert_eq!(mass_clear(&mut session, &members, &metadata), 2);
        assert!(session.current_selections.is_empty());
        assert_eq!(actions(&session), vec![(ChangeAction::Remove, 2)]);
    }

    #[test]
    fn test_undo_inverts_last_change_only() {
        let mut session = Session::new(1, Vec::new());
        toggle_selection(&mut session, &interest(1, "sports"));
        toggle_selection(&mut session, &interest(2, "sports"));
        toggle_selection(&mut session, &interest(1, "sports"));
        assert_eq!(
            actions(&session),
            vec![
                (ChangeAction::Add, 1),
                (ChangeAction::Add, 2),
                (ChangeAction::Remove, 1)
            ]
        );

        let undone = undo(&mut session).unwrap();
        assert_eq!(undone.action, ChangeAction::Remove);
        assert_eq!(membership(&session), vec![1, 2]);
        assert!(!session.is_primary(1));
        assert_eq!(
            actions(&session),
            vec![(ChangeAction::Add, 1), (ChangeAction::Add, 2)]
        );

        undo(&mut session);
        assert_eq!(membership(&session), vec![1]);
        assert_eq!(actions(&session), vec![(ChangeAction::Add, 1)]);
    }

    #[test]
    fn test_undo_of_removed_primary_restores_non_primary() {
        let mut session = Session::new(1, vec![Selection::primary(1, 4)]);
        toggle_selection(&mut session, &interest(4, "sports"));
        undo(&mut session);
        assert!(session.is_selected(4));
        assert!(!session.is_primary(4));
    }

    #[test]
    fn test_undo_primary_changes() {
        let mut session = Session::new(1, vec![Selection::new(1, 4)]);
        toggle_primary(&mut session, &interest(4, "sports"), 5).unwrap();
        toggle_primary(&mut session, &interest(4, "sports"), 5).unwrap();
        assert!(!session.is_primary(4));

        undo(&mut session);
        assert!(session.is_primary(4));
        undo(&mut session);
        assert!(!session.is_primary(4));
        assert!(!session.has_changes());
    }

    #[test]
    fn test_undo_on_empty_ledger_is_noop() {
        let mut session = Session::new(1, vec![Selection::new(1, 1)]);
        assert!(undo(&mut session).is_none());
        assert_eq!(membership(&session), vec![1]);
    }

    #[test]
    fn test_validation_accepts_empty_set() {
        let session = Session::new(1, Vec::new());
        assert!(validate_selections(&session).is_ok());
    }

    #[test]
    fn test_validation_reports_duplicates() {
        let mut session = Session::new(1, Vec::new());
        session.current_selections = vec![Selection::new(1, 1), Selection::primary(1, 1)];
        assert!(validate_selections(&session).is_err());
    }
}
