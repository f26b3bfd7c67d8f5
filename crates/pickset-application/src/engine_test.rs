use pickset_core::selection::Selection;
use pickset_core::session::{ChangeAction, Rejection};
use std::sync::atomic::Ordering;

use crate::engine::EditOutcome;
use crate::test_support::{USER, fixture, session_key};

#[tokio::test]
async fn test_start_session_seeds_from_committed_snapshot() {
    let fx = fixture(vec![Selection::new(USER, 1), Selection::primary(USER, 5)]);

    let session = fx.engine.start_session(USER).await.unwrap();

    assert_eq!(session.original_selections().to_vec(), session.current_selections);
    assert_eq!(session.current_selections.len(), 2);
    assert!(session.change_ledger.is_empty());
    assert!(fx.store.stored(&session_key(USER)).is_some());
}

#[tokio::test]
async fn test_start_session_upstream_failure_creates_nothing() {
    let fx = fixture(vec![]);
    fx.selections.fail_reads.store(true, Ordering::SeqCst);

    let err = fx.engine.start_session(USER).await.unwrap_err();

    assert!(err.is_upstream_fetch());
    assert!(fx.store.stored(&session_key(USER)).is_none());
}

#[tokio::test]
async fn test_start_session_replaces_existing_session() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();
    fx.engine.toggle_interest(USER, 1).await.unwrap();

    let restarted = fx.engine.start_session(USER).await.unwrap();

    assert!(restarted.current_selections.is_empty());
    assert!(restarted.change_ledger.is_empty());
}

#[tokio::test]
async fn test_expired_session_is_not_found() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();
    fx.store.expire(&session_key(USER));

    let err = fx.engine.toggle_interest(USER, 1).await.unwrap_err();
    assert!(err.is_session_not_found());

    // No silent recreation
    assert!(fx.store.stored(&session_key(USER)).is_none());
}

#[tokio::test]
async fn test_toggle_interest_twice_restores_membership() {
    let fx = fixture(vec![Selection::new(USER, 2)]);
    fx.engine.start_session(USER).await.unwrap();

    fx.engine.toggle_interest(USER, 1).await.unwrap();
    let result = fx.engine.toggle_interest(USER, 1).await.unwrap();

    assert_eq!(result.outcome, EditOutcome::Applied { changes: 1 });
    assert_eq!(result.session.current_selections, vec![Selection::new(USER, 2)]);
    assert_eq!(result.session.changes_count(), 2);
    assert_eq!(fx.store.stored(&session_key(USER)).unwrap(), result.session);
}

#[tokio::test]
async fn test_toggle_unknown_interest_is_not_found() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();

    let err = fx.engine.toggle_interest(USER, 999).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_toggle_primary_respects_ceiling() {
    let fx = fixture(vec![
        Selection::primary(USER, 1),
        Selection::primary(USER, 2),
        Selection::new(USER, 3),
    ]);
    fx.engine.start_session(USER).await.unwrap();
    let writes_before = fx.store.set_count();

    let result = fx.engine.toggle_primary(USER, 3).await.unwrap();

    assert_eq!(
        result.outcome,
        EditOutcome::Rejected(Rejection::PrimaryLimitReached { limit: 2 })
    );
    assert!(!result.session.is_primary(3));
    assert!(result.session.change_ledger.is_empty());
    assert_eq!(fx.store.set_count(), writes_before);
}

#[tokio::test]
async fn test_unset_primary_always_allowed() {
    let fx = fixture(vec![Selection::primary(USER, 1), Selection::primary(USER, 2)]);
    fx.engine.start_session(USER).await.unwrap();

    let result = fx.engine.toggle_primary(USER, 1).await.unwrap();

    assert_eq!(result.outcome, EditOutcome::Applied { changes: 1 });
    assert_eq!(result.session.primary_count(), 1);
    assert_eq!(
        result.session.change_ledger.last().map(|c| c.action),
        Some(ChangeAction::UnsetPrimary)
    );
}

#[tokio::test]
async fn test_toggle_primary_on_unselected_is_rejected() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();

    let result = fx.engine.toggle_primary(USER, 4).await.unwrap();

    assert_eq!(
        result.outcome,
        EditOutcome::Rejected(Rejection::NotSelected { interest_id: 4 })
    );
    assert!(result.session.current_selections.is_empty());
}

#[tokio::test]
async fn test_mass_select_skips_existing_and_records_adds() {
    let fx = fixture(vec![Selection::primary(USER, 2)]);
    fx.engine.start_session(USER).await.unwrap();

    let result = fx.engine.mass_select(USER, "sports").await.unwrap();

    assert_eq!(result.outcome, EditOutcome::Applied { changes: 3 });
    assert_eq!(result.session.current_selections.len(), 4);
    // Existing primary flag is untouched
    assert!(result.session.is_primary(2));

    let again = fx.engine.mass_select(USER, "sports").await.unwrap();
    assert_eq!(again.outcome, EditOutcome::Unchanged);
    assert_eq!(again.session.changes_count(), 3);
}

#[tokio::test]
async fn test_mass_clear_removes_only_category_members() {
    let fx = fixture(vec![
        Selection::new(USER, 1),
        Selection::primary(USER, 3),
        Selection::new(USER, 5),
    ]);
    fx.engine.start_session(USER).await.unwrap();

    let result = fx.engine.mass_clear(USER, "sports").await.unwrap();

    assert_eq!(result.outcome, EditOutcome::Applied { changes: 2 });
    assert_eq!(result.session.current_selections, vec![Selection::new(USER, 5)]);
    assert!(
        result
            .session
            .change_ledger
            .iter()
            .all(|c| c.action == ChangeAction::Remove)
    );
}

#[tokio::test]
async fn test_mass_clear_with_failed_lookup_still_removes() {
    let fx = fixture(vec![Selection::new(USER, 1), Selection::new(USER, 2)]);
    fx.catalog.broken_lookups.lock().unwrap().insert(2);
    fx.engine.start_session(USER).await.unwrap();

    let result = fx.engine.mass_clear(USER, "sports").await.unwrap();

    assert!(result.session.current_selections.is_empty());
    assert_eq!(result.session.changes_count(), 1);
    assert_eq!(
        result.session.change_ledger.last().map(|c| c.interest_id),
        Some(1)
    );
}

#[tokio::test]
async fn test_undo_reverts_last_change() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();
    fx.engine.toggle_interest(USER, 6).await.unwrap();
    fx.engine.toggle_primary(USER, 6).await.unwrap();

    let result = fx.engine.undo(USER).await.unwrap();
    assert_eq!(
        result.undone.map(|c| c.action),
        Some(ChangeAction::SetPrimary)
    );
    assert!(result.session.is_selected(6));
    assert!(!result.session.is_primary(6));

    let result = fx.engine.undo(USER).await.unwrap();
    assert!(!result.session.is_selected(6));

    let result = fx.engine.undo(USER).await.unwrap();
    assert!(result.undone.is_none());
    assert!(result.session.change_ledger.is_empty());
}

#[tokio::test]
async fn test_undo_of_remove_restores_as_non_primary() {
    let fx = fixture(vec![Selection::primary(USER, 7)]);
    fx.engine.start_session(USER).await.unwrap();
    fx.engine.toggle_interest(USER, 7).await.unwrap();

    let result = fx.engine.undo(USER).await.unwrap();

    assert_eq!(result.session.selection(7), Some(&Selection::new(USER, 7)));
}

#[tokio::test]
async fn test_commit_replaces_and_ends_session() {
    let fx = fixture(vec![Selection::new(USER, 1)]);
    fx.engine.start_session(USER).await.unwrap();
    fx.engine.toggle_interest(USER, 1).await.unwrap();
    let result = fx.engine.toggle_interest(USER, 8).await.unwrap();

    let changes = fx.engine.commit_session(&result.session).await.unwrap();

    assert_eq!(changes, 2);
    assert_eq!(
        fx.selections.committed_for(USER),
        Some(vec![Selection::new(USER, 8)])
    );
    assert!(fx.engine.get_session(USER).await.unwrap_err().is_session_not_found());
}

#[tokio::test]
async fn test_commit_failure_keeps_session_for_retry() {
    let fx = fixture(vec![Selection::new(USER, 1)]);
    fx.engine.start_session(USER).await.unwrap();
    let result = fx.engine.toggle_interest(USER, 8).await.unwrap();
    fx.selections.fail_writes.store(true, Ordering::SeqCst);

    let err = fx.engine.commit_session(&result.session).await.unwrap_err();

    assert!(err.is_persistence_commit());
    assert_eq!(
        fx.selections.committed_for(USER),
        Some(vec![Selection::new(USER, 1)])
    );
    let kept = fx.engine.get_session(USER).await.unwrap();
    assert_eq!(kept.current_selections, result.session.current_selections);

    fx.selections.fail_writes.store(false, Ordering::SeqCst);
    assert_eq!(fx.engine.commit_session(&kept).await.unwrap(), 1);
}

#[tokio::test]
async fn test_commit_of_empty_set_is_allowed() {
    let fx = fixture(vec![Selection::new(USER, 1)]);
    fx.engine.start_session(USER).await.unwrap();
    let result = fx.engine.toggle_interest(USER, 1).await.unwrap();

    fx.engine.commit_session(&result.session).await.unwrap();

    assert_eq!(fx.selections.committed_for(USER), Some(vec![]));
}

#[tokio::test]
async fn test_commit_survives_failed_session_delete() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();
    let result = fx.engine.toggle_interest(USER, 3).await.unwrap();
    fx.store.fail_delete.store(true, Ordering::SeqCst);

    let changes = fx.engine.commit_session(&result.session).await.unwrap();

    assert_eq!(changes, 1);
    assert_eq!(
        fx.selections.committed_for(USER),
        Some(vec![Selection::new(USER, 3)])
    );
}

#[tokio::test]
async fn test_discard_reports_dropped_changes() {
    let fx = fixture(vec![Selection::new(USER, 1)]);
    fx.engine.start_session(USER).await.unwrap();
    fx.engine.toggle_interest(USER, 2).await.unwrap();
    fx.engine.toggle_interest(USER, 3).await.unwrap();

    assert_eq!(fx.engine.discard_session(USER).await.unwrap(), 2);
    assert_eq!(
        fx.selections.committed_for(USER),
        Some(vec![Selection::new(USER, 1)])
    );
    assert_eq!(fx.engine.discard_session(USER).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_failure_is_swallowed() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();
    fx.store.fail_set.store(true, Ordering::SeqCst);

    let result = fx.engine.toggle_interest(USER, 1).await.unwrap();

    assert!(result.session.is_selected(1));
    // The stored copy is stale
    assert!(
        fx.store
            .stored(&session_key(USER))
            .unwrap()
            .current_selections
            .is_empty()
    );
}

#[tokio::test]
async fn test_enter_and_leave_category() {
    let fx = fixture(vec![]);
    fx.engine.start_session(USER).await.unwrap();

    let session = fx.engine.enter_category(USER, "music").await.unwrap();
    assert_eq!(session.current_category.as_deref(), Some("music"));

    let err = fx.engine.enter_category(USER, "cooking").await.unwrap_err();
    assert!(err.is_not_found());

    let session = fx.engine.leave_category(USER).await.unwrap();
    assert_eq!(session.current_category, None);
}

#[tokio::test]
async fn test_stats_count_by_category() {
    let fx = fixture(vec![
        Selection::new(USER, 1),
        Selection::primary(USER, 2),
        Selection::new(USER, 9),
    ]);
    let session = fx.engine.start_session(USER).await.unwrap();

    let stats = fx.engine.stats(&session).await.unwrap();

    assert_eq!(stats.total_selected, 3);
    assert_eq!(stats.primary_count, 1);
    assert_eq!(stats.category_counts.get("sports"), 2);
    assert_eq!(stats.category_counts.get("music"), 1);
    assert_eq!(fx.engine.primary_ceiling().await.unwrap(), 2);
}
