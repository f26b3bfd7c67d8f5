//! Edit session engine.
//!
//! Orchestrates the lifecycle of the single edit session each user may have:
//! start, resume, update, commit and discard. Sessions live only in the
//! injected [`SessionStore`]; the engine itself keeps no per-user state.
//!
//! ```text
//! NoSession ──start──▶ Active ──commit──▶ NoSession
//!                       │  ▲    ──discard─▶ NoSession
//!                       └──┘    ──TTL────▶ (reads as SessionNotFound)
//!                     mutations
//! ```

use pickset_core::catalog::{CatalogRepository, Interest, InterestIndex};
use pickset_core::config::{PrimaryLimits, SessionSettings};
use pickset_core::error::{PicksetError, Result};
use pickset_core::selection::{InterestId, SelectionRepository, UserId};
use pickset_core::session::mutator;
use pickset_core::session::{Change, EditStats, Rejection, Session, SessionStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// What an edit operation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The working set changed; `changes` ledger entries were appended
    Applied { changes: usize },
    /// Nothing to do (e.g. mass-select on a fully selected category)
    Unchanged,
    /// Refused by an invariant; the session was not modified
    Rejected(Rejection),
}

/// Session after an edit plus what the edit did.
#[derive(Debug, Clone)]
pub struct EditResult {
    pub session: Session,
    pub outcome: EditOutcome,
}

/// Session after an undo plus the reverted change, if there was one.
#[derive(Debug, Clone)]
pub struct UndoResult {
    pub session: Session,
    pub undone: Option<Change>,
}

/// Lifecycle and consistency of per-user edit sessions.
///
/// # Concurrency
///
/// Every operation is a `get → mutate → set` cycle against the store with no
/// locking in between. Two concurrent operations for the same user race and
/// the later write wins.
pub struct EditSessionEngine {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogRepository>,
    selections: Arc<dyn SelectionRepository>,
    primary_limits: PrimaryLimits,
    session_settings: SessionSettings,
}

impl EditSessionEngine {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `store` - Ephemeral storage of active sessions
    /// * `catalog` - Read-only categories and interests
    /// * `selections` - Durable storage of committed selections
    /// * `primary_limits` - Bounds of the primary ceiling
    /// * `session_settings` - TTL and store key prefix
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn CatalogRepository>,
        selections: Arc<dyn SelectionRepository>,
        primary_limits: PrimaryLimits,
        session_settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            selections,
            primary_limits,
            session_settings,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogRepository> {
        &self.catalog
    }

    fn key(&self, user_id: UserId) -> String {
        self.session_settings.key_for(user_id)
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Starts a fresh session seeded with the user's committed selections.
    ///
    /// An existing session of the user is replaced.
    ///
    /// # Errors
    ///
    /// - `UpstreamFetch` if the committed snapshot cannot be loaded; no
    ///   session is created in that case
    /// - `Store` if the new session cannot be written
    pub async fn start_session(&self, user_id: UserId) -> Result<Session> {
        let snapshot = self
            .selections
            .get_user_selections(user_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "[EditSessionEngine] Snapshot fetch failed");
                PicksetError::upstream_fetch(format!(
                    "failed to load selections of user {}: {}",
                    user_id, e
                ))
            })?;

        let session = Session::new(user_id, snapshot);
        self.store
            .set(&self.key(user_id), &session, self.session_settings.ttl())
            .await?;

        tracing::info!(
            user_id,
            selections = session.current_selections.len(),
            "[EditSessionEngine] Session started"
        );
        Ok(session)
    }

    /// Loads the active session of a user.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` if there is no session or it expired. Callers must
    /// send the user back to the start of the flow rather than recreate it.
    pub async fn get_session(&self, user_id: UserId) -> Result<Session> {
        self.store
            .get(&self.key(user_id))
            .await?
            .ok_or_else(|| PicksetError::session_not_found(user_id))
    }

    /// Refreshes activity and writes the session back with a fresh TTL.
    ///
    /// Best-effort: a failed write is logged and otherwise ignored, the
    /// caller's copy stays authoritative for the current response.
    pub async fn update_session(&self, session: &mut Session) {
        session.touch();
        let key = self.key(session.user_id);
        if let Err(e) = self
            .store
            .set(&key, session, self.session_settings.ttl())
            .await
        {
            tracing::warn!(
                user_id = session.user_id,
                error = %e,
                "[EditSessionEngine] Session write failed; next read may be stale"
            );
        }
    }

    /// Commits the working selections as a full replace and ends the session.
    ///
    /// # Returns
    ///
    /// The number of ledger entries the session had.
    ///
    /// # Errors
    ///
    /// `PersistenceCommit` if the durable write fails. The stored session is
    /// left as it was, so the commit can be retried.
    pub async fn commit_session(&self, session: &Session) -> Result<usize> {
        mutator::validate_selections(session)?;

        self.selections
            .replace_user_selections(session.user_id, &session.current_selections)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = session.user_id,
                    error = %e,
                    "[EditSessionEngine] Commit failed; session kept for retry"
                );
                PicksetError::persistence_commit(e.to_string())
            })?;

        if let Err(e) = self.store.delete(&self.key(session.user_id)).await {
            tracing::warn!(
                user_id = session.user_id,
                error = %e,
                "[EditSessionEngine] Committed session could not be deleted"
            );
        }

        let changes = session.changes_count();
        tracing::info!(
            user_id = session.user_id,
            changes,
            selections = session.current_selections.len(),
            "[EditSessionEngine] Session committed"
        );
        Ok(changes)
    }

    /// Drops the user's session without touching durable storage.
    ///
    /// # Returns
    ///
    /// The number of ledger entries that were discarded, `0` when there was
    /// no session.
    pub async fn discard_session(&self, user_id: UserId) -> Result<usize> {
        let key = self.key(user_id);
        let changes = match self.store.get(&key).await {
            Ok(session) => session.map_or(0, |s| s.changes_count()),
            Err(e) => {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "[EditSessionEngine] Could not read session before discard"
                );
                0
            }
        };
        self.store.delete(&key).await?;

        tracing::info!(user_id, changes, "[EditSessionEngine] Session discarded");
        Ok(changes)
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Marks a category as the one currently open.
    pub async fn enter_category(&self, user_id: UserId, category_key: &str) -> Result<Session> {
        let mut session = self.get_session(user_id).await?;
        let categories = self.catalog.list_categories().await?;
        if !categories.iter().any(|c| c.key == category_key) {
            return Err(PicksetError::not_found("Category", category_key));
        }

        session.current_category = Some(category_key.to_string());
        self.update_session(&mut session).await;
        Ok(session)
    }

    /// Returns to the category overview.
    pub async fn leave_category(&self, user_id: UserId) -> Result<Session> {
        let mut session = self.get_session(user_id).await?;
        session.current_category = None;
        self.update_session(&mut session).await;
        Ok(session)
    }

    // ============================================================================
    // Edits
    // ============================================================================

    /// Selects or deselects one interest.
    pub async fn toggle_interest(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<EditResult> {
        let mut session = self.get_session(user_id).await?;
        let interest = self.resolve_interest(interest_id).await?;

        let toggled = mutator::toggle_selection(&mut session, &interest);
        tracing::debug!(user_id, interest_id, ?toggled, "[EditSessionEngine] Interest toggled");

        self.update_session(&mut session).await;
        Ok(EditResult {
            session,
            outcome: EditOutcome::Applied { changes: 1 },
        })
    }

    /// Flips the primary flag of a selected interest.
    ///
    /// A refusal (ceiling reached, interest not selected) is returned as
    /// [`EditOutcome::Rejected`] and leaves the stored session untouched.
    pub async fn toggle_primary(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<EditResult> {
        let mut session = self.get_session(user_id).await?;
        let interest = self.resolve_interest(interest_id).await?;

        // Unsetting is always allowed, so the catalog is only consulted when setting.
        let ceiling = if session.is_primary(interest_id) {
            usize::MAX
        } else {
            self.primary_ceiling().await?
        };

        match mutator::toggle_primary(&mut session, &interest, ceiling) {
            Ok(toggled) => {
                tracing::debug!(
                    user_id,
                    interest_id,
                    ?toggled,
                    "[EditSessionEngine] Primary toggled"
                );
                self.update_session(&mut session).await;
                Ok(EditResult {
                    session,
                    outcome: EditOutcome::Applied { changes: 1 },
                })
            }
            Err(rejection) => {
                tracing::info!(
                    user_id,
                    interest_id,
                    %rejection,
                    "[EditSessionEngine] Primary toggle rejected"
                );
                Ok(EditResult {
                    session,
                    outcome: EditOutcome::Rejected(rejection),
                })
            }
        }
    }

    /// Selects every interest of a category.
    pub async fn mass_select(&self, user_id: UserId, category_key: &str) -> Result<EditResult> {
        let mut session = self.get_session(user_id).await?;
        let interests = self.catalog.list_interests_by_category(category_key).await?;

        let added = mutator::mass_select(&mut session, &interests);
        tracing::debug!(user_id, category_key, added, "[EditSessionEngine] Mass select");

        self.update_session(&mut session).await;
        Ok(EditResult {
            session,
            outcome: applied_or_unchanged(added),
        })
    }

    /// Deselects every interest of a category.
    pub async fn mass_clear(&self, user_id: UserId, category_key: &str) -> Result<EditResult> {
        let mut session = self.get_session(user_id).await?;
        let members: HashSet<InterestId> = self
            .catalog
            .list_interests_by_category(category_key)
            .await?
            .into_iter()
            .map(|i| i.id)
            .collect();

        // Names for the ledger come from by-id lookups; a failed lookup only
        // costs the ledger entry, never the removal.
        let mut metadata = HashMap::new();
        for selection in &session.current_selections {
            if !members.contains(&selection.interest_id) {
                continue;
            }
            match self.catalog.get_interest_by_id(selection.interest_id).await {
                Ok(Some(interest)) => {
                    metadata.insert(interest.id, interest);
                }
                Ok(None) => tracing::warn!(
                    user_id,
                    interest_id = selection.interest_id,
                    "[EditSessionEngine] Interest metadata missing during mass clear"
                ),
                Err(e) => tracing::warn!(
                    user_id,
                    interest_id = selection.interest_id,
                    error = %e,
                    "[EditSessionEngine] Interest lookup failed during mass clear"
                ),
            }
        }

        let removed = mutator::mass_clear(&mut session, &members, &metadata);
        tracing::debug!(user_id, category_key, removed, "[EditSessionEngine] Mass clear");

        self.update_session(&mut session).await;
        Ok(EditResult {
            session,
            outcome: applied_or_unchanged(removed),
        })
    }

    /// Reverts the most recent change.
    pub async fn undo(&self, user_id: UserId) -> Result<UndoResult> {
        let mut session = self.get_session(user_id).await?;

        let undone = mutator::undo(&mut session);
        match &undone {
            Some(change) => tracing::debug!(
                user_id,
                interest_id = change.interest_id,
                action = %change.action,
                "[EditSessionEngine] Change undone"
            ),
            None => tracing::debug!(user_id, "[EditSessionEngine] Nothing to undo"),
        }

        self.update_session(&mut session).await;
        Ok(UndoResult { session, undone })
    }

    // ============================================================================
    // Derived state
    // ============================================================================

    /// Maximum number of primaries for the current catalog size.
    pub async fn primary_ceiling(&self) -> Result<usize> {
        let total = self.catalog.list_all_interests().await?.len();
        Ok(self.primary_limits.ceiling(total))
    }

    /// All catalog interests keyed by id.
    pub async fn interest_index(&self) -> Result<InterestIndex> {
        Ok(self
            .catalog
            .list_all_interests()
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect())
    }

    pub async fn stats(&self, session: &Session) -> Result<EditStats> {
        let index = self.interest_index().await?;
        Ok(EditStats::compute(session, &index))
    }

    async fn resolve_interest(&self, interest_id: InterestId) -> Result<Interest> {
        self.catalog
            .get_interest_by_id(interest_id)
            .await?
            .ok_or_else(|| PicksetError::interest_not_found(interest_id))
    }
}

fn applied_or_unchanged(changes: usize) -> EditOutcome {
    if changes == 0 {
        EditOutcome::Unchanged
    } else {
        EditOutcome::Applied { changes }
    }
}
