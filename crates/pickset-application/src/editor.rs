//! Interest editor: the token table and its handlers.
//!
//! Every registered handler turns an interaction into a [`ScreenState`].
//! Domain errors are rendered as screens here and never reach the router:
//!
//! | Error / outcome            | Screen                                   |
//! |----------------------------|------------------------------------------|
//! | `SessionNotFound`          | session expired, restart offered         |
//! | `UpstreamFetch`            | unavailable, restart offered             |
//! | `PersistenceCommit`        | preview again with a commit-failed notice |
//! | unknown interest/category  | current screen with a notice             |
//! | unparseable parameter      | current screen with an invalid-input notice |
//! | `Rejection`                | same screen with the rejection as notice |

use async_trait::async_trait;
use pickset_core::catalog::InterestIndex;
use pickset_core::error::{PicksetError, Result};
use pickset_core::selection::{InterestId, UserId};
use pickset_core::session::{ChangeSummary, EditStats, Rejection, Session};
use std::sync::Arc;

use crate::engine::{EditOutcome, EditSessionEngine};
use crate::presenter;
use crate::router::{Dispatch, Interaction, TokenHandler, TokenRouter};
use crate::screen::{Notice, ScreenState};
use crate::tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorAction {
    StartEdit,
    EditPrimary,
    PreviewChanges,
    BackToCategories,
    Undo,
    Save,
    Cancel,
    EditCategory,
    TogglePrimary,
    ToggleInterest,
    MassSelect,
    MassClear,
}

/// Token registration table. Exact tokens come first, and no prefix is a
/// prefix of another, so each token resolves to exactly one action.
const EXACT_ROUTES: [(&str, EditorAction); 7] = [
    (tokens::START_EDIT, EditorAction::StartEdit),
    (tokens::EDIT_PRIMARY, EditorAction::EditPrimary),
    (tokens::PREVIEW_CHANGES, EditorAction::PreviewChanges),
    (tokens::BACK_TO_CATEGORIES, EditorAction::BackToCategories),
    (tokens::UNDO, EditorAction::Undo),
    (tokens::SAVE, EditorAction::Save),
    (tokens::CANCEL, EditorAction::Cancel),
];

const PREFIX_ROUTES: [(&str, EditorAction); 5] = [
    (tokens::EDIT_CATEGORY_PREFIX, EditorAction::EditCategory),
    (tokens::TOGGLE_PRIMARY_PREFIX, EditorAction::TogglePrimary),
    (tokens::TOGGLE_INTEREST_PREFIX, EditorAction::ToggleInterest),
    (tokens::MASS_SELECT_PREFIX, EditorAction::MassSelect),
    (tokens::MASS_CLEAR_PREFIX, EditorAction::MassClear),
];

/// Entry point for interactions with the interest editor.
pub struct InterestEditor {
    router: TokenRouter<ScreenState>,
}

impl InterestEditor {
    pub fn new(engine: Arc<EditSessionEngine>) -> Self {
        let screens = Arc::new(EditorScreens { engine });
        let mut router = TokenRouter::new();

        for (token, action) in EXACT_ROUTES {
            router.register_exact(
                token,
                ActionHandler {
                    screens: screens.clone(),
                    action,
                },
            );
        }
        for (prefix, action) in PREFIX_ROUTES {
            router.register_prefix(
                prefix,
                ActionHandler {
                    screens: screens.clone(),
                    action,
                },
            );
        }

        Self { router }
    }

    pub fn router(&self) -> &TokenRouter<ScreenState> {
        &self.router
    }

    /// Handles one interaction.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(screen))`: The screen to render
    /// - `Ok(None)`: The token belongs to no editor route and was ignored
    pub async fn handle(&self, interaction: &Interaction) -> Result<Option<ScreenState>> {
        match self.router.dispatch(interaction).await? {
            Dispatch::Handled(screen) => Ok(Some(screen)),
            Dispatch::NoMatch => Ok(None),
        }
    }
}

struct ActionHandler {
    screens: Arc<EditorScreens>,
    action: EditorAction,
}

#[async_trait]
impl TokenHandler<ScreenState> for ActionHandler {
    async fn handle(&self, interaction: &Interaction, param: Option<&str>) -> Result<ScreenState> {
        let user_id = interaction.user_id;
        let screen = match self.screens.run(self.action, user_id, param.unwrap_or("")).await {
            Ok(Some(screen)) => Ok(screen),
            Ok(None) => {
                tracing::info!(
                    user_id,
                    token = %interaction.token,
                    "[InterestEditor] Invalid token parameter"
                );
                self.screens
                    .current(user_id, Notice::InvalidInput {
                        token: interaction.token.clone(),
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        Ok(match screen {
            Ok(screen) => screen,
            Err(e) => self.screens.recover(user_id, e),
        })
    }
}

struct EditorScreens {
    engine: Arc<EditSessionEngine>,
}

impl EditorScreens {
    /// Runs one action. `Ok(None)` means the token parameter was unusable.
    async fn run(
        &self,
        action: EditorAction,
        user_id: UserId,
        param: &str,
    ) -> Result<Option<ScreenState>> {
        let screen = match action {
            EditorAction::StartEdit => {
                let session = self.engine.start_session(user_id).await?;
                self.categories(&session, None).await?
            }
            EditorAction::BackToCategories => {
                let session = self.engine.leave_category(user_id).await?;
                self.categories(&session, None).await?
            }
            EditorAction::EditPrimary => {
                let session = self.engine.get_session(user_id).await?;
                self.primary(&session, None).await?
            }
            EditorAction::PreviewChanges => {
                let session = self.engine.get_session(user_id).await?;
                self.preview(&session, None).await?
            }
            EditorAction::Undo => {
                let result = self.engine.undo(user_id).await?;
                let notice = match result.undone {
                    Some(change) => Notice::Undone {
                        action: change.action,
                        interest_name: change.interest_name,
                    },
                    None => Notice::NothingToUndo,
                };
                self.screen_for(&result.session, Some(notice)).await?
            }
            EditorAction::Save => self.save(user_id).await?,
            EditorAction::Cancel => {
                let discarded = self.engine.discard_session(user_id).await?;
                presenter::cancelled(discarded)
            }
            EditorAction::EditCategory => {
                let Some(category_key) = tokens::parse_category_key(param) else {
                    return Ok(None);
                };
                match self.engine.enter_category(user_id, category_key).await {
                    Ok(session) => self.category(&session, category_key, None).await?,
                    Err(e) if e.is_not_found() => {
                        self.current(
                            user_id,
                            Notice::UnknownCategory {
                                category_key: category_key.to_string(),
                            },
                        )
                        .await?
                    }
                    Err(e) => return Err(e),
                }
            }
            EditorAction::ToggleInterest => {
                let Some(interest_id) = tokens::parse_interest_id(param) else {
                    return Ok(None);
                };
                match self.engine.toggle_interest(user_id, interest_id).await {
                    Ok(result) => self.screen_for(&result.session, None).await?,
                    Err(e) => self.unknown_interest(user_id, interest_id, e).await?,
                }
            }
            EditorAction::TogglePrimary => {
                let Some(interest_id) = tokens::parse_interest_id(param) else {
                    return Ok(None);
                };
                match self.engine.toggle_primary(user_id, interest_id).await {
                    Ok(result) => {
                        let notice = match result.outcome {
                            EditOutcome::Rejected(rejection) => Some(rejection_notice(rejection)),
                            EditOutcome::Applied { .. } | EditOutcome::Unchanged => None,
                        };
                        self.primary(&result.session, notice).await?
                    }
                    Err(e) => self.unknown_interest(user_id, interest_id, e).await?,
                }
            }
            EditorAction::MassSelect | EditorAction::MassClear => {
                let Some(category_key) = tokens::parse_category_key(param) else {
                    return Ok(None);
                };
                let result = if action == EditorAction::MassSelect {
                    self.engine.mass_select(user_id, category_key).await?
                } else {
                    self.engine.mass_clear(user_id, category_key).await?
                };
                let notice =
                    (result.outcome == EditOutcome::Unchanged).then_some(Notice::NothingChanged);
                self.category(&result.session, category_key, notice).await?
            }
        };
        Ok(Some(screen))
    }

    async fn save(&self, user_id: UserId) -> Result<ScreenState> {
        let session = self.engine.get_session(user_id).await?;
        let summary = ChangeSummary::from_session(&session);

        match self.engine.commit_session(&session).await {
            Ok(changes) => Ok(presenter::saved(changes, summary)),
            Err(e) if e.is_persistence_commit() => {
                self.preview(&session, Some(Notice::CommitFailed)).await
            }
            Err(e) => Err(e),
        }
    }

    async fn unknown_interest(
        &self,
        user_id: UserId,
        interest_id: InterestId,
        error: PicksetError,
    ) -> Result<ScreenState> {
        if !error.is_not_found() {
            return Err(error);
        }
        self.current(user_id, Notice::UnknownInterest { interest_id })
            .await
    }

    /// Re-renders whatever screen the user's session points at.
    async fn current(&self, user_id: UserId, notice: Notice) -> Result<ScreenState> {
        let session = self.engine.get_session(user_id).await?;
        self.screen_for(&session, Some(notice)).await
    }

    async fn screen_for(&self, session: &Session, notice: Option<Notice>) -> Result<ScreenState> {
        match session.current_category.as_deref() {
            Some(category_key) => self.category(session, category_key, notice).await,
            None => self.categories(session, notice).await,
        }
    }

    async fn categories(&self, session: &Session, notice: Option<Notice>) -> Result<ScreenState> {
        let categories = self.engine.catalog().list_categories().await?;
        let index = self.engine.interest_index().await?;
        let stats = EditStats::compute(session, &index);
        Ok(presenter::categories(&categories, &index, session, stats).with_notice(notice))
    }

    async fn category(
        &self,
        session: &Session,
        category_key: &str,
        notice: Option<Notice>,
    ) -> Result<ScreenState> {
        let interests = self
            .engine
            .catalog()
            .list_interests_by_category(category_key)
            .await?;
        let stats = self.engine.stats(session).await?;
        Ok(presenter::category(category_key, &interests, session, stats).with_notice(notice))
    }

    async fn primary(&self, session: &Session, notice: Option<Notice>) -> Result<ScreenState> {
        let interests = self.engine.catalog().list_all_interests().await?;
        let limit = self.engine.primary_ceiling().await?;
        let index: InterestIndex = interests.iter().map(|i| (i.id, i.clone())).collect();
        let stats = EditStats::compute(session, &index);
        Ok(presenter::primary_picker(&interests, session, limit, stats).with_notice(notice))
    }

    async fn preview(&self, session: &Session, notice: Option<Notice>) -> Result<ScreenState> {
        let summary = ChangeSummary::from_session(session);
        let stats = self.engine.stats(session).await?;
        Ok(presenter::preview(summary, stats).with_notice(notice))
    }

    fn recover(&self, user_id: UserId, error: PicksetError) -> ScreenState {
        match error {
            PicksetError::SessionNotFound { .. } => {
                tracing::info!(user_id, "[InterestEditor] Session expired");
                presenter::session_expired()
            }
            PicksetError::UpstreamFetch(message) => {
                tracing::warn!(user_id, %message, "[InterestEditor] Could not start edit");
                presenter::unavailable().with_notice(Some(Notice::UpstreamUnavailable))
            }
            other => {
                tracing::error!(user_id, error = %other, "[InterestEditor] Interaction failed");
                presenter::unavailable().with_notice(Some(Notice::Failure))
            }
        }
    }
}

fn rejection_notice(rejection: Rejection) -> Notice {
    match rejection {
        Rejection::PrimaryLimitReached { limit } => Notice::PrimaryLimitReached { limit },
        Rejection::NotSelected { interest_id } => Notice::NotSelected { interest_id },
    }
}
