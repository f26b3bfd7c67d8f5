//! Structural screen descriptions.
//!
//! A screen carries no prose. Labels and notices are tagged values that the
//! rendering layer localizes.

use pickset_core::selection::InterestId;
use pickset_core::session::{ChangeAction, ChangeSummary, EditStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenKind {
    Categories,
    Category { category_key: String },
    PrimaryPicker { limit: usize },
    Preview,
    Saved { changes: usize },
    Cancelled { discarded_changes: usize },
    SessionExpired,
    /// The flow could not continue; only a restart is offered
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionLabel {
    StartEdit,
    EditPrimary,
    Preview,
    Back,
    Undo,
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonLabel {
    /// Category with its selection progress
    Category {
        category_key: String,
        selected: usize,
        total: usize,
    },
    Interest {
        key_name: String,
        selected: bool,
        primary: bool,
    },
    SelectAll { category_key: String },
    ClearAll { category_key: String },
    Action { action: ActionLabel },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: ButtonLabel,
    pub token: String,
}

impl Button {
    pub fn new(label: ButtonLabel, token: impl Into<String>) -> Self {
        Self {
            label,
            token: token.into(),
        }
    }

    pub fn action(action: ActionLabel, token: &str) -> Self {
        Self::new(ButtonLabel::Action { action }, token)
    }
}

/// Message shown above the buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    PrimaryLimitReached { limit: usize },
    NotSelected { interest_id: InterestId },
    NothingToUndo,
    Undone {
        action: ChangeAction,
        interest_name: String,
    },
    NothingChanged,
    InvalidInput { token: String },
    UnknownInterest { interest_id: InterestId },
    UnknownCategory { category_key: String },
    /// Committed selections could not be loaded
    UpstreamUnavailable,
    /// Save failed; the session is kept and the save can be retried
    CommitFailed,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenState {
    pub kind: ScreenKind,
    /// Path of screen keys from the root, e.g. `["edit", "sports"]`
    pub breadcrumb: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<EditStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ChangeSummary>,
    /// Rows of buttons
    pub buttons: Vec<Vec<Button>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl ScreenState {
    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        if notice.is_some() {
            self.notice = notice;
        }
        self
    }

    /// All buttons in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().flatten()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.buttons().any(|b| b.token == token)
    }
}
