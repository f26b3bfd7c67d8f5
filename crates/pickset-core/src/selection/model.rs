//! Selection domain model.

use serde::{Deserialize, Serialize};

/// Identifier of the user owning selections and edit sessions.
pub type UserId = i64;

/// Stable catalog identifier of an interest.
pub type InterestId = i64;

/// One interest chosen by a user.
///
/// Within a session's working set there is at most one `Selection` per
/// `(user_id, interest_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub user_id: UserId,
    pub interest_id: InterestId,
    #[serde(default)]
    pub is_primary: bool,
}

impl Selection {
    /// Creates a non-primary selection.
    pub fn new(user_id: UserId, interest_id: InterestId) -> Self {
        Self {
            user_id,
            interest_id,
            is_primary: false,
        }
    }

    /// Creates a selection flagged as primary.
    pub fn primary(user_id: UserId, interest_id: InterestId) -> Self {
        Self {
            user_id,
            interest_id,
            is_primary: true,
        }
    }
}
