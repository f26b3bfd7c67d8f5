//! Selection repository trait.
//!
//! Defines the durable storage contract for a user's committed selections.

use async_trait::async_trait;

use super::model::{Selection, UserId};
use crate::error::Result;

/// Durable storage for committed selection sets.
///
/// The edit engine reads a snapshot once per session start and writes the
/// full working set once per successful commit.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Loads the committed selections of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Selection>)`: The committed set (empty for unknown users)
    /// - `Err(_)`: Storage could not be read
    async fn get_user_selections(&self, user_id: UserId) -> Result<Vec<Selection>>;

    /// Replaces the committed selections of a user.
    ///
    /// This is a full replace, not a diff: afterwards the stored set equals
    /// `selections` exactly.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owner of the selection set
    /// * `selections` - The complete new set
    async fn replace_user_selections(&self, user_id: UserId, selections: &[Selection])
    -> Result<()>;
}
