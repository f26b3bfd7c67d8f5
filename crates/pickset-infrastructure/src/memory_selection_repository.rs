//! In-memory SelectionRepository implementation.

use async_trait::async_trait;
use pickset_core::error::Result;
use pickset_core::selection::{Selection, SelectionRepository, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Committed selections held in a process-local map.
#[derive(Clone, Default)]
pub struct InMemorySelectionRepository {
    selections: Arc<RwLock<HashMap<UserId, Vec<Selection>>>>,
}

impl InMemorySelectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with committed selections.
    pub fn with_selections(selections: HashMap<UserId, Vec<Selection>>) -> Self {
        Self {
            selections: Arc::new(RwLock::new(selections)),
        }
    }
}

#[async_trait]
impl SelectionRepository for InMemorySelectionRepository {
    async fn get_user_selections(&self, user_id: UserId) -> Result<Vec<Selection>> {
        let selections = self.selections.read().await;
        Ok(selections.get(&user_id).cloned().unwrap_or_default())
    }

    async fn replace_user_selections(
        &self,
        user_id: UserId,
        selections: &[Selection],
    ) -> Result<()> {
        let mut stored = self.selections.write().await;
        stored.insert(user_id, selections.to_vec());
        Ok(())
    }
}
