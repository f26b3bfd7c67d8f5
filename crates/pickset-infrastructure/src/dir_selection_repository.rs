//! Directory-backed SelectionRepository implementation.

use async_trait::async_trait;
use pickset_core::error::Result;
use pickset_core::selection::{Selection, SelectionRepository, UserId};
use std::path::{Path, PathBuf};

use crate::storage::AtomicJsonFile;

/// Stores each user's committed selections as `<base_dir>/<user_id>.json`.
///
/// A replace writes the whole file atomically, so a failed commit leaves the
/// previous set intact.
pub struct DirSelectionRepository {
    base_dir: PathBuf,
}

impl DirSelectionRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_for(&self, user_id: UserId) -> AtomicJsonFile<Vec<Selection>> {
        AtomicJsonFile::new(self.base_dir.join(format!("{}.json", user_id)))
    }
}

#[async_trait]
impl SelectionRepository for DirSelectionRepository {
    async fn get_user_selections(&self, user_id: UserId) -> Result<Vec<Selection>> {
        Ok(self.file_for(user_id).load().await?.unwrap_or_default())
    }

    async fn replace_user_selections(
        &self,
        user_id: UserId,
        selections: &[Selection],
    ) -> Result<()> {
        self.file_for(user_id).save(&selections.to_vec()).await?;
        tracing::debug!(
            user_id,
            count = selections.len(),
            "[DirSelectionRepository] Replaced selections"
        );
        Ok(())
    }
}
