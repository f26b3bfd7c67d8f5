//! Directory-backed SessionStore implementation.
//!
//! Each key maps to one JSON file holding the session together with its
//! wall-clock expiry, so sessions survive a process restart until their TTL
//! runs out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pickset_core::error::{PicksetError, Result};
use pickset_core::session::{Session, SessionStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{AtomicJsonFile, file_stem_for_key};

/// On-disk envelope of a stored session.
#[derive(Debug, Serialize, Deserialize)]
struct SessionEnvelope {
    expires_at: DateTime<Utc>,
    session: Session,
}

/// A session store that keeps one JSON file per key.
///
/// # Directory Structure
///
/// ```text
/// <base_dir>/
/// ├── edit_session_42.json
/// └── edit_session_77.json
/// ```
pub struct DirSessionStore {
    base_dir: PathBuf,
}

impl DirSessionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_for(&self, key: &str) -> AtomicJsonFile<SessionEnvelope> {
        let file_name = format!("{}.json", file_stem_for_key(key));
        AtomicJsonFile::new(self.base_dir.join(file_name))
    }

    /// Removes the file of `key` if it still holds an expired envelope.
    ///
    /// The envelope is re-read first, so a `set` that refreshed the key after
    /// the caller saw it expired is left alone. Returns whether a file was
    /// removed.
    async fn evict_if_expired(&self, key: &str) -> bool {
        let file = self.file_for(key);
        match file.load().await {
            Ok(Some(envelope)) if Utc::now() >= envelope.expires_at => {}
            Ok(_) => return false,
            Err(e) => {
                tracing::warn!(key, error = %e, "[DirSessionStore] Failed to re-read session");
                return false;
            }
        }

        tracing::debug!(key, "[DirSessionStore] Evicting expired session");
        match file.remove().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "[DirSessionStore] Failed to evict session");
                false
            }
        }
    }
}

#[async_trait]
impl SessionStore for DirSessionStore {
    async fn set(&self, key: &str, session: &Session, ttl: Duration) -> Result<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| PicksetError::store(format!("Invalid TTL for {}: {}", key, e)))?;
        let envelope = SessionEnvelope {
            expires_at: Utc::now() + ttl,
            session: session.clone(),
        };
        self.file_for(key)
            .save(&envelope)
            .await
            .map_err(|e| PicksetError::store(format!("Failed to write session {}: {}", key, e)))
    }

    async fn get(&self, key: &str) -> Result<Option<Session>> {
        let file = self.file_for(key);
        let envelope = file
            .load()
            .await
            .map_err(|e| PicksetError::store(format!("Failed to read session {}: {}", key, e)))?;

        match envelope {
            None => Ok(None),
            Some(envelope) if Utc::now() >= envelope.expires_at => {
                self.evict_if_expired(key).await;
                Ok(None)
            }
            Some(envelope) => Ok(Some(envelope.session)),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.file_for(key)
            .remove()
            .await
            .map_err(|e| PicksetError::store(format!("Failed to delete session {}: {}", key, e)))
    }
}
