//! Session store trait.
//!
//! Defines the keyed, TTL-bounded storage of active edit sessions.

use async_trait::async_trait;
use std::time::Duration;

use super::model::Session;
use crate::error::Result;

/// Ephemeral key/value storage for edit sessions.
///
/// The store holds no business logic. Every `set` restarts the entry's TTL,
/// so expiry is measured from the last write. Expired entries must read as
/// absent.
///
/// Reads and writes are not coordinated with each other: a
/// read-modify-write cycle by two concurrent callers ends with the later
/// `set` winning.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a session under `key` for `ttl`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Session stored
    /// - `Err(_)`: The store could not be written
    async fn set(&self, key: &str, session: &Session, ttl: Duration) -> Result<()>;

    /// Reads the session stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Live session found
    /// - `Ok(None)`: Absent or expired
    /// - `Err(_)`: The store could not be read
    async fn get(&self, key: &str) -> Result<Option<Session>>;

    /// Deletes the session stored under `key`.
    ///
    /// Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
