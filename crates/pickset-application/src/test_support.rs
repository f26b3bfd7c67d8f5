//! Hand-written collaborators for unit tests.

use async_trait::async_trait;
use pickset_core::catalog::{CatalogRepository, Category, Interest};
use pickset_core::config::{PrimaryLimits, SessionSettings};
use pickset_core::error::{PicksetError, Result};
use pickset_core::selection::{InterestId, Selection, SelectionRepository, UserId};
use pickset_core::session::{Session, SessionStore};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::engine::EditSessionEngine;

/// Session store backed by a map; expiry is simulated with `expire`.
#[derive(Default)]
pub struct MockSessionStore {
    pub sessions: Mutex<HashMap<String, Session>>,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
    pub set_calls: Mutex<usize>,
}

impl MockSessionStore {
    pub fn expire(&self, key: &str) {
        self.sessions.lock().unwrap().remove(key);
    }

    pub fn stored(&self, key: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(key).cloned()
    }

    pub fn set_count(&self) -> usize {
        *self.set_calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set(&self, key: &str, session: &Session, _ttl: Duration) -> Result<()> {
        *self.set_calls.lock().unwrap() += 1;
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(PicksetError::store("store unavailable"));
        }
        self.sessions
            .lock()
            .unwrap()
            .insert(key.to_string(), session.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(PicksetError::store("store unavailable"));
        }
        self.sessions.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Committed selections with switchable read/write failures.
#[derive(Default)]
pub struct MockSelectionRepository {
    pub committed: Mutex<HashMap<UserId, Vec<Selection>>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MockSelectionRepository {
    pub fn with(user_id: UserId, selections: Vec<Selection>) -> Self {
        let repo = Self::default();
        repo.committed.lock().unwrap().insert(user_id, selections);
        repo
    }

    pub fn committed_for(&self, user_id: UserId) -> Option<Vec<Selection>> {
        self.committed.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl SelectionRepository for MockSelectionRepository {
    async fn get_user_selections(&self, user_id: UserId) -> Result<Vec<Selection>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PicksetError::internal("database offline"));
        }
        Ok(self.committed_for(user_id).unwrap_or_default())
    }

    async fn replace_user_selections(
        &self,
        user_id: UserId,
        selections: &[Selection],
    ) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PicksetError::internal("database offline"));
        }
        self.committed
            .lock()
            .unwrap()
            .insert(user_id, selections.to_vec());
        Ok(())
    }
}

/// Static catalog; ids listed in `broken_lookups` fail `get_interest_by_id`.
pub struct MockCatalog {
    pub categories: Vec<Category>,
    pub interests: Vec<Interest>,
    pub broken_lookups: Mutex<HashSet<InterestId>>,
}

#[async_trait]
impl CatalogRepository for MockCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn list_interests_by_category(&self, category_key: &str) -> Result<Vec<Interest>> {
        Ok(self
            .interests
            .iter()
            .filter(|i| i.category_key == category_key)
            .cloned()
            .collect())
    }

    async fn get_interest_by_id(&self, interest_id: InterestId) -> Result<Option<Interest>> {
        if self.broken_lookups.lock().unwrap().contains(&interest_id) {
            return Err(PicksetError::internal("catalog lookup failed"));
        }
        Ok(self.interests.iter().find(|i| i.id == interest_id).cloned())
    }

    async fn list_all_interests(&self) -> Result<Vec<Interest>> {
        Ok(self.interests.clone())
    }
}

/// Two categories with ten interests in total:
/// sports = 1..=4, music = 5..=10.
pub fn sample_catalog() -> MockCatalog {
    let sports = ["football", "tennis", "chess", "running"];
    let music = ["jazz", "rock", "techno", "opera", "blues", "folk"];

    let mut interests = Vec::new();
    for (offset, name) in sports.iter().enumerate() {
        interests.push(Interest::new(offset as i64 + 1, *name, "sports", offset as i32));
    }
    for (offset, name) in music.iter().enumerate() {
        interests.push(Interest::new(offset as i64 + 5, *name, "music", offset as i32));
    }

    MockCatalog {
        categories: vec![Category::new("sports", 0), Category::new("music", 1)],
        interests,
        broken_lookups: Mutex::new(HashSet::new()),
    }
}

pub struct Fixture {
    pub store: Arc<MockSessionStore>,
    pub catalog: Arc<MockCatalog>,
    pub selections: Arc<MockSelectionRepository>,
    pub engine: Arc<EditSessionEngine>,
}

pub const USER: UserId = 42;

pub fn session_key(user_id: UserId) -> String {
    SessionSettings::default().key_for(user_id)
}

/// Engine over the sample catalog with the given committed selections of
/// [`USER`] and primary limits `min = 1`, `max = 2` (ceiling 2 for ten
/// interests at 20 %).
pub fn fixture(committed: Vec<Selection>) -> Fixture {
    let store = Arc::new(MockSessionStore::default());
    let catalog = Arc::new(sample_catalog());
    let selections = Arc::new(MockSelectionRepository::with(USER, committed));
    let engine = Arc::new(EditSessionEngine::new(
        store.clone(),
        catalog.clone(),
        selections.clone(),
        PrimaryLimits::new(0.2, 1, 2),
        SessionSettings::default(),
    ));
    Fixture {
        store,
        catalog,
        selections,
        engine,
    }
}
