//! In-memory CatalogRepository implementation.

use async_trait::async_trait;
use pickset_core::catalog::{CatalogRepository, Category, Interest};
use pickset_core::error::{PicksetError, Result};
use pickset_core::selection::InterestId;
use std::collections::HashSet;

/// A fixed catalog held in memory.
///
/// Categories and interests are kept sorted by display order (ties broken
/// by key or id) so every listing is deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    categories: Vec<Category>,
    interests: Vec<Interest>,
}

impl InMemoryCatalogRepository {
    /// Builds a catalog, rejecting duplicate ids and dangling category keys.
    pub fn new(mut categories: Vec<Category>, mut interests: Vec<Interest>) -> Result<Self> {
        let mut keys = HashSet::new();
        for category in &categories {
            if !keys.insert(category.key.as_str()) {
                return Err(PicksetError::config(format!(
                    "duplicate category key '{}'",
                    category.key
                )));
            }
        }

        let mut ids = HashSet::new();
        for interest in &interests {
            if !ids.insert(interest.id) {
                return Err(PicksetError::config(format!(
                    "duplicate interest id {}",
                    interest.id
                )));
            }
            if !keys.contains(interest.category_key.as_str()) {
                return Err(PicksetError::config(format!(
                    "interest {} refers to unknown category '{}'",
                    interest.id, interest.category_key
                )));
            }
        }

        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.key.cmp(&b.key))
        });
        interests.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self {
            categories,
            interests,
        })
    }

    pub fn interest_count(&self) -> usize {
        self.interests.len()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
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
        Ok(self.interests.iter().find(|i| i.id == interest_id).cloned())
    }

    async fn list_all_interests(&self) -> Result<Vec<Interest>> {
        Ok(self.interests.clone())
    }
}
