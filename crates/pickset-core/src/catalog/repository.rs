//! Catalog repository trait.

use async_trait::async_trait;

use super::model::{Category, Interest};
use crate::error::Result;
use crate::selection::InterestId;

/// Read-only access to categories and interests.
///
/// Implementations return categories and interests sorted by their
/// `display_order`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists all categories.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Lists the interests of one category.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Interest>)`: Interests of the category (empty for unknown keys)
    /// - `Err(_)`: Catalog could not be read
    async fn list_interests_by_category(&self, category_key: &str) -> Result<Vec<Interest>>;

    /// Finds an interest by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Interest))`: Interest found
    /// - `Ok(None)`: No interest with that ID
    /// - `Err(_)`: Catalog could not be read
    async fn get_interest_by_id(&self, interest_id: InterestId) -> Result<Option<Interest>>;

    /// Lists every interest of every category.
    async fn list_all_interests(&self) -> Result<Vec<Interest>>;
}
