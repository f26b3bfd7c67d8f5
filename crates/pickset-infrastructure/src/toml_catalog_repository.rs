//! TOML-based CatalogRepository implementation
//!
//! Catalog file format:
//!
//! ```toml
//! [[category]]
//! key = "sports"
//! display_order = 1
//!
//! [[interest]]
//! id = 1
//! key_name = "football"
//! category_key = "sports"
//! display_order = 1
//! ```

use async_trait::async_trait;
use pickset_core::catalog::{CatalogRepository, Category, Interest};
use pickset_core::error::{PicksetError, Result};
use pickset_core::selection::InterestId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::memory_catalog_repository::InMemoryCatalogRepository;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "category")]
    categories: Vec<Category>,
    #[serde(default, rename = "interest")]
    interests: Vec<Interest>,
}

/// A read-only catalog loaded once from a TOML file.
pub struct TomlCatalogRepository {
    path: PathBuf,
    inner: InMemoryCatalogRepository,
}

impl TomlCatalogRepository {
    /// Loads and validates the catalog file.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            PicksetError::io(format!(
                "Failed to read catalog file at {}: {}",
                path.display(),
                e
            ))
        })?;
        let inner = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            interests = inner.interest_count(),
            "[TomlCatalogRepository] Catalog loaded"
        );
        Ok(Self { path, inner })
    }

    /// Parses catalog TOML without touching the file system.
    pub fn parse(content: &str) -> Result<InMemoryCatalogRepository> {
        let file: CatalogFile = toml::from_str(content)?;
        InMemoryCatalogRepository::new(file.categories, file.interests)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogRepository for TomlCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.inner.list_categories().await
    }

    async fn list_interests_by_category(&self, category_key: &str) -> Result<Vec<Interest>> {
        self.inner.list_interests_by_category(category_key).await
    }

    async fn get_interest_by_id(&self, interest_id: InterestId) -> Result<Option<Interest>> {
        self.inner.get_interest_by_id(interest_id).await
    }

    async fn list_all_interests(&self) -> Result<Vec<Interest>> {
        self.inner.list_all_interests().await
    }
}
