use anyhow::{Context, Result};
use pickset_core::catalog::CatalogRepository;
use pickset_core::config::PicksetConfig;
use pickset_infrastructure::TomlCatalogRepository;
use serde_json::json;

use super::ResolvedPaths;

/// Loads the catalog and prints what the editor would work with.
pub async fn run(config: &PicksetConfig, paths: &ResolvedPaths) -> Result<()> {
    let catalog = TomlCatalogRepository::load(&paths.catalog_file)
        .await
        .with_context(|| format!("Failed to load catalog {}", paths.catalog_file.display()))?;

    let categories = catalog.list_categories().await?;
    let total_interests = catalog.list_all_interests().await?.len();

    let mut per_category = serde_json::Map::new();
    for category in &categories {
        let count = catalog.list_interests_by_category(&category.key).await?.len();
        per_category.insert(category.key.clone(), json!(count));
    }

    let report = json!({
        "catalog": paths.catalog_file,
        "data_dir": paths.data_dir,
        "categories": per_category,
        "total_interests": total_interests,
        "primary_ceiling": config.primary.ceiling(total_interests),
        "session_ttl_minutes": config.session.ttl_minutes,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
