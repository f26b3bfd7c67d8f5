pub mod check;
pub mod replay;

use anyhow::{Context, Result};
use pickset_core::config::PicksetConfig;
use pickset_infrastructure::PicksetPaths;
use std::path::PathBuf;

/// File locations after applying command line overrides.
pub struct ResolvedPaths {
    pub catalog_file: PathBuf,
    pub data_dir: PathBuf,
}

impl ResolvedPaths {
    pub fn resolve(
        config: &PicksetConfig,
        catalog: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let catalog_file = match catalog {
            Some(path) => path,
            None => PicksetPaths::catalog_file().context("Failed to resolve catalog path")?,
        };
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => PicksetPaths::resolve_data_dir(config.storage.data_dir.as_deref())
                .context("Failed to resolve data directory")?,
        };
        Ok(Self {
            catalog_file,
            data_dir,
        })
    }
}
