//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/pickset/config.toml by default).

use pickset_core::config::PicksetConfig;
use pickset_core::error::{PicksetError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::PicksetPaths;

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields the default configuration; a present but invalid
/// file is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<PicksetConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config path.
    pub fn new() -> Result<Self> {
        let path = PicksetPaths::config_file().map_err(|e| PicksetError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a ConfigService for a custom config path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from file if not cached.
    pub fn get_config(&self) -> Result<PicksetConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::load_from(&self.path)?;
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    fn load_from(path: &Path) -> Result<PicksetConfig> {
        if !path.exists() {
            tracing::debug!(
                path = %path.display(),
                "[ConfigService] Config file not found, using defaults"
            );
            return Ok(PicksetConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PicksetError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        PicksetConfig::from_toml_str(&content).map_err(|e| {
            PicksetError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }
}
