//! Unified path management for pickset configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pickset/           # Config directory
//! ├── config.toml              # Application configuration
//! └── catalog.toml             # Default catalog location
//!
//! ~/.local/share/pickset/      # Data directory (or [storage] data_dir)
//! ├── sessions/                # Active edit sessions (DirSessionStore)
//! └── selections/              # Committed selections (DirSelectionRepository)
//! ```

use std::path::{Path, PathBuf};

const APP_NAME: &str = "pickset";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for pickset.
pub struct PicksetPaths;

impl PicksetPaths {
    /// Returns the pickset configuration directory (e.g., `~/.config/pickset/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the pickset data directory (e.g., `~/.local/share/pickset/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the catalog file.
    pub fn catalog_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    /// Directory for active edit sessions under a data root.
    pub fn sessions_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("sessions")
    }

    /// Directory for committed selections under a data root.
    pub fn selections_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("selections")
    }

    /// Resolves the data root: the configured override, else the platform default.
    pub fn resolve_data_dir(configured: Option<&Path>) -> Result<PathBuf, PathError> {
        match configured {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Self::data_dir(),
        }
    }
}
