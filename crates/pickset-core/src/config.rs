//! Configuration model for the editor.
//!
//! All limits the engine enforces come from here; none are hardcoded in the
//! engine itself. The file format is TOML:
//!
//! ```toml
//! [primary]
//! primary_percentage = 0.2
//! min_primary_interests = 3
//! max_primary_interests = 10
//!
//! [session]
//! ttl_minutes = 30
//! key_prefix = "edit_session_"
//!
//! [storage]
//! data_dir = "/var/lib/pickset"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PicksetError, Result};
use crate::selection::UserId;

/// Root configuration structure for config.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PicksetConfig {
    #[serde(default)]
    pub primary: PrimaryLimits,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl PicksetConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PicksetConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.primary.validate()?;
        if self.session.ttl_minutes == 0 {
            return Err(PicksetError::config("session.ttl_minutes must be greater than 0"));
        }
        if self.session.key_prefix.is_empty() {
            return Err(PicksetError::config("session.key_prefix must not be empty"));
        }
        Ok(())
    }
}

/// Bounds for the number of selections that may be flagged primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryLimits {
    /// Share of the catalog that may be primary (0.0 - 1.0)
    pub primary_percentage: f64,
    pub min_primary_interests: usize,
    pub max_primary_interests: usize,
}

impl Default for PrimaryLimits {
    fn default() -> Self {
        Self {
            primary_percentage: 0.2,
            min_primary_interests: 3,
            max_primary_interests: 10,
        }
    }
}

impl PrimaryLimits {
    pub fn new(primary_percentage: f64, min_primary: usize, max_primary: usize) -> Self {
        Self {
            primary_percentage,
            min_primary_interests: min_primary,
            max_primary_interests: max_primary,
        }
    }

    /// Maximum number of primary selections for a catalog of the given size.
    ///
    /// `clamp(round(total * percentage), min, max)`.
    pub fn ceiling(&self, total_catalog_interests: usize) -> usize {
        let scaled = (total_catalog_interests as f64 * self.primary_percentage).round();
        let scaled = if scaled.is_finite() && scaled > 0.0 {
            scaled as usize
        } else {
            0
        };
        // Not `usize::clamp`: it panics when min > max.
        scaled
            .max(self.min_primary_interests)
            .min(self.max_primary_interests)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.primary_percentage) {
            return Err(PicksetError::config(format!(
                "primary.primary_percentage must be within 0.0..=1.0, got {}",
                self.primary_percentage
            )));
        }
        if self.min_primary_interests > self.max_primary_interests {
            return Err(PicksetError::config(format!(
                "primary.min_primary_interests ({}) exceeds primary.max_primary_interests ({})",
                self.min_primary_interests, self.max_primary_interests
            )));
        }
        Ok(())
    }
}

/// Edit session lifetime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Idle time after which the store may evict a session
    pub ttl_minutes: u64,
    /// Prefix of the per-user store key
    pub key_prefix: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_minutes: 30,
            key_prefix: "edit_session_".to_string(),
        }
    }
}

impl SessionSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }

    /// Store key of a user's session, e.g. `edit_session_42`.
    pub fn key_for(&self, user_id: UserId) -> String {
        format!("{}{}", self.key_prefix, user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory for file-backed stores; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
