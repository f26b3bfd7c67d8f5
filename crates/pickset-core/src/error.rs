//! Error types for the Pickset editor.

use thiserror::Error;

use crate::selection::{InterestId, UserId};

/// A shared error type for the entire Pickset workspace.
///
/// Store, catalog and persistence failures all travel through this type.
/// Rejected edits (for example hitting the primary ceiling) are NOT errors;
/// they are reported through [`crate::session::Rejection`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PicksetError {
    /// No active edit session for the user (absent or expired)
    #[error("No active edit session for user {user_id}")]
    SessionNotFound { user_id: UserId },

    /// The durable snapshot or catalog could not be read at session start
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// Committing the working selections to durable storage failed
    #[error("Persistence commit failed: {0}")]
    PersistenceCommit(String),

    /// Session store access failed
    #[error("Session store error: {0}")]
    Store(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PicksetError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn session_not_found(user_id: UserId) -> Self {
        Self::SessionNotFound { user_id }
    }

    pub fn upstream_fetch(message: impl Into<String>) -> Self {
        Self::UpstreamFetch(message.into())
    }

    pub fn persistence_commit(message: impl Into<String>) -> Self {
        Self::PersistenceCommit(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a NotFound error for a catalog interest
    pub fn interest_not_found(interest_id: InterestId) -> Self {
        Self::not_found("Interest", interest_id.to_string())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the user has to restart the edit flow
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }

    pub fn is_upstream_fetch(&self) -> bool {
        matches!(self, Self::UpstreamFetch(_))
    }

    pub fn is_persistence_commit(&self) -> bool {
        matches!(self, Self::PersistenceCommit(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PicksetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PicksetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PicksetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PicksetError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for collaborators implemented with anyhow)
impl From<anyhow::Error> for PicksetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, PicksetError>`.
pub type Result<T> = std::result::Result<T, PicksetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_message() {
        let err = PicksetError::session_not_found(42);
        assert!(err.is_session_not_found());
        assert_eq!(err.to_string(), "No active edit session for user 42");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: PicksetError = io.into();
        match err {
            PicksetError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_conversion_is_serialization() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: PicksetError = parse_err.into();
        assert!(matches!(err, PicksetError::Serialization { ref format, .. } if format == "TOML"));
    }
}
