//! Error types for inference component specs
//!
//! Validation errors carry the component and field path they were found on,
//! so a reconciler can surface them on the parent resource's status without
//! re-deriving where they came from.

use std::path::PathBuf;

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for component spec operations
#[derive(Debug, Error)]
pub enum Error {
    /// A component spec field failed validation
    #[error("validation error for {component}: {message}")]
    Validation {
        /// Component the invalid field belongs to (e.g., "explainer")
        component: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "explainer.aix.storageUri")
        field: Option<String>,
    },

    /// Ambient configuration is missing or malformed
    #[error("configuration error: {message}")]
    Config {
        /// Description of what failed
        message: String,
        /// ConfigMap key being read (if known)
        key: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The document kind being (de)serialized (if known)
        kind: Option<String>,
    },

    /// Reading an input file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            component: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with component context and field path
    pub fn validation_for_field(
        component: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            component: component.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a configuration error with the given message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            key: None,
        }
    }

    /// Create a configuration error for a specific ConfigMap key
    pub fn config_for_key(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            key: Some(key.into()),
        }
    }

    /// Create a serialization error with document kind context
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the field path if this is a validation error on a known field
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Whether this error is a validation failure of user input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
            kind: Some("json".to_string()),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
            kind: Some("yaml".to_string()),
        }
    }
}
