//! Error types for query compilation and schema validation.

use thiserror::Error;

use crate::schema::NodeLabel;

/// Errors surfaced to callers of the compiler.
///
/// Only inspection can fail; explore requests always degrade to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested label has no primary-key entry
    #[error("'{label}' is invalid node label")]
    InvalidLabel {
        /// Label as the caller spelled it
        label: String,
    },

    /// The label resolved but its primary-key parameter was not supplied
    #[error("Primary key '{key}' not provided in query params")]
    MissingKey {
        /// Label as the caller spelled it
        label: String,
        /// Parameter name the caller must supply
        key: &'static str,
    },
}

/// Specialized Result type for compiler operations
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Create an invalid label error
    pub fn invalid_label(label: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
        }
    }

    /// Create a missing key error
    pub fn missing_key(label: impl Into<String>, key: &'static str) -> Self {
        Self::MissingKey {
            label: label.into(),
            key,
        }
    }

    /// The label the caller asked for
    pub fn label(&self) -> &str {
        match self {
            Self::InvalidLabel { label } | Self::MissingKey { label, .. } => label,
        }
    }
}

/// Errors raised while validating schema tables at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A persisted label has no primary key
    #[error("No primary key declared for label {0}")]
    MissingPrimaryKey(NodeLabel),

    /// A label has more than one primary key
    #[error("Primary key declared more than once for label {0}")]
    DuplicatePrimaryKey(NodeLabel),

    /// A virtual label was given a primary key
    #[error("Virtual label {0} cannot have a primary key")]
    UnexpectedPrimaryKey(NodeLabel),

    /// Two relationships share a name
    #[error("Relationship {0} declared more than once")]
    DuplicateRelationship(&'static str),

    /// Two relationships share a binding alias
    #[error("Relationship alias {0} used more than once")]
    DuplicateAlias(&'static str),
}
