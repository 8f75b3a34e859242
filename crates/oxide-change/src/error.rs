//! Error types for change translation.

use crate::validation::ValidationErrors;

/// Errors that can occur while turning changes into SQL.
#[derive(Debug, thiserror::Error)]
pub enum ChangeError {
    /// No registered generator handles this statement on this dialect.
    #[error("{statement} is not supported on {database}")]
    UnsupportedStatement {
        /// Name of the statement type.
        statement: String,
        /// Short name of the target dialect.
        database: String,
    },

    /// One or more validation errors; generation was aborted.
    #[error("Validation failed:\n{0}")]
    Validation(ValidationErrors),

    /// No change type is registered under this node name.
    #[error("Unknown change type: {0}")]
    UnknownChange(String),

    /// A node was handed to the wrong change type.
    #[error("Expected a '{expected}' node, found '{found}'")]
    UnexpectedNode {
        /// Node name the change type reads.
        expected: String,
        /// Node name that was supplied.
        found: String,
    },

    /// An attribute could not be parsed into its field type.
    #[error("Invalid value '{value}' for attribute '{attribute}' of '{change}'")]
    InvalidAttribute {
        /// Change node name.
        change: String,
        /// Attribute name.
        attribute: String,
        /// Raw attribute value.
        value: String,
    },

    /// The process-wide generator registry was already built.
    #[error("The global SQL generator registry is already initialized")]
    RegistryInitialized,

    /// Invalid pattern handed to a SQL visitor.
    #[error("Invalid SQL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (reading change files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults raised by the snapshot collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The lookup itself failed.
    #[error("Failed to look up {object}: {message}")]
    Lookup {
        /// Description of the object being looked up.
        object: String,
        /// Reason reported by the snapshot service.
        message: String,
    },

    /// The snapshot service cannot answer this kind of question.
    #[error("Snapshot lookup not supported: {0}")]
    Unsupported(String),
}

/// Result type for change operations.
pub type Result<T> = std::result::Result<T, ChangeError>;
