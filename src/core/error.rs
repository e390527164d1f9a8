//! Error types for CRM operations

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, CrmError>;

/// Main error type for record operations
///
/// Every variant is terminal for the operation that raised it: writes run
/// in a transaction, so a failed write leaves the store unchanged.
#[derive(Error, Debug, Diagnostic)]
pub enum CrmError {
    #[error("'{value}' is not a valid {field}")]
    #[diagnostic(code(crm::validation))]
    Validation {
        field: &'static str,
        value: String,
        #[help]
        allowed: String,
    },

    #[error("{entity} #{id} not found")]
    #[diagnostic(code(crm::not_found))]
    NotFound { entity: &'static str, id: i64 },

    #[error("cannot delete {entity} #{id}: still referenced by {count} row(s) in {referenced_by}")]
    #[diagnostic(
        code(crm::restrict),
        help("delete or reassign the referencing rows first")
    )]
    Restricted {
        entity: &'static str,
        id: i64,
        referenced_by: &'static str,
        count: usize,
    },

    #[error("unknown field path '{path}' on {entity}")]
    #[diagnostic(code(crm::unknown_field))]
    UnknownField { entity: &'static str, path: String },

    #[error("migration {name} failed: {source}")]
    #[diagnostic(code(crm::migration))]
    Migration {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database error: {0}")]
    #[diagnostic(code(crm::database))]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(crm::io))]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(code(crm::config::read))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    #[diagnostic(code(crm::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid value '{value}' for {key}")]
    #[diagnostic(code(crm::config::invalid))]
    Invalid { key: &'static str, value: String },
}

impl CrmError {
    pub fn not_found(kind: crate::core::schema::EntityKind, id: i64) -> Self {
        CrmError::NotFound {
            entity: kind.name(),
            id,
        }
    }
}
