//! Error types for the Okta role manager

use std::fmt;
use thiserror::Error;

/// Kind of directory entity a lookup was resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Group,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Group => f.write_str("group"),
        }
    }
}

/// Error thrown when a directory record lacks a required field
#[derive(Debug, Error)]
#[error("Malformed {kind} record '{id}': field '{field}' is missing or not a string")]
pub struct MalformedRecordError {
    pub kind: EntityKind,
    pub id: String,
    pub field: &'static str,
}

/// General role manager error type
#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Okta {kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    #[error("Multiple Okta {kind}s named '{name}' found ({count} matches)")]
    AmbiguousResult {
        kind: EntityKind,
        name: String,
        count: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),

    #[error("Directory error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoleError {
    /// Shorthand for the error returned when a domain argument is supplied
    pub fn domain_unsupported() -> Self {
        RoleError::InvalidArgument("domain should not be used".to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoleError>;
