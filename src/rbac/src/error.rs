//! Error types for the RBAC engine

use thiserror::Error;

/// RBAC engine errors
///
/// Only parsing and configuration boundaries produce errors. Resolver
/// queries and mutations are total and never fail.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Permission string not present in the catalog
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Role name not present in the catalog
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Invalid resolver configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
