//! Application error types.

use thiserror::Error;

/// Application-level errors for geoscene.
#[derive(Error, Debug)]
pub enum AppError {
    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    #[error("Store query error: {message}")]
    Query { message: String, query: String },

    #[error("Duplicate document '{id}' in collection '{collection}'")]
    Duplicate { collection: String, id: String },

    // Domain errors
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Operation denied")]
    OperationDenied,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    // Lock errors
    #[error("Lock '{0}' is held by another owner")]
    Locked(String),

    #[error("Lock '{0}' is not held by this owner")]
    NotLocked(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a [`AppError::NotFound`] of the given kind.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code, used as the GraphQL error extension code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Store(_) => "STORE_ERROR",
            AppError::Query { .. } => "QUERY_ERROR",
            AppError::Duplicate { .. } => "DUPLICATE",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::OperationDenied => "OPERATION_DENIED",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::Locked(_) => "LOCKED",
            AppError::NotLocked(_) => "NOT_LOCKED",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error means the requested thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}
