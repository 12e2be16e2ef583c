//! Domain errors

use thiserror::Error;

/// Domain-level error types
///
/// Backend failures are carried as plain text so nothing above the
/// repository depends on the driver's error type.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Shorthand for a missing user keyed by id.
    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
