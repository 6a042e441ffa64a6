//! Error types for the storefront platform.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Tenant context missing or invalid")]
    TenantContext,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorefrontError {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        StorefrontError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a not-found failure.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StorefrontError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

pub type StorefrontResult<T> = std::result::Result<T, StorefrontError>;
